pub static PROP_PLACEHOLDER: &'static str = "placeholder";
pub static PROP_TYPE: &'static str = "type";
pub static PROP_VALUE: &'static str = "value";
pub static PROP_HREF: &'static str = "href";
pub static PROP_AUTOCOMPLETE: &'static str = "autocomplete";

pub static TAG_DIV: &'static str = "div";
pub static TAG_SPAN: &'static str = "span";
pub static TAG_INPUT: &'static str = "input";
pub static TAG_BUTTON: &'static str = "button";
pub static TAG_FORM: &'static str = "form";
pub static TAG_A: &'static str = "a";
pub static TAG_UL: &'static str = "ul";
pub static TAG_LI: &'static str = "li";
pub static TAG_H2: &'static str = "h2";
pub static TAG_P: &'static str = "p";

pub static CLASS_PAGE: &'static str = "page";
pub static CLASS_ACTIVE: &'static str = "active";
pub static CLASS_SHOW: &'static str = "show";
pub static CLASS_HIDDEN: &'static str = "hidden";

pub static GLOBAL_CONFIG: &'static str = "FIREBASE_CONFIG";
