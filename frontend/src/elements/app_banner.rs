use dominator::{html, Dom};
use futures_signals::signal::{Mutable, SignalExt};

use shared::banner::Banner;

use crate::constants::{CLASS_HIDDEN, CLASS_SHOW, TAG_DIV};

pub fn banner(banner: &Banner) -> Dom {
    html!(TAG_DIV, {
        .class("error-message")
        .class_signal(CLASS_SHOW, banner.visible.signal())
        .text_signal(banner.text.signal_cloned())
    })
}

pub fn spinner(loading: &Mutable<bool>) -> Dom {
    html!(TAG_DIV, {
        .class("loading-spinner")
        .class_signal(CLASS_HIDDEN, loading.signal().map(|flag| !flag))
    })
}
