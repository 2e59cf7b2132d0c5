use dominator::{clone, events, html, with_node, Dom, EventOptions};
use futures_signals::signal::Mutable;
use web_sys::HtmlInputElement;

use crate::constants::{PROP_AUTOCOMPLETE, PROP_HREF, PROP_PLACEHOLDER, PROP_TYPE, PROP_VALUE, TAG_A, TAG_INPUT};

/// Input kept in sync with `value` both ways.
pub fn text_input(kind: &str, placeholder: &str, autocomplete: &str, value: &Mutable<String>) -> Dom {
    html!(TAG_INPUT => HtmlInputElement, {
        .attr(PROP_TYPE, kind)
        .attr(PROP_PLACEHOLDER, placeholder)
        .attr(PROP_AUTOCOMPLETE, autocomplete)
        .prop_signal(PROP_VALUE, value.signal_cloned())
        .with_node!(element => {
            .event(clone!(value => move |_: events::Input| {
                value.set_neq(element.value());
            }))
        })
    })
}

pub fn link(label: &str, mut click: impl FnMut() + 'static) -> Dom {
    html!(TAG_A, {
        .attr(PROP_HREF, "#")
        .text(label)
        .event_with_options(&EventOptions::preventable(), move |e: events::Click| {
            e.prevent_default();
            click();
        })
    })
}
