use dominator::{clone, html, Dom};
use futures_signals::signal::SignalExt;

use shared::services::{DocumentStore, IdentityService};
use shared::types::Page;

use crate::constants::TAG_DIV;
use crate::elements::app_banner::spinner;
use crate::elements::app_dashboard::dashboard_page;
use crate::elements::app_login::{login_page, signup_page};
use crate::elements::App;

/// Renders at most one page: the one the controller last selected.
pub fn app_root<I, D>(app: App<I, D>) -> Dom
    where
        I: IdentityService + 'static,
        D: DocumentStore + 'static
{
    html!(TAG_DIV, {
        .class("app-root")
        .child_signal(app.ui().page.signal().map(clone!(app => move |page| {
            page.map(|page| match page {
                Page::Login => login_page(app.clone()),
                Page::Signup => signup_page(app.clone()),
                Page::Dashboard => dashboard_page(app.clone()),
            })
        })))
        .child(spinner(&app.ui().loading))
    })
}
