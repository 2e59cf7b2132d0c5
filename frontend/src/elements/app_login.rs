use dominator::{clone, events, html, Dom, EventOptions};
use wasm_bindgen_futures::spawn_local;

use shared::services::{DocumentStore, IdentityService};

use crate::constants::{CLASS_ACTIVE, CLASS_PAGE, PROP_TYPE, TAG_BUTTON, TAG_DIV, TAG_FORM, TAG_H2, TAG_P};
use crate::elements::app_banner::banner;
use crate::elements::form::{link, text_input};
use crate::elements::App;
use crate::utils::set_title;

fn css_class(label: &str) -> String {
    format!("app-login__{label}")
}

fn submit_button(label: &str) -> Dom {
    html!(TAG_BUTTON, {
        .class(css_class("submit"))
        .attr(PROP_TYPE, "submit")
        .text(label)
    })
}

pub fn login_page<I, D>(app: App<I, D>) -> Dom
    where
        I: IdentityService + 'static,
        D: DocumentStore + 'static
{
    set_title("Log in");
    let form = &app.ui().login_form;
    html!(TAG_DIV, {
        .attr("id", "loginPage")
        .class(CLASS_PAGE)
        .class(CLASS_ACTIVE)
        .children([
            html!(TAG_H2, { .text("Log in") }),
            banner(&app.ui().login_error),
            html!(TAG_FORM, {
                .class(css_class("form"))
                .event_with_options(&EventOptions::preventable(), clone!(app => move |e: events::Submit| {
                    e.prevent_default();
                    let form = &app.ui().login_form;
                    let email = form.email.get_cloned();
                    let password = form.password.get_cloned();
                    let app = app.clone();
                    spawn_local(async move {
                        app.log_in(&email, &password).await;
                    });
                }))
                .children([
                    text_input("email", "Email", "email", &form.email),
                    text_input("password", "Password", "current-password", &form.password),
                    submit_button("Log in"),
                ])
            }),
            html!(TAG_P, {
                .class(css_class("switch"))
                .text("Don't have an account? ")
                .child(link("Sign up", clone!(app => move || app.show_signup())))
            }),
        ])
    })
}

pub fn signup_page<I, D>(app: App<I, D>) -> Dom
    where
        I: IdentityService + 'static,
        D: DocumentStore + 'static
{
    set_title("Sign up");
    let form = &app.ui().signup_form;
    html!(TAG_DIV, {
        .attr("id", "signupPage")
        .class(CLASS_PAGE)
        .class(CLASS_ACTIVE)
        .children([
            html!(TAG_H2, { .text("Sign up") }),
            banner(&app.ui().signup_error),
            html!(TAG_FORM, {
                .class(css_class("form"))
                .event_with_options(&EventOptions::preventable(), clone!(app => move |e: events::Submit| {
                    e.prevent_default();
                    let form = &app.ui().signup_form;
                    let name = form.name.get_cloned();
                    let email = form.email.get_cloned();
                    let password = form.password.get_cloned();
                    let app = app.clone();
                    spawn_local(async move {
                        app.sign_up(&name, &email, &password).await;
                    });
                }))
                .children([
                    text_input("text", "Full name", "name", &form.name),
                    text_input("email", "Email", "email", &form.email),
                    text_input("password", "Password", "new-password", &form.password),
                    submit_button("Sign up"),
                ])
            }),
            html!(TAG_P, {
                .class(css_class("switch"))
                .text("Already have an account? ")
                .child(link("Log in", clone!(app => move || app.show_login())))
            }),
        ])
    })
}
