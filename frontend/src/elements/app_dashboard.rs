use dominator::{clone, events, html, Dom, EventOptions};
use futures_signals::map_ref;
use futures_signals::signal::{Mutable, Signal, SignalExt};
use futures_signals::signal_vec::SignalVecExt;
use wasm_bindgen_futures::spawn_local;

use shared::constants::EMPTY_LIST_PLACEHOLDER;
use shared::services::{DocumentStore, IdentityService};
use shared::state::NoteListView;
use shared::types::{Profile, StoredNote};

use crate::constants::{CLASS_ACTIVE, CLASS_PAGE, PROP_TYPE, TAG_BUTTON, TAG_DIV, TAG_FORM, TAG_LI, TAG_SPAN, TAG_UL};
use crate::elements::app_banner::banner;
use crate::elements::form::text_input;
use crate::elements::App;
use crate::utils::set_title;

fn css_class(label: &str) -> String {
    format!("app-dashboard__{label}")
}

fn profile_text(profile: &Mutable<Option<Profile>>, field: fn(&Profile) -> String) -> impl Signal<Item=String> {
    profile.signal_ref(move |p| p.as_ref().map(field).unwrap_or_default())
}

pub fn dashboard_page<I, D>(app: App<I, D>) -> Dom
    where
        I: IdentityService + 'static,
        D: DocumentStore + 'static
{
    set_title("Dashboard");
    html!(TAG_DIV, {
        .attr("id", "dashboardPage")
        .class(CLASS_PAGE)
        .class(CLASS_ACTIVE)
        .children([
            header(&app),
            banner(&app.ui().dashboard_error),
            note_form(&app),
            note_list(&app),
        ])
    })
}

fn header<I, D>(app: &App<I, D>) -> Dom
    where
        I: IdentityService + 'static,
        D: DocumentStore + 'static
{
    let profile = &app.ui().profile;
    html!(TAG_DIV, {
        .class(css_class("header"))
        .children([
            html!(TAG_DIV, {
                .class(css_class("avatar"))
                .text_signal(profile_text(profile, |p| p.initial.clone()))
            }),
            html!(TAG_DIV, {
                .class(css_class("user"))
                .children([
                    html!(TAG_SPAN, {
                        .class(css_class("name"))
                        .text_signal(profile_text(profile, |p| p.name.clone()))
                    }),
                    html!(TAG_SPAN, {
                        .class(css_class("email"))
                        .text_signal(profile_text(profile, |p| p.email.clone()))
                    }),
                ])
            }),
            html!(TAG_BUTTON, {
                .class(css_class("logout"))
                .attr(PROP_TYPE, "button")
                .text("Log out")
                .event(clone!(app => move |_: events::Click| {
                    let app = app.clone();
                    spawn_local(async move {
                        app.log_out().await;
                    });
                }))
            }),
        ])
    })
}

fn note_form<I, D>(app: &App<I, D>) -> Dom
    where
        I: IdentityService + 'static,
        D: DocumentStore + 'static
{
    html!(TAG_FORM, {
        .class(css_class("form"))
        .event_with_options(&EventOptions::preventable(), clone!(app => move |e: events::Submit| {
            e.prevent_default();
            let app = app.clone();
            spawn_local(async move {
                app.submit_note().await;
            });
        }))
        .children([
            text_input("text", "Enter some data", "off", &app.ui().note_input),
            html!(TAG_BUTTON, {
                .attr(PROP_TYPE, "submit")
                .text("Save")
            }),
        ])
    })
}

fn note_list<I, D>(app: &App<I, D>) -> Dom
    where
        I: IdentityService + 'static,
        D: DocumentStore + 'static
{
    let ui = app.ui();
    let view = map_ref! {
        let loaded = ui.notes_loaded.signal(),
        let notes = ui.notes.signal_vec_cloned().to_signal_cloned() =>
        NoteListView::from_parts(*loaded, notes)
    };
    html!(TAG_UL, {
        .class(css_class("list"))
        .children_signal_vec(view.map(clone!(app => move |view| list_items(&app, view))).to_signal_vec())
    })
}

fn list_items<I, D>(app: &App<I, D>, view: NoteListView) -> Vec<Dom>
    where
        I: IdentityService + 'static,
        D: DocumentStore + 'static
{
    match view {
        NoteListView::Hidden => vec![],
        NoteListView::Placeholder => vec![html!(TAG_LI, {
            .class(css_class("placeholder"))
            .text(EMPTY_LIST_PLACEHOLDER)
        })],
        NoteListView::Items(notes) => notes.into_iter().map(|note| note_item(app, note)).collect(),
    }
}

fn note_item<I, D>(app: &App<I, D>, note: StoredNote) -> Dom
    where
        I: IdentityService + 'static,
        D: DocumentStore + 'static
{
    let id = note.id;
    html!(TAG_LI, {
        .class(css_class("item"))
        .children([
            html!(TAG_SPAN, { .text(&note.record.content) }),
            html!(TAG_BUTTON, {
                .attr(PROP_TYPE, "button")
                .text("Delete")
                .event(clone!(app => move |_: events::Click| {
                    let app = app.clone();
                    let id = id.clone();
                    spawn_local(async move {
                        app.delete_note(&id).await;
                    });
                }))
            }),
        ])
    })
}
