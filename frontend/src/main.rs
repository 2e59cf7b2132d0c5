use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;

use shared::controller::Controller;
use shared::memory::{MemoryIdentity, MemoryStore};
use shared::services::{DocumentStore, IdentityService};

use crate::elements::app_root::app_root;
use crate::firebase::{FirebaseIdentity, FirestoreStore};
use crate::timers::BrowserTimers;

mod config;
mod connect_fetch;
mod constants;
mod elements;
mod firebase;
mod timers;
mod utils;

pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    spawn_local(start());
}

async fn start() {
    match config::load() {
        Ok(Some(config)) => {
            let config = Rc::new(config);
            let identity = FirebaseIdentity::new(config.clone());
            identity.restore().await;
            let store = FirestoreStore::new(config, identity.tokens());
            mount(Controller::new(identity, store, BrowserTimers));
        }
        Ok(None) => {
            log::warn!("{} is not set, running on in-memory services", constants::GLOBAL_CONFIG);
            demo();
        }
        Err(err) => {
            log::error!("{err}, running on in-memory services");
            demo();
        }
    }
}

fn demo() {
    mount(Controller::new(MemoryIdentity::new(), MemoryStore::new(), BrowserTimers));
}

fn mount<I, D>(controller: Controller<I, D, BrowserTimers>)
    where
        I: IdentityService + 'static,
        D: DocumentStore + 'static
{
    let app = Rc::new(controller);
    dominator::append_dom(&dominator::body(), app_root(app.clone()));
    spawn_local(app.watch(|task| spawn_local(task)));
}
