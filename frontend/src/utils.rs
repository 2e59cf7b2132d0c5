use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Storage, Window};

pub fn get_window() -> Option<Window> {
    web_sys::window()
}

fn get_document() -> Option<Document> {
    get_window().and_then(|w| w.document())
}

pub fn set_title(text: &str) {
    if let Some(d) = get_document() {
        d.set_title(text);
    }
}

fn local_storage() -> Option<Storage> {
    get_window().and_then(|w| w.local_storage().ok()).and_then(|s| s)
}

pub fn storage_get(key: &str) -> Option<String> {
    local_storage().and_then(|s| s.get_item(key).ok()).and_then(|v| v)
}

pub fn storage_set(key: &str, value: &str) {
    if let Some(storage) = local_storage() {
        if let Err(err) = storage.set_item(key, value) {
            log::warn!("localStorage write failed: {}", js_message(&err));
        }
    }
}

pub fn storage_remove(key: &str) {
    if let Some(storage) = local_storage() {
        storage.remove_item(key).ok();
    }
}

/// Best-effort text of a thrown JS value.
pub fn js_message(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        String::from(err.message())
    } else if let Some(text) = value.as_string() {
        text
    } else {
        format!("{value:?}")
    }
}
