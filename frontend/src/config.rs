use wasm_bindgen::JsValue;

use shared::config::{ConfigError, FirebaseConfig};

use crate::constants::GLOBAL_CONFIG;
use crate::utils::{get_window, js_message};

/// Reads `window.FIREBASE_CONFIG`; `Ok(None)` when the page does not define it.
pub fn load() -> Result<Option<FirebaseConfig>, ConfigError> {
    let window = get_window().ok_or(ConfigError::NoWindow)?;
    let value = js_sys::Reflect::get(&window, &JsValue::from_str(GLOBAL_CONFIG))
        .map_err(|err| ConfigError::Invalid(js_message(&err)))?;
    if value.is_undefined() || value.is_null() {
        return Ok(None);
    }
    let config: FirebaseConfig =
        serde_wasm_bindgen::from_value(value).map_err(|err| ConfigError::Invalid(err.to_string()))?;
    config.validate().map(Some)
}
