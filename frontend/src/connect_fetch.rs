use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use shared::error::ServiceError;

use crate::utils::{get_window, js_message};

const CONTENT_JSON: &str = "application/json";
const CONTENT_FORM: &str = "application/x-www-form-urlencoded";

/// Status and raw body of a completed request; HTTP errors are not failures here.
pub struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

fn network(err: JsValue) -> ServiceError {
    ServiceError::Network(js_message(&err))
}

pub async fn send_json<T>(method: &str, url: &str, data: Option<&T>, bearer: Option<&str>) -> Result<Reply, ServiceError>
    where
        T: Serialize + ?Sized
{
    let body = match data {
        Some(data) => Some(serde_json::to_string(data).map_err(|err| ServiceError::Decode(err.to_string()))?),
        None => None,
    };
    send(method, url, body, CONTENT_JSON, bearer).await
}

pub async fn send_form(url: &str, body: &str) -> Result<Reply, ServiceError> {
    send("POST", url, Some(body.to_string()), CONTENT_FORM, None).await
}

async fn send(method: &str, url: &str, body: Option<String>, content_type: &str, bearer: Option<&str>) -> Result<Reply, ServiceError> {
    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_mode(RequestMode::Cors);
    if let Some(body) = body {
        opts.set_body(&JsValue::from_str(&body));
    }

    let request = Request::new_with_str_and_init(url, &opts).map_err(network)?;
    request.headers().set("Content-Type", content_type).map_err(network)?;
    if let Some(token) = bearer {
        request.headers().set("Authorization", &format!("Bearer {token}")).map_err(network)?;
    }

    let window = get_window().ok_or_else(|| ServiceError::Network("no window".to_string()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await.map_err(network)?;
    let resp: Response = resp_value.dyn_into().map_err(network)?;

    let text = JsFuture::from(resp.text().map_err(network)?).await.map_err(network)?;

    Ok(Reply {
        status: resp.status(),
        body: text.as_string().unwrap_or_default(),
    })
}
