//! Request and response bodies of the Identity Toolkit and Secure Token REST
//! APIs, and the translation of their error reasons to SDK-style codes.

use serde::{Deserialize, Serialize};

use crate::error::ServiceError;
use crate::types::Session;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub return_secure_token: bool,
}

impl<'a> PasswordRequest<'a> {
    pub fn new(email: &'a str, password: &'a str) -> Self {
        Self {
            email,
            password,
            return_secure_token: true,
        }
    }
}

/// Reply of `accounts:signUp` and `accounts:signInWithPassword`.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PasswordResponse {
    pub id_token: String,
    pub refresh_token: String,
    pub local_id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub display_name: Option<String>,
    /// Lifetime of `id_token` in seconds, sent as a decimal string.
    pub expires_in: String,
}

impl PasswordResponse {
    pub fn session(&self) -> Session {
        Session {
            uid: self.local_id.clone(),
            email: self.email.clone(),
            display_name: self.display_name.clone().filter(|n| !n.is_empty()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest<'a> {
    pub id_token: &'a str,
    pub display_name: &'a str,
    pub return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileResponse {
    pub local_id: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupRequest<'a> {
    pub id_token: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LookupResponse {
    #[serde(default)]
    pub users: Vec<LookupUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupUser {
    pub local_id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub disabled: bool,
}

impl LookupUser {
    pub fn session(&self) -> Session {
        Session {
            uid: self.local_id.clone(),
            email: self.email.clone(),
            display_name: self.display_name.clone().filter(|n| !n.is_empty()),
        }
    }
}

/// Secure Token reply; this endpoint uses snake_case keys.
#[derive(Debug, Deserialize)]
pub struct RefreshResponse {
    pub id_token: String,
    pub refresh_token: String,
    pub user_id: String,
    pub expires_in: String,
}

/// Form fields of a Secure Token refresh, in request order.
pub fn refresh_params(refresh_token: &str) -> [(&'static str, &str); 2] {
    [("grant_type", "refresh_token"), ("refresh_token", refresh_token)]
}

pub fn parse_expires_in(value: &str) -> i64 {
    value.trim().parse::<i64>().unwrap_or(3600)
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub message: String,
}

/// SDK error code for a REST error reason such as `WEAK_PASSWORD : ...`.
pub fn sdk_code(reason: &str) -> String {
    let reason = reason.split(':').next().unwrap_or_default().trim();
    let code = match reason {
        "EMAIL_EXISTS" => "email-already-in-use",
        "INVALID_EMAIL" | "MISSING_EMAIL" => "invalid-email",
        "WEAK_PASSWORD" => "weak-password",
        "EMAIL_NOT_FOUND" | "USER_NOT_FOUND" => "user-not-found",
        "INVALID_PASSWORD" => "wrong-password",
        "MISSING_PASSWORD" => "missing-password",
        "USER_DISABLED" => "user-disabled",
        "INVALID_LOGIN_CREDENTIALS" => "invalid-credential",
        "TOO_MANY_ATTEMPTS_TRY_LATER" => "too-many-requests",
        "OPERATION_NOT_ALLOWED" | "PASSWORD_LOGIN_DISABLED" => "operation-not-allowed",
        "TOKEN_EXPIRED" | "INVALID_ID_TOKEN" | "INVALID_REFRESH_TOKEN" => "user-token-expired",
        "" => "internal-error",
        other => return format!("auth/{}", other.to_lowercase().replace('_', "-")),
    };
    format!("auth/{code}")
}

pub fn auth_error(code: &str) -> ServiceError {
    ServiceError::auth(code, format!("Firebase: Error ({code})."))
}

/// Turns a failed Identity Toolkit reply into a [`ServiceError`].
pub fn decode_error(status: u16, body: &str) -> ServiceError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => auth_error(&sdk_code(&parsed.error.message)),
        Err(_) => ServiceError::Network(format!("identity service returned status {status}")),
    }
}
