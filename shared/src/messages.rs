use crate::constants::MSG_GENERIC;
use crate::error::ServiceError;

fn raw_message(err: &ServiceError) -> String {
    let message = err.to_string();
    if message.is_empty() {
        MSG_GENERIC.to_string()
    } else {
        message
    }
}

pub fn sign_up_error_message(err: &ServiceError) -> String {
    match err.code() {
        Some("auth/email-already-in-use") => "This email is already registered".to_string(),
        Some("auth/invalid-email") => "Invalid email address".to_string(),
        Some("auth/weak-password") => "Password should be at least 6 characters".to_string(),
        _ => raw_message(err),
    }
}

pub fn log_in_error_message(err: &ServiceError) -> String {
    match err.code() {
        Some("auth/user-not-found") => "No account found with this email".to_string(),
        Some("auth/wrong-password") => "Incorrect password".to_string(),
        Some("auth/invalid-email") => "Invalid email address".to_string(),
        Some("auth/user-disabled") => "This account has been disabled".to_string(),
        _ => raw_message(err),
    }
}

/// Dashboard-side failures show the raw message behind a fixed prefix.
pub fn prefixed_message(prefix: &str, err: &ServiceError) -> String {
    format!("{prefix}{err}")
}
