use thiserror::Error;

use crate::constants::{MSG_EMPTY_NOTE, MSG_NO_SESSION};

/// Failure reported by an external identity or document service.
///
/// `Display` renders the raw service message, which is what the UI shows for
/// codes it has no fixed text for.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("{message}")]
    Auth { code: String, message: String },
    #[error("{message}")]
    Store { code: String, message: String },
    #[error("network request failed: {0}")]
    Network(String),
    #[error("malformed response: {0}")]
    Decode(String),
}

impl ServiceError {
    pub fn auth(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Auth {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn store(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Store {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Auth { code, .. } | Self::Store { code, .. } => Some(code),
            Self::Network(_) | Self::Decode(_) => None,
        }
    }
}

/// Local rejection of an "add note" submission; never reaches the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NoteRejected {
    #[error("{}", MSG_NO_SESSION)]
    NoSession,
    #[error("{}", MSG_EMPTY_NOTE)]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_raw_message() {
        let err = ServiceError::auth("auth/wrong-password", "Firebase: Error (auth/wrong-password).");
        assert_eq!(err.to_string(), "Firebase: Error (auth/wrong-password).");
        assert_eq!(err.code(), Some("auth/wrong-password"));
    }

    #[test]
    fn transport_errors_have_no_code() {
        assert_eq!(ServiceError::Network("offline".into()).code(), None);
        assert_eq!(ServiceError::Decode("bad json".into()).code(), None);
    }

    #[test]
    fn rejection_texts() {
        assert_eq!(NoteRejected::NoSession.to_string(), "You must be logged in to save data");
        assert_eq!(NoteRejected::Empty.to_string(), "Please enter some data");
    }
}
