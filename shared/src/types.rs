use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::{avatar_initial, display_name_or_default};

/// Authenticated identity as reported by the identity service.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Default)]
pub struct Session {
    pub uid: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl Session {
    pub fn new(uid: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: email.into(),
            display_name: None,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }
}

/// Values shown in the dashboard header.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub initial: String,
}

impl From<&Session> for Profile {
    fn from(session: &Session) -> Self {
        let display_name = session.display_name.as_deref();
        Self {
            name: display_name_or_default(display_name).to_string(),
            email: session.email.clone(),
            initial: avatar_initial(display_name, Some(&session.email)),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single user-owned note as stored in the document store.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct NoteRecord {
    pub owner_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl NoteRecord {
    pub fn new(owner_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            owner_id: owner_id.into(),
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredNote {
    pub id: RecordId,
    pub record: NoteRecord,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Page {
    Login,
    Signup,
    Dashboard,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_uses_display_name() {
        let session = Session::new("u1", "ada@x.com").with_display_name("ada");
        let profile = Profile::from(&session);
        assert_eq!(profile.name, "ada");
        assert_eq!(profile.email, "ada@x.com");
        assert_eq!(profile.initial, "A");
    }

    #[test]
    fn profile_without_display_name_falls_back() {
        let session = Session::new("u1", "bob@x.com");
        let profile = Profile::from(&session);
        assert_eq!(profile.name, "User");
        assert_eq!(profile.initial, "B");
    }
}
