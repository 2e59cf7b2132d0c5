use serde::Deserialize;
use thiserror::Error;

use crate::constants::{FIRESTORE_ENDPOINT, IDENTITY_ENDPOINT, TOKEN_ENDPOINT};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("window is not available")]
    NoWindow,
    #[error("invalid FIREBASE_CONFIG: {0}")]
    Invalid(String),
    #[error("FIREBASE_CONFIG.{0} must not be empty")]
    Empty(&'static str),
}

fn identity_endpoint() -> String {
    IDENTITY_ENDPOINT.to_string()
}

fn token_endpoint() -> String {
    TOKEN_ENDPOINT.to_string()
}

fn firestore_endpoint() -> String {
    FIRESTORE_ENDPOINT.to_string()
}

/// Web app settings, in the shape of the hosted backend's JS snippet.
///
/// The endpoint fields are not part of that snippet; they default to the
/// production hosts and can be pointed at local emulators.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FirebaseConfig {
    pub api_key: String,
    pub project_id: String,
    #[serde(default)]
    pub auth_domain: Option<String>,
    #[serde(default = "identity_endpoint")]
    pub identity_endpoint: String,
    #[serde(default = "token_endpoint")]
    pub token_endpoint: String,
    #[serde(default = "firestore_endpoint")]
    pub firestore_endpoint: String,
}

impl FirebaseConfig {
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::Empty("apiKey"));
        }
        if self.project_id.trim().is_empty() {
            return Err(ConfigError::Empty("projectId"));
        }
        Ok(self)
    }

    /// `accounts:<method>` on the Identity Toolkit.
    pub fn identity_url(&self, method: &str) -> String {
        format!(
            "{}/accounts:{method}?key={}",
            self.identity_endpoint.trim_end_matches('/'),
            self.api_key
        )
    }

    pub fn token_url(&self) -> String {
        format!("{}?key={}", self.token_endpoint, self.api_key)
    }

    pub fn documents_url(&self) -> String {
        format!(
            "{}/projects/{}/databases/(default)/documents",
            self.firestore_endpoint.trim_end_matches('/'),
            self.project_id
        )
    }

    pub fn collection_url(&self, collection: &str) -> String {
        format!("{}/{collection}", self.documents_url())
    }

    pub fn document_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{collection}/{id}", self.documents_url())
    }

    pub fn run_query_url(&self) -> String {
        format!("{}:runQuery", self.documents_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> FirebaseConfig {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn defaults_to_production_hosts() {
        let config = parse(r#"{"apiKey": "k", "projectId": "lab-11", "authDomain": "lab-11.firebaseapp.com"}"#);
        assert_eq!(
            config.identity_url("signUp"),
            "https://identitytoolkit.googleapis.com/v1/accounts:signUp?key=k"
        );
        assert_eq!(config.token_url(), "https://securetoken.googleapis.com/v1/token?key=k");
        assert_eq!(
            config.document_url("userData", "abc"),
            "https://firestore.googleapis.com/v1/projects/lab-11/databases/(default)/documents/userData/abc"
        );
        assert_eq!(
            config.run_query_url(),
            "https://firestore.googleapis.com/v1/projects/lab-11/databases/(default)/documents:runQuery"
        );
    }

    #[test]
    fn emulator_endpoints() {
        let config = parse(
            r#"{"apiKey": "k", "projectId": "demo",
                "identityEndpoint": "http://localhost:9099/identitytoolkit.googleapis.com/v1/",
                "firestoreEndpoint": "http://localhost:8080/v1"}"#,
        );
        assert_eq!(
            config.identity_url("signInWithPassword"),
            "http://localhost:9099/identitytoolkit.googleapis.com/v1/accounts:signInWithPassword?key=k"
        );
        assert_eq!(
            config.collection_url("userData"),
            "http://localhost:8080/v1/projects/demo/databases/(default)/documents/userData"
        );
    }

    #[test]
    fn rejects_blank_keys() {
        let config = parse(r#"{"apiKey": " ", "projectId": "p"}"#);
        assert!(matches!(config.validate(), Err(ConfigError::Empty("apiKey"))));
        let config = parse(r#"{"apiKey": "k", "projectId": ""}"#);
        assert!(matches!(config.validate(), Err(ConfigError::Empty("projectId"))));
    }

    #[test]
    fn missing_api_key_fails_to_parse() {
        assert!(serde_json::from_str::<FirebaseConfig>(r#"{"projectId": "p"}"#).is_err());
    }
}
