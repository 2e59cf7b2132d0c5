use std::rc::Rc;

use shared::config::FirebaseConfig;
use shared::error::ServiceError;
use shared::firestore::{decode_document, decode_error, decode_query, encode_record, equality_query};
use shared::services::DocumentStore;
use shared::types::{NoteRecord, RecordId, StoredNote};

use crate::connect_fetch::{send_json, Reply};
use crate::firebase::auth::TokenStore;

fn checked(reply: Reply) -> Result<Reply, ServiceError> {
    if reply.is_success() {
        Ok(reply)
    } else {
        Err(decode_error(reply.status, &reply.body))
    }
}

/// Cloud Firestore over its v1 REST API, authorised as the signed-in user.
#[derive(Clone)]
pub struct FirestoreStore {
    config: Rc<FirebaseConfig>,
    tokens: TokenStore,
}

impl FirestoreStore {
    pub fn new(config: Rc<FirebaseConfig>, tokens: TokenStore) -> Self {
        Self { config, tokens }
    }
}

impl DocumentStore for FirestoreStore {
    async fn insert(&self, collection: &str, record: &NoteRecord) -> Result<RecordId, ServiceError> {
        let token = self.tokens.id_token().await?;
        let reply = send_json("POST", &self.config.collection_url(collection), Some(&encode_record(record)), Some(&token)).await?;
        decode_document(&checked(reply)?.body)?.record_id()
    }

    async fn query_where(&self, collection: &str, field: &str, value: &str) -> Result<Vec<StoredNote>, ServiceError> {
        let token = self.tokens.id_token().await?;
        let query = equality_query(collection, field, value);
        let reply = send_json("POST", &self.config.run_query_url(), Some(&query), Some(&token)).await?;
        decode_query(&checked(reply)?.body)
    }

    async fn delete_by_id(&self, collection: &str, id: &RecordId) -> Result<(), ServiceError> {
        let token = self.tokens.id_token().await?;
        let url = self.config.document_url(collection, id.as_str());
        checked(send_json::<()>("DELETE", &url, None, Some(&token)).await?)?;
        Ok(())
    }
}
