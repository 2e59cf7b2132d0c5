//! Contracts of the two hosted services the client delegates to.
//!
//! Both traits are used through generics on a single-threaded executor, so the
//! futures they return carry no `Send` bound.

use crate::error::ServiceError;
use crate::observer::Subscription;
use crate::types::{NoteRecord, RecordId, Session, StoredNote};

pub trait IdentityService {
    async fn create_account(&self, email: &str, password: &str) -> Result<Session, ServiceError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, ServiceError>;

    async fn sign_out(&self) -> Result<(), ServiceError>;

    async fn set_display_name(&self, session: &Session, name: &str) -> Result<(), ServiceError>;

    /// Reports the current session once right away, then every transition,
    /// until the returned [`Subscription`] is dropped.
    fn on_session_changed(&self, observer: Box<dyn Fn(Option<Session>)>) -> Subscription;
}

pub trait DocumentStore {
    async fn insert(&self, collection: &str, record: &NoteRecord) -> Result<RecordId, ServiceError>;

    /// All records of `collection` whose `field` equals `value`.
    async fn query_where(&self, collection: &str, field: &str, value: &str) -> Result<Vec<StoredNote>, ServiceError>;

    async fn delete_by_id(&self, collection: &str, id: &RecordId) -> Result<(), ServiceError>;
}

/// Fire-once deferred callbacks.
pub trait Timers {
    fn schedule(&self, delay: std::time::Duration, task: Box<dyn FnOnce()>);
}
