//! In-process identity and document services.
//!
//! They follow the hosted services' contracts and error codes closely enough
//! to run the client offline and to drive the controller in tests.

use std::cell::RefCell;
use std::rc::Rc;

use crate::constants::{FIELD_CONTENT, FIELD_OWNER};
use crate::error::ServiceError;
use crate::identity_toolkit::auth_error;
use crate::observer::{SessionObservers, Subscription};
use crate::services::{DocumentStore, IdentityService};
use crate::types::{NoteRecord, RecordId, Session, StoredNote};

const MIN_PASSWORD_LEN: usize = 6;

fn valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

struct Account {
    session: Session,
    password: String,
    disabled: bool,
}

#[derive(Default)]
struct IdentityInner {
    accounts: Vec<Account>,
    current: Option<Session>,
    next_uid: u64,
    fail_next: Option<ServiceError>,
}

impl IdentityInner {
    fn take_failure(&mut self) -> Result<(), ServiceError> {
        match self.fail_next.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Replaces the current session; true if the signed-in uid changed.
    fn switch_to(&mut self, session: Option<Session>) -> bool {
        let changed = self.current.as_ref().map(|s| &s.uid) != session.as_ref().map(|s| &s.uid);
        self.current = session;
        changed
    }
}

#[derive(Clone, Default)]
pub struct MemoryIdentity {
    inner: Rc<RefCell<IdentityInner>>,
    observers: SessionObservers,
}

impl MemoryIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Session> {
        self.inner.borrow().current.clone()
    }

    /// Makes the next service call fail with `err`.
    pub fn fail_next(&self, err: ServiceError) {
        self.inner.borrow_mut().fail_next = Some(err);
    }

    pub fn disable(&self, email: &str) {
        if let Some(account) = self.inner.borrow_mut().accounts.iter_mut().find(|a| a.session.email == email) {
            account.disabled = true;
        }
    }

    fn announce(&self, changed: bool) {
        if changed {
            let current = self.current();
            log::info!("session changed: {:?}", current.as_ref().map(|s| &s.uid));
            self.observers.notify(current);
        }
    }
}

impl IdentityService for MemoryIdentity {
    async fn create_account(&self, email: &str, password: &str) -> Result<Session, ServiceError> {
        let (session, changed) = {
            let mut inner = self.inner.borrow_mut();
            inner.take_failure()?;
            if !valid_email(email) {
                return Err(auth_error("auth/invalid-email"));
            }
            if password.chars().count() < MIN_PASSWORD_LEN {
                return Err(auth_error("auth/weak-password"));
            }
            if inner.accounts.iter().any(|a| a.session.email.eq_ignore_ascii_case(email)) {
                return Err(auth_error("auth/email-already-in-use"));
            }
            inner.next_uid += 1;
            let session = Session::new(format!("uid-{}", inner.next_uid), email);
            inner.accounts.push(Account {
                session: session.clone(),
                password: password.to_string(),
                disabled: false,
            });
            let changed = inner.switch_to(Some(session.clone()));
            (session, changed)
        };
        self.announce(changed);
        Ok(session)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, ServiceError> {
        let (session, changed) = {
            let mut inner = self.inner.borrow_mut();
            inner.take_failure()?;
            if !valid_email(email) {
                return Err(auth_error("auth/invalid-email"));
            }
            let account = inner
                .accounts
                .iter()
                .find(|a| a.session.email.eq_ignore_ascii_case(email))
                .ok_or_else(|| auth_error("auth/user-not-found"))?;
            if account.disabled {
                return Err(auth_error("auth/user-disabled"));
            }
            if account.password != password {
                return Err(auth_error("auth/wrong-password"));
            }
            let session = account.session.clone();
            let changed = inner.switch_to(Some(session.clone()));
            (session, changed)
        };
        self.announce(changed);
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), ServiceError> {
        let changed = {
            let mut inner = self.inner.borrow_mut();
            inner.take_failure()?;
            inner.switch_to(None)
        };
        self.announce(changed);
        Ok(())
    }

    async fn set_display_name(&self, session: &Session, name: &str) -> Result<(), ServiceError> {
        let mut inner = self.inner.borrow_mut();
        inner.take_failure()?;
        let account = inner
            .accounts
            .iter_mut()
            .find(|a| a.session.uid == session.uid)
            .ok_or_else(|| auth_error("auth/user-not-found"))?;
        account.session.display_name = Some(name.to_string());
        if let Some(current) = inner.current.as_mut().filter(|c| c.uid == session.uid) {
            current.display_name = Some(name.to_string());
        }
        Ok(())
    }

    fn on_session_changed(&self, observer: Box<dyn Fn(Option<Session>)>) -> Subscription {
        self.observers.subscribe(self.current(), observer)
    }
}

#[derive(Default)]
struct StoreInner {
    next_id: u64,
    documents: Vec<(String, StoredNote)>,
    inserts: usize,
    fail_next: Option<ServiceError>,
}

impl StoreInner {
    fn take_failure(&mut self) -> Result<(), ServiceError> {
        match self.fail_next.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<StoreInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next store call fail with `err`.
    pub fn fail_next(&self, err: ServiceError) {
        self.inner.borrow_mut().fail_next = Some(err);
    }

    /// Number of insert calls that reached the store, failed ones included.
    pub fn insert_calls(&self) -> usize {
        self.inner.borrow().inserts
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn field_matches(record: &NoteRecord, field: &str, value: &str) -> bool {
    match field {
        f if f == FIELD_OWNER => record.owner_id == value,
        f if f == FIELD_CONTENT => record.content == value,
        _ => false,
    }
}

impl DocumentStore for MemoryStore {
    async fn insert(&self, collection: &str, record: &NoteRecord) -> Result<RecordId, ServiceError> {
        let mut inner = self.inner.borrow_mut();
        inner.inserts += 1;
        inner.take_failure()?;
        inner.next_id += 1;
        let id = RecordId::new(format!("doc-{:04}", inner.next_id));
        inner.documents.push((
            collection.to_string(),
            StoredNote {
                id: id.clone(),
                record: record.clone(),
            },
        ));
        Ok(id)
    }

    async fn query_where(&self, collection: &str, field: &str, value: &str) -> Result<Vec<StoredNote>, ServiceError> {
        let mut inner = self.inner.borrow_mut();
        inner.take_failure()?;
        Ok(inner
            .documents
            .iter()
            .filter(|(c, note)| c == collection && field_matches(&note.record, field, value))
            .map(|(_, note)| note.clone())
            .collect())
    }

    async fn delete_by_id(&self, collection: &str, id: &RecordId) -> Result<(), ServiceError> {
        let mut inner = self.inner.borrow_mut();
        inner.take_failure()?;
        // deleting a missing document is not an error
        inner.documents.retain(|(c, note)| !(c == collection && &note.id == id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::NOTES_COLLECTION;

    #[tokio::test]
    async fn create_account_validates() {
        let identity = MemoryIdentity::new();
        let code = |r: Result<Session, ServiceError>| r.unwrap_err().code().map(str::to_string);

        assert_eq!(code(identity.create_account("nope", "secret1").await).as_deref(), Some("auth/invalid-email"));
        assert_eq!(code(identity.create_account("a@x.com", "123").await).as_deref(), Some("auth/weak-password"));
        identity.create_account("a@x.com", "secret1").await.unwrap();
        assert_eq!(
            code(identity.create_account("A@x.com", "secret1").await).as_deref(),
            Some("auth/email-already-in-use")
        );
    }

    #[tokio::test]
    async fn sign_in_errors() {
        let identity = MemoryIdentity::new();
        identity.create_account("a@x.com", "secret1").await.unwrap();
        identity.sign_out().await.unwrap();

        let err = identity.sign_in("b@x.com", "secret1").await.unwrap_err();
        assert_eq!(err.code(), Some("auth/user-not-found"));
        let err = identity.sign_in("a@x.com", "wrong!").await.unwrap_err();
        assert_eq!(err.code(), Some("auth/wrong-password"));
        assert_eq!(err.to_string(), "Firebase: Error (auth/wrong-password).");

        identity.disable("a@x.com");
        let err = identity.sign_in("a@x.com", "secret1").await.unwrap_err();
        assert_eq!(err.code(), Some("auth/user-disabled"));
    }

    #[tokio::test]
    async fn observers_see_transitions() {
        let identity = MemoryIdentity::new();
        let seen = Rc::new(RefCell::new(vec![]));
        let _sub = identity.on_session_changed({
            let seen = seen.clone();
            Box::new(move |s: Option<Session>| seen.borrow_mut().push(s.is_some()))
        });
        identity.create_account("a@x.com", "secret1").await.unwrap();
        identity.sign_out().await.unwrap();
        identity.sign_out().await.unwrap();
        assert_eq!(*seen.borrow(), vec![false, true, false]);
    }

    #[tokio::test]
    async fn display_name_updates_current() {
        let identity = MemoryIdentity::new();
        let session = identity.create_account("a@x.com", "secret1").await.unwrap();
        identity.set_display_name(&session, "Ada").await.unwrap();
        assert_eq!(identity.current().and_then(|s| s.display_name).as_deref(), Some("Ada"));

        identity.sign_out().await.unwrap();
        let again = identity.sign_in("a@x.com", "secret1").await.unwrap();
        assert_eq!(again.display_name.as_deref(), Some("Ada"));
    }

    #[tokio::test]
    async fn store_filters_by_owner() {
        let store = MemoryStore::new();
        store.insert(NOTES_COLLECTION, &NoteRecord::new("u1", "one")).await.unwrap();
        store.insert(NOTES_COLLECTION, &NoteRecord::new("u2", "two")).await.unwrap();
        store.insert("other", &NoteRecord::new("u1", "elsewhere")).await.unwrap();

        let notes = store.query_where(NOTES_COLLECTION, FIELD_OWNER, "u1").await.unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].record.content, "one");
    }

    #[tokio::test]
    async fn store_delete_and_failure() {
        let store = MemoryStore::new();
        let id = store.insert(NOTES_COLLECTION, &NoteRecord::new("u1", "one")).await.unwrap();
        store.delete_by_id(NOTES_COLLECTION, &id).await.unwrap();
        store.delete_by_id(NOTES_COLLECTION, &id).await.unwrap();
        assert!(store.is_empty());

        store.fail_next(ServiceError::store("unavailable", "try later"));
        assert!(store.insert(NOTES_COLLECTION, &NoteRecord::new("u1", "x")).await.is_err());
        assert_eq!(store.insert_calls(), 2);
        assert!(store.is_empty());
    }
}
