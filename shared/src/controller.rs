//! The view controller: binds UI actions to identity and document service
//! calls and turns their outcomes into [`UiState`] updates.
//!
//! No operation returns an error. Local validation failures and service
//! failures both end up in one of the error banners; service failures are
//! also logged.

use std::cell::RefCell;
use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture};

use crate::constants::{
    FIELD_OWNER, NOTES_COLLECTION, PREFIX_DELETE, PREFIX_LOAD, PREFIX_SAVE, PREFIX_SIGN_OUT, SEED_NOTE,
};
use crate::error::ServiceError;
use crate::messages::{log_in_error_message, prefixed_message, sign_up_error_message};
use crate::observer::SessionEvents;
use crate::services::{DocumentStore, IdentityService, Timers};
use crate::state::UiState;
use crate::types::{NoteRecord, Page, Profile, RecordId, Session};
use crate::utils::validate_note;

pub struct Controller<I, D, T> {
    identity: I,
    store: D,
    timers: T,
    ui: UiState,
    session: RefCell<Option<Session>>,
    /// Display name set by a sign-up in this client, keyed by uid. A session
    /// notification raised before the name was set carries none.
    assigned_name: RefCell<Option<(String, String)>>,
}

impl<I, D, T> Controller<I, D, T>
where
    I: IdentityService,
    D: DocumentStore,
    T: Timers,
{
    pub fn new(identity: I, store: D, timers: T) -> Self {
        Self {
            identity,
            store,
            timers,
            ui: UiState::new(),
            session: RefCell::new(None),
            assigned_name: RefCell::new(None),
        }
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn identity(&self) -> &I {
        &self.identity
    }

    pub fn store(&self) -> &D {
        &self.store
    }

    pub fn timers(&self) -> &T {
        &self.timers
    }

    /// Session from the most recent notification.
    pub fn current_session(&self) -> Option<Session> {
        self.session.borrow().clone()
    }

    fn is_current(&self, uid: &str) -> bool {
        self.session.borrow().as_ref().is_some_and(|s| s.uid == uid)
    }

    /// Subscribes to session notifications; they queue until consumed.
    pub fn attach(&self) -> SessionEvents {
        SessionEvents::connect(|observer| self.identity.on_session_changed(observer))
    }

    /// Applies every session notification in order for as long as the
    /// identity service keeps the subscription open. Note renders run as
    /// separate tasks through `spawn`, so a slow query never holds back
    /// the next notification.
    pub async fn watch<S>(self: Rc<Self>, spawn: S)
    where
        S: Fn(LocalBoxFuture<'static, ()>),
        Self: 'static,
    {
        let mut events = self.attach();
        while let Some(session) = events.next().await {
            if let Some(uid) = self.apply_session(session) {
                let app = self.clone();
                spawn(async move { app.render_notes(&uid).await }.boxed_local());
            }
        }
        log::info!("session notifications closed");
    }

    pub async fn handle_session_change(&self, session: Option<Session>) {
        if let Some(uid) = self.apply_session(session) {
            self.render_notes(&uid).await;
        }
    }

    /// Updates page, profile and observed session; returns the uid whose
    /// notes should be rendered next.
    fn apply_session(&self, session: Option<Session>) -> Option<String> {
        match session {
            Some(mut session) => {
                {
                    // a name assigned to another account no longer applies
                    let mut assigned = self.assigned_name.borrow_mut();
                    if assigned.as_ref().is_some_and(|(uid, _)| *uid != session.uid) {
                        assigned.take();
                    }
                    if session.display_name.is_none() {
                        session.display_name = assigned.as_ref().map(|(_, name)| name.clone());
                    }
                }
                log::info!("signed in: {}", session.uid);
                let uid = session.uid.clone();
                self.ui.profile.set(Some(Profile::from(&session)));
                *self.session.borrow_mut() = Some(session);
                self.ui.show_page(Page::Dashboard);
                Some(uid)
            }
            None => {
                log::info!("signed out");
                self.session.borrow_mut().take();
                self.ui.profile.set(None);
                self.ui.show_page(Page::Login);
                self.ui.clear_notes();
                None
            }
        }
    }

    pub async fn sign_up(&self, name: &str, email: &str, password: &str) {
        self.ui.loading.set_neq(true);
        match self.register(name, email, password).await {
            Ok(session) => {
                self.ui.signup_form.reset();
                self.ui.loading.set_neq(false);
                // the notification for this account may already have been handled without the name
                if self.is_current(&session.uid) {
                    self.ui.profile.set(Some(Profile::from(&session)));
                    let uid = session.uid.clone();
                    *self.session.borrow_mut() = Some(session);
                    self.render_notes(&uid).await;
                }
            }
            Err(err) => {
                self.ui.loading.set_neq(false);
                log::error!("sign up failed: {err}");
                self.ui.signup_error.show(&sign_up_error_message(&err), &self.timers);
            }
        }
    }

    async fn register(&self, name: &str, email: &str, password: &str) -> Result<Session, ServiceError> {
        let session = self.identity.create_account(email, password).await?;
        self.identity.set_display_name(&session, name).await?;
        *self.assigned_name.borrow_mut() = Some((session.uid.clone(), name.to_string()));
        self.store
            .insert(NOTES_COLLECTION, &NoteRecord::new(session.uid.clone(), SEED_NOTE))
            .await?;
        Ok(session.with_display_name(name))
    }

    pub async fn log_in(&self, email: &str, password: &str) {
        self.ui.loading.set_neq(true);
        let result = self.identity.sign_in(email, password).await;
        self.ui.loading.set_neq(false);
        match result {
            Ok(session) => {
                log::info!("log in accepted: {}", session.uid);
                self.ui.login_form.reset();
            }
            Err(err) => {
                log::error!("log in failed: {err}");
                self.ui.login_error.show(&log_in_error_message(&err), &self.timers);
            }
        }
    }

    pub async fn log_out(&self) {
        if let Err(err) = self.identity.sign_out().await {
            log::error!("sign out failed: {err}");
            self.ui.dashboard_error.show(&prefixed_message(PREFIX_SIGN_OUT, &err), &self.timers);
        }
    }

    /// Stores `content` for `session`. A missing session or blank content is
    /// rejected locally without touching the store.
    pub async fn add_note(&self, session: Option<&Session>, content: &str) {
        let (session, content) = match validate_note(session, content) {
            Ok(valid) => valid,
            Err(rejected) => {
                self.ui.dashboard_error.show(&rejected.to_string(), &self.timers);
                return;
            }
        };
        let record = NoteRecord::new(session.uid.clone(), content);
        match self.store.insert(NOTES_COLLECTION, &record).await {
            Ok(id) => {
                log::info!("note saved: {id}");
                self.ui.note_input.set(String::new());
                self.render_notes(&session.uid).await;
            }
            Err(err) => {
                log::error!("saving note failed: {err}");
                self.ui.dashboard_error.show(&prefixed_message(PREFIX_SAVE, &err), &self.timers);
            }
        }
    }

    /// Form entry point: the current note input for the observed session.
    pub async fn submit_note(&self) {
        let session = self.current_session();
        let content = self.ui.note_input.get_cloned();
        self.add_note(session.as_ref(), &content).await;
    }

    pub async fn delete_note(&self, id: &RecordId) {
        match self.store.delete_by_id(NOTES_COLLECTION, id).await {
            Ok(()) => {
                if let Some(session) = self.current_session() {
                    self.render_notes(&session.uid).await;
                }
            }
            Err(err) => {
                log::error!("deleting note {id} failed: {err}");
                self.ui.dashboard_error.show(&prefixed_message(PREFIX_DELETE, &err), &self.timers);
            }
        }
    }

    /// Re-fetches the notes owned by `uid`. The result is dropped when the
    /// observed session changed while the query ran.
    pub async fn render_notes(&self, uid: &str) {
        match self.store.query_where(NOTES_COLLECTION, FIELD_OWNER, uid).await {
            Ok(notes) => {
                if self.is_current(uid) {
                    self.ui.set_notes(notes);
                } else {
                    log::info!("dropping notes of inactive session {uid}");
                }
            }
            Err(err) => {
                log::error!("loading notes failed: {err}");
                self.ui.dashboard_error.show(&prefixed_message(PREFIX_LOAD, &err), &self.timers);
            }
        }
    }

    pub fn show_signup(&self) {
        if self.session.borrow().is_none() {
            self.ui.show_page(Page::Signup);
            self.ui.signup_error.hide();
        }
    }

    pub fn show_login(&self) {
        if self.session.borrow().is_none() {
            self.ui.show_page(Page::Login);
            self.ui.login_error.hide();
        }
    }
}
