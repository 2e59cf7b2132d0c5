use futures_signals::signal::Mutable;
use futures_signals::signal_vec::MutableVec;

use crate::banner::Banner;
use crate::types::{Page, Profile, StoredNote};

#[derive(Debug, Default)]
pub struct LoginForm {
    pub email: Mutable<String>,
    pub password: Mutable<String>,
}

impl LoginForm {
    pub fn reset(&self) {
        self.email.set(String::new());
        self.password.set(String::new());
    }
}

#[derive(Debug, Default)]
pub struct SignupForm {
    pub name: Mutable<String>,
    pub email: Mutable<String>,
    pub password: Mutable<String>,
}

impl SignupForm {
    pub fn reset(&self) {
        self.name.set(String::new());
        self.email.set(String::new());
        self.password.set(String::new());
    }
}

/// What the note list area shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteListView {
    /// Nothing loaded: signed out, or the first query is still running.
    Hidden,
    /// A single "no data" item without delete controls.
    Placeholder,
    Items(Vec<StoredNote>),
}

impl NoteListView {
    pub fn from_parts(loaded: bool, notes: &[StoredNote]) -> Self {
        match (loaded, notes.is_empty()) {
            (false, _) => Self::Hidden,
            (true, true) => Self::Placeholder,
            (true, false) => Self::Items(notes.to_vec()),
        }
    }

    pub fn delete_controls(&self) -> usize {
        match self {
            Self::Items(notes) => notes.len(),
            Self::Hidden | Self::Placeholder => 0,
        }
    }
}

/// Everything the views render, owned by the controller.
#[derive(Default)]
pub struct UiState {
    /// `None` until the first session notification arrives.
    pub page: Mutable<Option<Page>>,
    pub loading: Mutable<bool>,
    pub login_error: Banner,
    pub signup_error: Banner,
    pub dashboard_error: Banner,
    pub profile: Mutable<Option<Profile>>,
    pub notes: MutableVec<StoredNote>,
    /// Set once a query result is on screen; an empty loaded list shows a placeholder.
    pub notes_loaded: Mutable<bool>,
    pub login_form: LoginForm,
    pub signup_form: SignupForm,
    pub note_input: Mutable<String>,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show_page(&self, page: Page) {
        self.page.set_neq(Some(page));
    }

    pub fn set_notes(&self, notes: Vec<StoredNote>) {
        self.notes.lock_mut().replace_cloned(notes);
        self.notes_loaded.set_neq(true);
    }

    pub fn clear_notes(&self) {
        self.notes.lock_mut().clear();
        self.notes_loaded.set_neq(false);
    }

    pub fn list_view(&self) -> NoteListView {
        NoteListView::from_parts(self.notes_loaded.get(), &self.notes.lock_ref())
    }

    pub fn note_contents(&self) -> Vec<String> {
        self.notes.lock_ref().iter().map(|n| n.record.content.clone()).collect()
    }
}
