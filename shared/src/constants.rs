use std::time::Duration;

pub const NOTES_COLLECTION: &str = "userData";

pub static FIELD_OWNER: &'static str = "userId";
pub static FIELD_CONTENT: &'static str = "content";
pub static FIELD_CREATED: &'static str = "timestamp";

pub const SEED_NOTE: &str = "Welcome! Your first data entry.";
pub const EMPTY_LIST_PLACEHOLDER: &str = "No data saved yet";

pub const DEFAULT_DISPLAY_NAME: &str = "User";
pub const DEFAULT_INITIAL: &str = "U";

pub const BANNER_HIDE_DELAY: Duration = Duration::from_secs(5);

pub static MSG_GENERIC: &'static str = "An error occurred";
pub static MSG_NO_SESSION: &'static str = "You must be logged in to save data";
pub static MSG_EMPTY_NOTE: &'static str = "Please enter some data";

pub static PREFIX_LOAD: &'static str = "Error loading data: ";
pub static PREFIX_SAVE: &'static str = "Error saving data: ";
pub static PREFIX_DELETE: &'static str = "Error deleting data: ";
pub static PREFIX_SIGN_OUT: &'static str = "Error signing out: ";

pub static STORAGE_REFRESH_TOKEN: &'static str = "notes.refreshToken";

pub static IDENTITY_ENDPOINT: &'static str = "https://identitytoolkit.googleapis.com/v1";
pub static TOKEN_ENDPOINT: &'static str = "https://securetoken.googleapis.com/v1/token";
pub static FIRESTORE_ENDPOINT: &'static str = "https://firestore.googleapis.com/v1";

/// Seconds of remaining lifetime below which an ID token is refreshed before use.
pub const TOKEN_REFRESH_MARGIN_SECS: i64 = 60;
