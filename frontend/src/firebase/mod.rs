//! REST clients for the hosted identity and document services.

mod auth;
mod firestore;

pub use auth::FirebaseIdentity;
pub use firestore::FirestoreStore;
