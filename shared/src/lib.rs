//! Platform-independent half of the notes client: data model, view controller,
//! UI state, service contracts and the wire formats of the hosted backend.

pub mod banner;
pub mod config;
pub mod constants;
pub mod controller;
pub mod error;
pub mod firestore;
pub mod identity_toolkit;
pub mod memory;
pub mod messages;
pub mod observer;
pub mod services;
pub mod state;
pub mod types;
pub mod utils;

#[cfg(test)]
pub(crate) mod testing;
