//! # Rolodex - Contacts Directory Service
//!
//! CRUD over a collection of contacts, persisted in SQLite and served as
//! HTTP/JSON.
//!
//! Rolodex provides:
//! - A [`Contact`] record unique by its `(first_name, last_name)` pair
//! - SQLite-backed storage with a startup schema bootstrap (including the
//!   one-time upgrade from the legacy single `name` column)
//! - An [`AddressBook`] façade that logs every operation outcome
//! - An axum router exposing `/contacts`

pub mod contact;
pub mod storage;
pub mod book;
pub mod server;
pub mod config;
pub mod ui;

// Re-exports for convenient access
pub use contact::{Contact, ContactPayload};
pub use storage::ContactStore;
pub use book::AddressBook;

/// Result type alias for Rolodex operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Rolodex operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Contact with name {first_name} {last_name} already exists")]
    AlreadyExists { first_name: String, last_name: String },

    #[error("Contact {first_name} {last_name} not found")]
    NotFound { first_name: String, last_name: String },

    #[error("Invalid contact: {0}")]
    InvalidContact(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unrecognized contacts table shape: columns {0:?}")]
    UnsupportedSchema(Vec<String>),

    #[error("Background task failed: {0}")]
    Task(String),
}

impl Error {
    pub fn already_exists(first_name: &str, last_name: &str) -> Self {
        Error::AlreadyExists {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        }
    }

    pub fn not_found(first_name: &str, last_name: &str) -> Self {
        Error::NotFound {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        }
    }
}
