//! Storage Layer - SQLite-backed persistence
//!
//! System of record is a single SQLite table:
//! - contacts(id, first_name, last_name, category, phone_number, email, address)
//!
//! The `(first_name, last_name)` pair is unique; `id` never leaves this module.

pub mod schema;
pub mod sqlite;

pub use sqlite::ContactStore;
