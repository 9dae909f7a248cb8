//! Portico Storage Layer
//!
//! SQLite-based persistence for theme state: a small preferences
//! key/value table plus expiring flags (the server-side stand-in for
//! what the legacy theme kept in cookies).

mod database;
mod error;
mod migrations;

pub use database::Database;
pub use error::StorageError;

pub type Result<T> = std::result::Result<T, StorageError>;
