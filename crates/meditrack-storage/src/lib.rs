//! # meditrack-storage
//!
//! SQLite persistence for the inventory and alert stores. One write connection
//! behind an async mutex, WAL pragmas, and versioned migrations applied on open.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::StorageEngine;

use meditrack_core::errors::{MediTrackError, StorageError};

/// Helper to convert a SQLite/IO error message into a MediTrackError.
pub fn to_storage_err(msg: impl Into<String>) -> MediTrackError {
    MediTrackError::Storage(StorageError::SqliteError {
        message: msg.into(),
    })
}
