//! Single write connection behind `tokio::sync::Mutex`.
//! Writes are serialized through the lock.

use std::path::Path;

use rusqlite::Connection;
use tokio::sync::Mutex;

use meditrack_core::errors::MediTrackResult;

use super::pragmas::apply_pragmas;
use crate::migrations;
use crate::to_storage_err;

/// A single write connection protected by an async mutex.
pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    /// Open a connection to the given database path, apply pragmas, and migrate
    /// before the connection is shared.
    pub fn open(path: &Path, busy_timeout_ms: u32) -> MediTrackResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        Self::prepare(conn, busy_timeout_ms)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> MediTrackResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        Self::prepare(conn, 0)
    }

    fn prepare(conn: Connection, busy_timeout_ms: u32) -> MediTrackResult<Self> {
        apply_pragmas(&conn, busy_timeout_ms)?;
        migrations::run_migrations(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Acquire the write lock and execute a closure with the connection.
    pub async fn with_conn<F, T>(&self, f: F) -> MediTrackResult<T>
    where
        F: FnOnce(&Connection) -> MediTrackResult<T>,
    {
        let guard = self.conn.lock().await;
        f(&guard)
    }
}
