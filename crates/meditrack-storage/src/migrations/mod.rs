//! Versioned schema migrations, recorded in `schema_version`.
//!
//! Each migration runs in its own transaction; a failure rolls that version back
//! and stops, leaving earlier versions applied.

mod v001_medicines;
mod v002_alerts;

use rusqlite::{params, Connection, OptionalExtension};

use meditrack_core::errors::{MediTrackResult, StorageError};

use crate::to_storage_err;

type Migration = fn(&Connection) -> MediTrackResult<()>;

const MIGRATIONS: &[(u32, &str, Migration)] = &[
    (1, "medicines", v001_medicines::migrate),
    (2, "alerts", v002_alerts::migrate),
];

/// Highest schema version this build knows about.
pub const LATEST_VERSION: u32 = 2;

/// Version recorded in the database, 0 for a fresh file.
pub fn current_version(conn: &Connection) -> MediTrackResult<u32> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version     INTEGER PRIMARY KEY,
            name        TEXT NOT NULL,
            applied_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    let version: Option<u32> = conn
        .query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?
        .flatten();
    Ok(version.unwrap_or(0))
}

/// Apply every migration newer than the recorded version. Returns how many ran.
pub fn run_migrations(conn: &Connection) -> MediTrackResult<usize> {
    let current = current_version(conn)?;
    let mut applied = 0;

    for &(version, name, migrate) in MIGRATIONS.iter().filter(|(v, _, _)| *v > current) {
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| to_storage_err(format!("migration {version} begin: {e}")))?;

        let result = migrate(&tx).and_then(|()| {
            tx.execute(
                "INSERT INTO schema_version (version, name) VALUES (?1, ?2)",
                params![version, name],
            )
            .map(|_| ())
            .map_err(|e| to_storage_err(e.to_string()))
        });

        match result {
            Ok(()) => {
                tx.commit()
                    .map_err(|e| to_storage_err(format!("migration {version} commit: {e}")))?;
                tracing::info!(version, name, "applied migration");
                applied += 1;
            }
            Err(e) => {
                let _ = tx.rollback();
                return Err(StorageError::MigrationFailed {
                    version,
                    reason: e.to_string(),
                }
                .into());
            }
        }
    }
    Ok(applied)
}
