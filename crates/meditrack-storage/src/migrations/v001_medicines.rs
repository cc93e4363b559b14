//! v001: medicines. The inventory the engine reads.

use rusqlite::Connection;

use meditrack_core::errors::MediTrackResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> MediTrackResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS medicines (
            id               TEXT PRIMARY KEY,
            name             TEXT NOT NULL UNIQUE,
            category         TEXT NOT NULL,
            current_stock    INTEGER NOT NULL CHECK (current_stock >= 0),
            min_stock_level  INTEGER NOT NULL DEFAULT 10 CHECK (min_stock_level >= 0),
            unit_price       REAL NOT NULL DEFAULT 0 CHECK (unit_price >= 0),
            expiry_date      TEXT,
            manufacturer     TEXT,
            demand_factors   TEXT NOT NULL DEFAULT '{}',
            created_at       TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            updated_at       TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE INDEX IF NOT EXISTS idx_medicines_category ON medicines(category);
        CREATE INDEX IF NOT EXISTS idx_medicines_expiry ON medicines(expiry_date);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
