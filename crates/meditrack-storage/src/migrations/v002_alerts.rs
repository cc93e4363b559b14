//! v002: alerts. Synthesized alerts and their lifecycle.

use rusqlite::Connection;

use meditrack_core::errors::MediTrackResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> MediTrackResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS alerts (
            id           TEXT PRIMARY KEY,
            medicine_id  TEXT NOT NULL,
            alert_type   TEXT NOT NULL,
            message      TEXT NOT NULL,
            severity     TEXT NOT NULL DEFAULT 'medium',
            status       TEXT NOT NULL DEFAULT 'new',
            resolved_by  TEXT,
            resolved_at  TEXT,
            created_at   TEXT NOT NULL,
            updated_at   TEXT NOT NULL,
            FOREIGN KEY (medicine_id) REFERENCES medicines(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_alerts_status ON alerts(status);
        CREATE INDEX IF NOT EXISTS idx_alerts_medicine_type ON alerts(medicine_id, alert_type, status);
        CREATE INDEX IF NOT EXISTS idx_alerts_created ON alerts(created_at);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
