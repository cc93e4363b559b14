//! StorageEngine: owns the write connection and implements the store traits.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use meditrack_core::config::StorageConfig;
use meditrack_core::errors::{MediTrackError, MediTrackResult};
use meditrack_core::models::{
    Alert, AlertDraft, AlertFilter, AlertStatus, AlertType, Medicine, Severity,
};
use meditrack_core::traits::{IAlertStore, IMedicineStore};

use crate::migrations;
use crate::pool::pragmas::{foreign_keys_enabled, verify_wal_mode};
use crate::pool::WriteConnection;
use crate::queries::{alert_ops, medicine_ops};

/// SQLite-backed inventory and alert store.
pub struct StorageEngine {
    writer: WriteConnection,
    db_path: Option<PathBuf>,
}

impl StorageEngine {
    /// Open (or create) a database file with the default busy timeout.
    pub fn open(path: &Path) -> MediTrackResult<Self> {
        Self::open_with_config(&StorageConfig {
            db_path: path.to_string_lossy().into_owned(),
            ..StorageConfig::default()
        })
    }

    pub fn open_with_config(config: &StorageConfig) -> MediTrackResult<Self> {
        let path = PathBuf::from(&config.db_path);
        let writer = WriteConnection::open(&path, config.busy_timeout_ms)?;
        tracing::debug!(path = %path.display(), "storage opened");
        Ok(Self {
            writer,
            db_path: Some(path),
        })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> MediTrackResult<Self> {
        Ok(Self {
            writer: WriteConnection::open_in_memory()?,
            db_path: None,
        })
    }

    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    /// `(wal, foreign_keys)` as reported by the live connection.
    pub async fn pragma_status(&self) -> MediTrackResult<(bool, bool)> {
        self.writer
            .with_conn(|conn| Ok((verify_wal_mode(conn)?, foreign_keys_enabled(conn)?)))
            .await
    }

    pub async fn schema_version(&self) -> MediTrackResult<u32> {
        self.writer.with_conn(migrations::current_version).await
    }

    /// Upsert a catalog in one transaction.
    pub async fn seed(&self, medicines: &[Medicine]) -> MediTrackResult<usize> {
        self.writer
            .with_conn(|conn| medicine_ops::bulk_upsert(conn, medicines))
            .await
    }

    pub async fn medicine_count(&self) -> MediTrackResult<usize> {
        self.writer.with_conn(medicine_ops::count_medicines).await
    }
}

#[async_trait]
impl IMedicineStore for StorageEngine {
    async fn find_all_medicines(&self) -> MediTrackResult<Vec<Medicine>> {
        self.writer.with_conn(medicine_ops::all_medicines).await
    }

    async fn find_medicine(&self, id: &str) -> MediTrackResult<Option<Medicine>> {
        self.writer
            .with_conn(|conn| medicine_ops::get_medicine(conn, id))
            .await
    }

    async fn find_expiring(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> MediTrackResult<Vec<Medicine>> {
        self.writer
            .with_conn(|conn| medicine_ops::expiring_between(conn, from, to))
            .await
    }

    async fn upsert_medicine(&self, medicine: &Medicine) -> MediTrackResult<()> {
        self.writer
            .with_conn(|conn| medicine_ops::upsert_medicine(conn, medicine))
            .await
    }

    async fn update_stock(&self, id: &str, current_stock: u32) -> MediTrackResult<Medicine> {
        self.writer
            .with_conn(|conn| medicine_ops::update_stock(conn, id, current_stock))
            .await
    }
}

#[async_trait]
impl IAlertStore for StorageEngine {
    async fn find_alert(
        &self,
        medicine_id: &str,
        alert_type: AlertType,
        statuses: &[AlertStatus],
    ) -> MediTrackResult<Option<Alert>> {
        self.writer
            .with_conn(|conn| alert_ops::find_alert(conn, medicine_id, alert_type, statuses))
            .await
    }

    async fn get_alert(&self, id: &str) -> MediTrackResult<Option<Alert>> {
        self.writer
            .with_conn(|conn| alert_ops::get_alert(conn, id))
            .await
    }

    async fn delete_alerts(&self, statuses: &[AlertStatus]) -> MediTrackResult<usize> {
        self.writer
            .with_conn(|conn| alert_ops::delete_by_status(conn, statuses))
            .await
    }

    async fn insert_alerts(
        &self,
        drafts: &[AlertDraft],
        now: DateTime<Utc>,
    ) -> MediTrackResult<Vec<Alert>> {
        self.writer
            .with_conn(|conn| alert_ops::insert_alerts(conn, drafts, now))
            .await
    }

    async fn save_alert(&self, alert: &Alert) -> MediTrackResult<Alert> {
        self.writer
            .with_conn(|conn| {
                alert_ops::save_alert(conn, alert)?.ok_or_else(|| MediTrackError::AlertNotFound {
                    id: alert.id.clone(),
                })
            })
            .await
    }

    async fn list_alerts(&self, filter: &AlertFilter) -> MediTrackResult<Vec<Alert>> {
        self.writer
            .with_conn(|conn| alert_ops::list_alerts(conn, filter))
            .await
    }

    async fn count_alerts(
        &self,
        statuses: &[AlertStatus],
        severity: Option<Severity>,
        alert_type: Option<AlertType>,
    ) -> MediTrackResult<usize> {
        self.writer
            .with_conn(|conn| alert_ops::count_alerts(conn, statuses, severity, alert_type))
            .await
    }

    async fn replace_unresolved(
        &self,
        drafts: &[AlertDraft],
        now: DateTime<Utc>,
    ) -> MediTrackResult<(usize, Vec<Alert>)> {
        self.writer
            .with_conn(|conn| alert_ops::replace_unresolved(conn, drafts, now))
            .await
    }
}
