//! In-memory store shared by the alert integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use meditrack_core::errors::{MediTrackError, MediTrackResult, StorageError};
use meditrack_core::models::{
    Alert, AlertDraft, AlertFilter, AlertStatus, AlertType, Medicine, Severity,
};
use meditrack_core::traits::{IAlertStore, IMedicineStore};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct Catalog {
    pub now: DateTime<Utc>,
    pub medicines: Vec<Medicine>,
}

pub fn winter_catalog() -> Catalog {
    test_fixtures::load_fixture("medicines/winter_catalog.json")
}

pub fn summer_catalog() -> Catalog {
    test_fixtures::load_fixture("medicines/summer_catalog.json")
}

#[derive(Default)]
pub struct MemoryStore {
    medicines: Mutex<Vec<Medicine>>,
    alerts: Mutex<Vec<Alert>>,
    pub fail_reads: AtomicBool,
    pub fail_writes: AtomicBool,
    /// Delay applied to `find_all_medicines`, in milliseconds.
    pub read_delay_ms: AtomicU64,
}

fn fault(op: &str) -> MediTrackError {
    StorageError::SqliteError {
        message: format!("{op}: disk I/O error"),
    }
    .into()
}

impl MemoryStore {
    pub fn with_medicines(medicines: Vec<Medicine>) -> Self {
        let store = Self::default();
        *store.medicines.lock().unwrap() = medicines;
        store
    }

    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn unresolved(&self) -> Vec<Alert> {
        self.alerts().into_iter().filter(Alert::is_unresolved).collect()
    }

    pub fn push_alert(&self, alert: Alert) {
        self.alerts.lock().unwrap().push(alert);
    }

    fn check_read(&self, op: &str) -> MediTrackResult<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(fault(op));
        }
        Ok(())
    }

    fn check_write(&self, op: &str) -> MediTrackResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(fault(op));
        }
        Ok(())
    }
}

#[async_trait]
impl IMedicineStore for MemoryStore {
    async fn find_all_medicines(&self) -> MediTrackResult<Vec<Medicine>> {
        let delay = self.read_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        self.check_read("find_all_medicines")?;
        Ok(self.medicines.lock().unwrap().clone())
    }

    async fn find_medicine(&self, id: &str) -> MediTrackResult<Option<Medicine>> {
        self.check_read("find_medicine")?;
        Ok(self.medicines.lock().unwrap().iter().find(|m| m.id == id).cloned())
    }

    async fn find_expiring(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> MediTrackResult<Vec<Medicine>> {
        self.check_read("find_expiring")?;
        Ok(self
            .medicines
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.expiry_date.is_some_and(|e| e >= from && e <= to))
            .cloned()
            .collect())
    }

    async fn upsert_medicine(&self, medicine: &Medicine) -> MediTrackResult<()> {
        self.check_write("upsert_medicine")?;
        let mut meds = self.medicines.lock().unwrap();
        match meds.iter_mut().find(|m| m.id == medicine.id) {
            Some(existing) => *existing = medicine.clone(),
            None => meds.push(medicine.clone()),
        }
        Ok(())
    }

    async fn update_stock(&self, id: &str, current_stock: u32) -> MediTrackResult<Medicine> {
        self.check_write("update_stock")?;
        let mut meds = self.medicines.lock().unwrap();
        let m = meds
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| MediTrackError::MedicineNotFound { id: id.to_string() })?;
        m.current_stock = current_stock;
        Ok(m.clone())
    }
}

#[async_trait]
impl IAlertStore for MemoryStore {
    async fn find_alert(
        &self,
        medicine_id: &str,
        alert_type: AlertType,
        statuses: &[AlertStatus],
    ) -> MediTrackResult<Option<Alert>> {
        self.check_read("find_alert")?;
        Ok(self
            .alerts
            .lock()
            .unwrap()
            .iter()
            .find(|a| {
                a.medicine_id == medicine_id
                    && a.alert_type == alert_type
                    && statuses.contains(&a.status)
            })
            .cloned())
    }

    async fn get_alert(&self, id: &str) -> MediTrackResult<Option<Alert>> {
        self.check_read("get_alert")?;
        Ok(self.alerts.lock().unwrap().iter().find(|a| a.id == id).cloned())
    }

    async fn delete_alerts(&self, statuses: &[AlertStatus]) -> MediTrackResult<usize> {
        self.check_write("delete_alerts")?;
        let mut alerts = self.alerts.lock().unwrap();
        let before = alerts.len();
        alerts.retain(|a| !statuses.contains(&a.status));
        Ok(before - alerts.len())
    }

    async fn insert_alerts(
        &self,
        drafts: &[AlertDraft],
        now: DateTime<Utc>,
    ) -> MediTrackResult<Vec<Alert>> {
        self.check_write("insert_alerts")?;
        let inserted: Vec<Alert> = drafts.iter().cloned().map(|d| d.into_alert(now)).collect();
        self.alerts.lock().unwrap().extend(inserted.iter().cloned());
        Ok(inserted)
    }

    async fn save_alert(&self, alert: &Alert) -> MediTrackResult<Alert> {
        self.check_write("save_alert")?;
        let mut alerts = self.alerts.lock().unwrap();
        let slot = alerts
            .iter_mut()
            .find(|a| a.id == alert.id)
            .ok_or_else(|| MediTrackError::AlertNotFound {
                id: alert.id.clone(),
            })?;
        *slot = alert.clone();
        Ok(alert.clone())
    }

    async fn list_alerts(&self, filter: &AlertFilter) -> MediTrackResult<Vec<Alert>> {
        self.check_read("list_alerts")?;
        let mut out: Vec<Alert> = self
            .alerts
            .lock()
            .unwrap()
            .iter()
            .filter(|a| filter.matches(a))
            .cloned()
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        if let Some(limit) = filter.limit {
            out.truncate(limit);
        }
        Ok(out)
    }

    async fn count_alerts(
        &self,
        statuses: &[AlertStatus],
        severity: Option<Severity>,
        alert_type: Option<AlertType>,
    ) -> MediTrackResult<usize> {
        self.check_read("count_alerts")?;
        Ok(self
            .alerts
            .lock()
            .unwrap()
            .iter()
            .filter(|a| statuses.is_empty() || statuses.contains(&a.status))
            .filter(|a| severity.map_or(true, |s| s == a.severity))
            .filter(|a| alert_type.map_or(true, |t| t == a.alert_type))
            .count())
    }
}
