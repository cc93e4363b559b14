use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::MediTrackResult;
use crate::models::{Alert, AlertDraft, AlertFilter, AlertStatus, AlertType, Severity};

/// Alert persistence: existence checks, bulk clear/insert, single-record saves, listing.
#[async_trait]
pub trait IAlertStore: Send + Sync {
    /// Any alert for `(medicine_id, alert_type)` whose status is in `statuses`.
    async fn find_alert(
        &self,
        medicine_id: &str,
        alert_type: AlertType,
        statuses: &[AlertStatus],
    ) -> MediTrackResult<Option<Alert>>;

    async fn get_alert(&self, id: &str) -> MediTrackResult<Option<Alert>>;

    /// Delete every alert whose status is in `statuses`. Returns the number removed.
    async fn delete_alerts(&self, statuses: &[AlertStatus]) -> MediTrackResult<usize>;

    /// Persist a batch of drafts as `new` alerts stamped with `now`.
    async fn insert_alerts(
        &self,
        drafts: &[AlertDraft],
        now: DateTime<Utc>,
    ) -> MediTrackResult<Vec<Alert>>;

    /// Overwrite a stored alert (status changes). Returns the saved record.
    async fn save_alert(&self, alert: &Alert) -> MediTrackResult<Alert>;

    /// Alerts matching `filter`, newest first.
    async fn list_alerts(&self, filter: &AlertFilter) -> MediTrackResult<Vec<Alert>>;

    async fn count_alerts(
        &self,
        statuses: &[AlertStatus],
        severity: Option<Severity>,
        alert_type: Option<AlertType>,
    ) -> MediTrackResult<usize>;

    /// Clear all unresolved alerts and insert `drafts`. Returns `(deleted, inserted)`.
    ///
    /// The default runs the two steps back to back; stores that can should override
    /// it with a single transaction.
    async fn replace_unresolved(
        &self,
        drafts: &[AlertDraft],
        now: DateTime<Utc>,
    ) -> MediTrackResult<(usize, Vec<Alert>)> {
        let deleted = self.delete_alerts(&AlertStatus::UNRESOLVED).await?;
        let inserted = self.insert_alerts(drafts, now).await?;
        Ok((deleted, inserted))
    }
}
