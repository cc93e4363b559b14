use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::MediTrackResult;
use crate::models::Medicine;

/// Read access to the inventory, plus the few writes seeding and transactions need.
#[async_trait]
pub trait IMedicineStore: Send + Sync {
    /// Every medicine, in stable insertion order.
    async fn find_all_medicines(&self) -> MediTrackResult<Vec<Medicine>>;

    async fn find_medicine(&self, id: &str) -> MediTrackResult<Option<Medicine>>;

    /// Medicines whose expiry date falls within `[from, to]`.
    async fn find_expiring(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> MediTrackResult<Vec<Medicine>>;

    /// Insert or replace a medicine by id.
    async fn upsert_medicine(&self, medicine: &Medicine) -> MediTrackResult<()>;

    /// Set the stock level after a transaction. Returns the updated medicine.
    async fn update_stock(&self, id: &str, current_stock: u32) -> MediTrackResult<Medicine>;
}
