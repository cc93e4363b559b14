//! Store interfaces the engine consumes. Persistence engines implement these.

mod alert_store;
mod medicine_store;

pub use alert_store::IAlertStore;
pub use medicine_store::IMedicineStore;
