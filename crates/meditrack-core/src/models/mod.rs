//! Domain models read and written by the engine.

mod alert;
mod conditions;
mod medicine;
mod prediction;
mod report;
mod summary;

pub use alert::{Alert, AlertDraft, AlertFilter, AlertStatus, AlertType, Severity};
pub use conditions::{Climate, Conditions, Season};
pub use medicine::{ClimateFactors, DemandFactors, Medicine, SeasonalTrend};
pub use prediction::DemandPrediction;
pub use report::{GenerationReport, ReconcileOutcome};
pub use summary::{AlertSummary, SeverityCounts, StatusCounts};
