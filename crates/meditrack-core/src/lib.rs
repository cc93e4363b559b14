//! # meditrack-core
//!
//! Foundation crate for the MediTrack inventory engine.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::MediTrackConfig;
pub use errors::{MediTrackError, MediTrackResult};
pub use models::{
    Alert, AlertDraft, AlertStatus, AlertType, Climate, Conditions, DemandFactors, Medicine,
    Season, Severity,
};
