//! Span definitions per operation: generation, prediction, expiry sweep, reconciliation, scheduled job.

/// Create a full alert-generation span.
#[macro_export]
macro_rules! generation_span {
    ($medicine_count:expr) => {
        tracing::info_span!("meditrack.generation", medicine_count = $medicine_count)
    };
}

/// Create a demand-prediction span.
#[macro_export]
macro_rules! prediction_span {
    ($medicine_count:expr) => {
        tracing::info_span!("meditrack.prediction", medicine_count = $medicine_count)
    };
}

/// Create an expiry-sweep span.
#[macro_export]
macro_rules! expiry_sweep_span {
    ($window_days:expr) => {
        tracing::info_span!("meditrack.expiry_sweep", window_days = $window_days)
    };
}

/// Create a reconciliation span.
#[macro_export]
macro_rules! reconcile_span {
    ($strategy:expr, $drafts:expr) => {
        tracing::info_span!("meditrack.reconcile", strategy = %$strategy, drafts = $drafts)
    };
}

/// Create a scheduled-job span.
#[macro_export]
macro_rules! job_span {
    ($job:expr) => {
        tracing::info_span!("meditrack.job", job = %$job)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const GENERATION: &str = "meditrack.generation";
    pub const PREDICTION: &str = "meditrack.prediction";
    pub const EXPIRY_SWEEP: &str = "meditrack.expiry_sweep";
    pub const RECONCILE: &str = "meditrack.reconcile";
    pub const JOB: &str = "meditrack.job";
}
