use crate::models::AlertStatus;

/// Alert lifecycle and synthesis errors.
#[derive(Debug, thiserror::Error)]
pub enum AlertError {
    #[error("alert {id} cannot move from {from} to {to}")]
    InvalidTransition {
        id: String,
        from: AlertStatus,
        to: AlertStatus,
    },

    #[error("resolving alert {id} requires an acting user")]
    MissingResolver { id: String },

    #[error("alert synthesis exceeded {timeout_secs}s")]
    SynthesisTimeout { timeout_secs: u64 },
}
