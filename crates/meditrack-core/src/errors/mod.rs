//! Error handling for MediTrack.
//! One error enum per subsystem, `thiserror` only, rolled up into [`MediTrackError`].

mod alert_error;
mod config_error;
mod storage_error;

pub use alert_error::AlertError;
pub use config_error::ConfigError;
pub use storage_error::StorageError;

/// Top-level error for every fallible engine operation.
#[derive(Debug, thiserror::Error)]
pub enum MediTrackError {
    #[error("medicine not found: {id}")]
    MedicineNotFound { id: String },

    #[error("alert not found: {id}")]
    AlertNotFound { id: String },

    #[error("invalid {field} value: {value}")]
    InvalidValue { field: String, value: String },

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("alert error: {0}")]
    Alert(#[from] AlertError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MediTrackError {
    /// Shorthand for a value that failed to parse into one of the closed enums.
    pub fn invalid_value(field: &str, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            value: value.into(),
        }
    }
}

pub type MediTrackResult<T> = Result<T, MediTrackError>;
