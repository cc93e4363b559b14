/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse config: {reason}")]
    Parse { reason: String },

    #[error("failed to read config file {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("invalid cadence expression {expression:?}: {reason}")]
    InvalidCadence { expression: String, reason: String },

    #[error("invalid config value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}
