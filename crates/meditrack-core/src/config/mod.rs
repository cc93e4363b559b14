//! Engine configuration, loaded from TOML. Every section falls back to its defaults.

mod alert_config;
pub mod defaults;
mod forecast_config;
mod observability_config;
mod scheduler_config;
mod storage_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use alert_config::AlertConfig;
pub use forecast_config::{ClimateRiskTable, ForecastConfig, RiskTablesConfig, SeasonRiskTable};
pub use observability_config::ObservabilityConfig;
pub use scheduler_config::SchedulerConfig;
pub use storage_config::StorageConfig;

use crate::errors::{ConfigError, MediTrackResult};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MediTrackConfig {
    pub storage: StorageConfig,
    pub forecast: ForecastConfig,
    pub alerts: AlertConfig,
    pub scheduler: SchedulerConfig,
    pub observability: ObservabilityConfig,
}

impl MediTrackConfig {
    /// Parse from a TOML string. Missing sections and keys take their defaults.
    pub fn from_toml(input: &str) -> MediTrackResult<Self> {
        let config: Self = toml::from_str(input).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn load(path: &Path) -> MediTrackResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&raw)
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> MediTrackResult<()> {
        let positive = [
            ("forecast.category_boost", self.forecast.category_boost),
            ("forecast.reason_threshold", self.forecast.reason_threshold),
            ("alerts.demand_alert_threshold", self.alerts.demand_alert_threshold),
            ("alerts.well_stocked_factor", self.alerts.well_stocked_factor),
        ];
        for (key, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(key, format!("must be a positive number, got {value}")));
            }
        }
        if !(0..=defaults::MAX_EXPIRY_WINDOW_DAYS).contains(&self.alerts.expiry_window_days) {
            return Err(invalid(
                "alerts.expiry_window_days",
                format!(
                    "must be between 0 and {}, got {}",
                    defaults::MAX_EXPIRY_WINDOW_DAYS,
                    self.alerts.expiry_window_days
                ),
            ));
        }
        if self.alerts.synthesis_timeout_secs == 0 {
            return Err(invalid("alerts.synthesis_timeout_secs", "must be at least 1".into()));
        }
        Ok(())
    }
}

fn invalid(key: &str, reason: String) -> crate::errors::MediTrackError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        reason,
    }
    .into()
}
