use serde::{Deserialize, Serialize};

use super::defaults;

/// Alert synthesis configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    /// Medicines expiring within this many days raise an expiry alert.
    pub expiry_window_days: i64,
    /// Below this many days to expiry, on-demand and 6-hourly runs mark expiry alerts high.
    pub expiry_high_severity_days: i64,
    /// Below this many days to expiry, the daily sweep marks expiry alerts high.
    pub sweep_high_severity_days: i64,
    /// Demand multiplier above which the demand pass considers a medicine.
    pub demand_alert_threshold: f64,
    /// A substitute must hold more than this multiple of its minimum stock.
    pub well_stocked_factor: f64,
    /// Maximum substitutes named in one recommendation.
    pub max_alternatives: usize,
    /// Upper bound on one full synthesis + reconciliation run.
    pub synthesis_timeout_secs: u64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            expiry_window_days: defaults::DEFAULT_EXPIRY_WINDOW_DAYS,
            expiry_high_severity_days: defaults::DEFAULT_EXPIRY_HIGH_SEVERITY_DAYS,
            sweep_high_severity_days: defaults::DEFAULT_SWEEP_HIGH_SEVERITY_DAYS,
            demand_alert_threshold: defaults::DEFAULT_DEMAND_ALERT_THRESHOLD,
            well_stocked_factor: defaults::DEFAULT_WELL_STOCKED_FACTOR,
            max_alternatives: defaults::DEFAULT_MAX_ALTERNATIVES,
            synthesis_timeout_secs: defaults::DEFAULT_SYNTHESIS_TIMEOUT_SECS,
        }
    }
}
