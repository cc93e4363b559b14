use serde::{Deserialize, Serialize};

use super::defaults;

/// Periodic job configuration. Cron expressions are evaluated in UTC.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub enabled: bool,
    /// Full synthesis + replace-on-generate.
    pub generation_cron: String,
    /// Expiry-only sweep with upsert-if-absent.
    pub expiry_sweep_cron: String,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::DEFAULT_SCHEDULER_ENABLED,
            generation_cron: defaults::DEFAULT_GENERATION_CRON.to_string(),
            expiry_sweep_cron: defaults::DEFAULT_EXPIRY_SWEEP_CRON.to_string(),
        }
    }
}
