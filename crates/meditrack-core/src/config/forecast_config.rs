use serde::{Deserialize, Serialize};

use super::defaults::{self, owned};
use crate::models::{Climate, Season};

/// Demand forecasting configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Multiplier applied when a medicine's category is high-risk for the current conditions.
    pub category_boost: f64,
    /// A seasonal or climate factor above this value is listed as a reason.
    pub reason_threshold: f64,
    pub risk_tables: RiskTablesConfig,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            category_boost: defaults::DEFAULT_CATEGORY_BOOST,
            reason_threshold: defaults::DEFAULT_REASON_THRESHOLD,
            risk_tables: RiskTablesConfig::default(),
        }
    }
}

/// High-risk medicine categories by season and by climate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskTablesConfig {
    pub season: SeasonRiskTable,
    pub climate: ClimateRiskTable,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonRiskTable {
    pub winter: Vec<String>,
    pub spring: Vec<String>,
    pub summer: Vec<String>,
    pub fall: Vec<String>,
}

impl SeasonRiskTable {
    pub fn categories(&self, season: Season) -> &[String] {
        match season {
            Season::Winter => &self.winter,
            Season::Spring => &self.spring,
            Season::Summer => &self.summer,
            Season::Fall => &self.fall,
        }
    }
}

impl Default for SeasonRiskTable {
    fn default() -> Self {
        Self {
            winter: owned(defaults::DEFAULT_WINTER_RISK),
            spring: owned(defaults::DEFAULT_SPRING_RISK),
            summer: owned(defaults::DEFAULT_SUMMER_RISK),
            fall: owned(defaults::DEFAULT_FALL_RISK),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimateRiskTable {
    pub rainy: Vec<String>,
    pub dry: Vec<String>,
    pub cold: Vec<String>,
    pub hot: Vec<String>,
}

impl ClimateRiskTable {
    pub fn categories(&self, climate: Climate) -> &[String] {
        match climate {
            Climate::Rainy => &self.rainy,
            Climate::Dry => &self.dry,
            Climate::Cold => &self.cold,
            Climate::Hot => &self.hot,
        }
    }
}

impl Default for ClimateRiskTable {
    fn default() -> Self {
        Self {
            rainy: owned(defaults::DEFAULT_RAINY_RISK),
            dry: owned(defaults::DEFAULT_DRY_RISK),
            cold: owned(defaults::DEFAULT_COLD_RISK),
            hot: owned(defaults::DEFAULT_HOT_RISK),
        }
    }
}
