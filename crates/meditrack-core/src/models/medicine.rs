use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::conditions::{Climate, Season};
use crate::constants::{DEFAULT_MIN_STOCK_LEVEL, NEUTRAL_FACTOR};

fn neutral_factor() -> f64 {
    NEUTRAL_FACTOR
}

/// JSON has no encoding for non-finite floats; they serialize as `null` and read back neutral.
fn factor_or_neutral<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(NEUTRAL_FACTOR))
}

fn default_min_stock_level() -> u32 {
    DEFAULT_MIN_STOCK_LEVEL
}

/// Per-season demand multipliers. Keys absent from the input, or `null`, default to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeasonalTrend {
    #[serde(default = "neutral_factor", deserialize_with = "factor_or_neutral")]
    pub winter: f64,
    #[serde(default = "neutral_factor", deserialize_with = "factor_or_neutral")]
    pub spring: f64,
    #[serde(default = "neutral_factor", deserialize_with = "factor_or_neutral")]
    pub summer: f64,
    #[serde(default = "neutral_factor", deserialize_with = "factor_or_neutral")]
    pub fall: f64,
}

impl SeasonalTrend {
    pub fn factor(&self, season: Season) -> f64 {
        match season {
            Season::Winter => self.winter,
            Season::Spring => self.spring,
            Season::Summer => self.summer,
            Season::Fall => self.fall,
        }
    }
}

impl Default for SeasonalTrend {
    fn default() -> Self {
        Self {
            winter: NEUTRAL_FACTOR,
            spring: NEUTRAL_FACTOR,
            summer: NEUTRAL_FACTOR,
            fall: NEUTRAL_FACTOR,
        }
    }
}

/// Per-climate demand multipliers. Keys absent from the input, or `null`, default to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClimateFactors {
    #[serde(default = "neutral_factor", deserialize_with = "factor_or_neutral")]
    pub rainy: f64,
    #[serde(default = "neutral_factor", deserialize_with = "factor_or_neutral")]
    pub dry: f64,
    #[serde(default = "neutral_factor", deserialize_with = "factor_or_neutral")]
    pub cold: f64,
    #[serde(default = "neutral_factor", deserialize_with = "factor_or_neutral")]
    pub hot: f64,
}

impl ClimateFactors {
    pub fn factor(&self, climate: Climate) -> f64 {
        match climate {
            Climate::Rainy => self.rainy,
            Climate::Dry => self.dry,
            Climate::Cold => self.cold,
            Climate::Hot => self.hot,
        }
    }
}

impl Default for ClimateFactors {
    fn default() -> Self {
        Self {
            rainy: NEUTRAL_FACTOR,
            dry: NEUTRAL_FACTOR,
            cold: NEUTRAL_FACTOR,
            hot: NEUTRAL_FACTOR,
        }
    }
}

/// Which demand tables apply to a medicine, and their values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DemandFactors {
    pub seasonal: bool,
    pub seasonal_trend: SeasonalTrend,
    pub climate_dependent: bool,
    pub climate_factors: ClimateFactors,
}

/// A medicine as owned by the inventory store.
/// The engine reads these and never creates or deletes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medicine {
    /// Store identifier.
    pub id: String,
    /// Unique display name.
    pub name: String,
    /// Pharmacological class, e.g. "Analgesics".
    pub category: String,
    pub current_stock: u32,
    #[serde(default = "default_min_stock_level")]
    pub min_stock_level: u32,
    #[serde(default)]
    pub unit_price: f64,
    #[serde(default)]
    pub expiry_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub demand_factors: DemandFactors,
}

impl Medicine {
    /// A medicine with a fresh UUID and neutral demand factors.
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        current_stock: u32,
        min_stock_level: u32,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            category: category.into(),
            current_stock,
            min_stock_level,
            unit_price: 0.0,
            expiry_date: None,
            manufacturer: None,
            demand_factors: DemandFactors::default(),
        }
    }

    pub fn with_expiry(mut self, expiry_date: DateTime<Utc>) -> Self {
        self.expiry_date = Some(expiry_date);
        self
    }

    /// Mark the medicine as seasonal with the given trend table.
    pub fn with_seasonal_trend(mut self, trend: SeasonalTrend) -> Self {
        self.demand_factors.seasonal = true;
        self.demand_factors.seasonal_trend = trend;
        self
    }

    /// Mark the medicine as climate-dependent with the given factor table.
    pub fn with_climate_factors(mut self, factors: ClimateFactors) -> Self {
        self.demand_factors.climate_dependent = true;
        self.demand_factors.climate_factors = factors;
        self
    }

    /// At or below the minimum stock level.
    pub fn is_low_stock(&self) -> bool {
        self.current_stock <= self.min_stock_level
    }

    /// Strictly above `factor` times the minimum stock level.
    pub fn is_well_stocked(&self, factor: f64) -> bool {
        f64::from(self.current_stock) > f64::from(self.min_stock_level) * factor
    }
}
