//! Demand multiplier scoring.
//!
//! multiplier = seasonal factor (if seasonal) × climate factor (if climate-dependent)
//!            × category boost (if the category is high-risk). No ceiling.

use meditrack_core::config::ForecastConfig;
use meditrack_core::constants::NEUTRAL_FACTOR;
use meditrack_core::models::{Conditions, Medicine};
use meditrack_observability::events;

use crate::risk::HighRiskCategories;

/// A scored medicine: the compound multiplier and why it moved.
#[derive(Debug, Clone, PartialEq)]
pub struct DemandScore {
    pub multiplier: f64,
    /// Seasonal, then climate, then category. Never sorted.
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct DemandScorer {
    category_boost: f64,
    reason_threshold: f64,
}

impl DemandScorer {
    pub fn new(category_boost: f64, reason_threshold: f64) -> Self {
        Self {
            category_boost,
            reason_threshold,
        }
    }

    pub fn from_config(config: &ForecastConfig) -> Self {
        Self::new(config.category_boost, config.reason_threshold)
    }

    pub fn category_boost(&self) -> f64 {
        self.category_boost
    }

    pub fn score(
        &self,
        medicine: &Medicine,
        conditions: &Conditions,
        high_risk: &HighRiskCategories,
    ) -> DemandScore {
        let factors = &medicine.demand_factors;
        let mut multiplier = NEUTRAL_FACTOR;
        let mut reasons = Vec::new();

        if factors.seasonal {
            let key = conditions.season.as_str();
            let factor = usable_factor(medicine, key, factors.seasonal_trend.factor(conditions.season));
            multiplier *= factor;
            if factor > self.reason_threshold {
                reasons.push(format!("Seasonal factor ({key}): {factor:.1}x"));
            }
        }

        if factors.climate_dependent {
            let key = conditions.climate.as_str();
            let factor =
                usable_factor(medicine, key, factors.climate_factors.factor(conditions.climate));
            multiplier *= factor;
            if factor > self.reason_threshold {
                reasons.push(format!("Climate factor ({key}): {factor:.1}x"));
            }
        }

        if high_risk.contains(&medicine.category) {
            multiplier *= self.category_boost;
            reasons.push(format!(
                "High-risk category ({}) during {}",
                medicine.category, conditions
            ));
        }

        DemandScore {
            multiplier,
            reasons,
        }
    }
}

impl Default for DemandScorer {
    fn default() -> Self {
        Self::from_config(&ForecastConfig::default())
    }
}

/// Factors must be positive and finite. Anything else is a data-entry fault and
/// scores as neutral rather than poisoning the product.
fn usable_factor(medicine: &Medicine, key: &str, raw: f64) -> f64 {
    if raw.is_finite() && raw > 0.0 {
        return raw;
    }
    events::config_fault(&medicine.id, key, raw);
    NEUTRAL_FACTOR
}
