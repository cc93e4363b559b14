//! Per-medicine demand report rows for the dashboard.

use meditrack_core::constants::BASELINE_SUPPLY_MONTHS;
use meditrack_core::models::{DemandPrediction, Medicine};

use crate::risk::HighRiskCategories;
use crate::scorer::DemandScore;

/// Build one report row from a computed score.
///
/// Predicted monthly usage assumes current stock covers three months at a neutral
/// multiplier, so stock lasts `3 / multiplier` months. A medicine needs restocking
/// when that drops under a month or stock is below `min_stock_level × multiplier`.
pub fn prediction_row(
    medicine: &Medicine,
    score: &DemandScore,
    high_risk: &HighRiskCategories,
) -> DemandPrediction {
    let stock = f64::from(medicine.current_stock);
    let monthly_usage = stock * (score.multiplier / BASELINE_SUPPLY_MONTHS);
    let stock_duration_months = (monthly_usage > 0.0).then(|| stock / monthly_usage);
    let below_scaled_minimum = stock < f64::from(medicine.min_stock_level) * score.multiplier;
    let needs_restock = stock_duration_months.is_some_and(|months| months < 1.0) || below_scaled_minimum;

    DemandPrediction {
        medicine: medicine.name.clone(),
        category: medicine.category.clone(),
        current_stock: medicine.current_stock,
        predicted_demand_multiplier: score.multiplier,
        needs_restock,
        stock_duration_months,
        reasons_for_prediction: score.reasons.clone(),
        is_high_risk_category: high_risk.contains(&medicine.category),
    }
}
