use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One row of the demand report consumed by the dashboard charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DemandPrediction {
    /// Medicine name.
    pub medicine: String,
    pub category: String,
    pub current_stock: u32,
    pub predicted_demand_multiplier: f64,
    pub needs_restock: bool,
    /// `None` when there is no stock to run down.
    pub stock_duration_months: Option<f64>,
    pub reasons_for_prediction: Vec<String>,
    pub is_high_risk_category: bool,
}
