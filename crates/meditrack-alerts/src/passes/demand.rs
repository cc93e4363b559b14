//! Demand: scored multiplier against stock, and high-risk categories.
//!
//! Two flavors share the scorer. [`detect`] is the full-generation rule set;
//! [`sweep_drafts`] is the background prediction rule set, which keys off the
//! report's restock flag instead.

use meditrack_core::models::{AlertDraft, AlertType, DemandPrediction, Medicine, Severity};
use meditrack_forecast::{report, DemandForecaster, ForecastContext};

fn below_minimum(medicine: &Medicine) -> Severity {
    if medicine.current_stock < medicine.min_stock_level {
        Severity::High
    } else {
        Severity::Medium
    }
}

/// `high_demand_predicted` when the multiplier exceeds `threshold` and stock is under
/// `min × multiplier`. Within the same branch, `disease_pattern_risk` for every
/// high-risk category; a high-risk medicine at or below the threshold gets neither.
pub fn detect(
    medicines: &[Medicine],
    forecaster: &DemandForecaster,
    ctx: &ForecastContext,
    threshold: f64,
) -> Vec<AlertDraft> {
    let mut drafts = Vec::new();
    for m in medicines {
        let score = forecaster.score(m, ctx);
        if score.multiplier <= threshold {
            continue;
        }

        if f64::from(m.current_stock) < f64::from(m.min_stock_level) * score.multiplier {
            drafts.push(AlertDraft::new(
                m.id.clone(),
                AlertType::HighDemandPredicted,
                format!(
                    "High demand predicted for {}. Reasons: {}. Consider increasing stock.",
                    m.name,
                    score.reasons.join("; ")
                ),
                below_minimum(m),
            ));
        }

        if ctx.high_risk.contains(&m.category) {
            drafts.push(AlertDraft::new(
                m.id.clone(),
                AlertType::DiseasePatternRisk,
                format!(
                    "{} is in the {} category, which typically sees higher demand during {} conditions.",
                    m.name, m.category, ctx.conditions
                ),
                Severity::Medium,
            ));
        }
    }
    drafts
}

/// Report rows plus the drafts the prediction path raises alongside them.
///
/// `high_demand_predicted` when the multiplier exceeds `threshold` and the row needs
/// restocking; `disease_pattern_risk` for high-risk categories below
/// `min × low_cover_factor`. Both are high severity below the minimum.
pub fn sweep_drafts(
    medicines: &[Medicine],
    forecaster: &DemandForecaster,
    ctx: &ForecastContext,
    threshold: f64,
    low_cover_factor: f64,
) -> (Vec<DemandPrediction>, Vec<AlertDraft>) {
    let mut rows = Vec::with_capacity(medicines.len());
    let mut drafts = Vec::new();
    for m in medicines {
        let score = forecaster.score(m, ctx);
        let row = report::prediction_row(m, &score, &ctx.high_risk);

        if score.multiplier > threshold && row.needs_restock {
            drafts.push(AlertDraft::new(
                m.id.clone(),
                AlertType::HighDemandPredicted,
                format!(
                    "High demand predicted for {} due to current {} conditions. Current stock ({}) may be insufficient.",
                    m.name, ctx.conditions, m.current_stock
                ),
                below_minimum(m),
            ));
        }

        if row.is_high_risk_category
            && f64::from(m.current_stock) < f64::from(m.min_stock_level) * low_cover_factor
        {
            drafts.push(AlertDraft::new(
                m.id.clone(),
                AlertType::DiseasePatternRisk,
                format!(
                    "{} belongs to {} category which has higher demand during {} conditions. Consider increasing stock.",
                    m.name, m.category, ctx.conditions.climate
                ),
                below_minimum(m),
            ));
        }

        rows.push(row);
    }
    (rows, drafts)
}
