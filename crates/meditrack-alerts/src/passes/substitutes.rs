//! Substitutes: point low-stock medicines in a high-risk category at well-stocked
//! peers in the same category.

use meditrack_core::models::{AlertDraft, AlertType, Medicine, Severity};
use meditrack_forecast::HighRiskCategories;

/// Walks categories in risk-table order, then medicines in input order.
/// At most `max_alternatives` names per draft; a medicine is never its own alternative.
pub fn detect(
    medicines: &[Medicine],
    high_risk: &HighRiskCategories,
    well_stocked_factor: f64,
    max_alternatives: usize,
) -> Vec<AlertDraft> {
    let mut drafts = Vec::new();
    for category in high_risk.iter() {
        let in_category: Vec<&Medicine> =
            medicines.iter().filter(|m| m.category == category).collect();
        let well_stocked: Vec<&Medicine> = in_category
            .iter()
            .copied()
            .filter(|m| m.is_well_stocked(well_stocked_factor))
            .collect();
        if well_stocked.is_empty() {
            continue;
        }

        for low in in_category.iter().filter(|m| m.is_low_stock()) {
            let alternatives: Vec<&str> = well_stocked
                .iter()
                .filter(|m| m.id != low.id)
                .map(|m| m.name.as_str())
                .take(max_alternatives)
                .collect();
            if alternatives.is_empty() {
                continue;
            }
            drafts.push(AlertDraft::new(
                low.id.clone(),
                AlertType::RecommendedStock,
                format!(
                    "{} is low in stock. Consider offering these alternatives: {}.",
                    low.name,
                    alternatives.join(", ")
                ),
                Severity::Medium,
            ));
        }
    }
    drafts
}
