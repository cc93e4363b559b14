//! Low stock: at or below the minimum stock level.

use meditrack_core::models::{AlertDraft, AlertType, Medicine, Severity};

/// One `low_stock` draft per medicine at or below its minimum.
pub fn detect(medicines: &[Medicine]) -> Vec<AlertDraft> {
    medicines.iter().filter_map(draft_for).collect()
}

/// The low-stock draft for a single medicine, if it qualifies.
/// High severity at or below half the minimum.
pub fn draft_for(medicine: &Medicine) -> Option<AlertDraft> {
    if !medicine.is_low_stock() {
        return None;
    }
    let severity = if f64::from(medicine.current_stock) <= f64::from(medicine.min_stock_level) / 2.0 {
        Severity::High
    } else {
        Severity::Medium
    };
    Some(AlertDraft::new(
        medicine.id.clone(),
        AlertType::LowStock,
        format!(
            "Low stock alert for {}. Current stock: {}, Minimum required: {}",
            medicine.name, medicine.current_stock, medicine.min_stock_level
        ),
        severity,
    ))
}
