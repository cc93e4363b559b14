// Single source of truth for all default values.

// --- Storage ---
pub const DEFAULT_DB_FILENAME: &str = "meditrack.db";
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;

// --- Forecast ---
pub const DEFAULT_CATEGORY_BOOST: f64 = 1.5;
pub const DEFAULT_REASON_THRESHOLD: f64 = 1.2;

pub const DEFAULT_WINTER_RISK: &[&str] = &["Cough & Cold", "Antibiotics", "Vitamins", "Analgesics"];
pub const DEFAULT_SPRING_RISK: &[&str] = &["Antihistamines", "Allergy", "Vitamins"];
pub const DEFAULT_SUMMER_RISK: &[&str] = &["Rehydration", "Antidiarrheals", "Antipyretics"];
pub const DEFAULT_FALL_RISK: &[&str] = &["Vitamins", "Immunostimulants"];

pub const DEFAULT_RAINY_RISK: &[&str] = &["Analgesics", "Antibiotics", "Antipyretics", "Cough & Cold"];
pub const DEFAULT_DRY_RISK: &[&str] = &["Moisturizers", "Vitamins"];
pub const DEFAULT_COLD_RISK: &[&str] = &["Cough & Cold", "Antibiotics", "Vitamins", "Analgesics"];
pub const DEFAULT_HOT_RISK: &[&str] = &["Rehydration", "Antipyretics", "Antihistamines"];

// --- Alerts ---
pub const DEFAULT_EXPIRY_WINDOW_DAYS: i64 = 30;
/// Longest expiry look-ahead `validate` accepts (ten years).
pub const MAX_EXPIRY_WINDOW_DAYS: i64 = 3650;
pub const DEFAULT_EXPIRY_HIGH_SEVERITY_DAYS: i64 = 15;
pub const DEFAULT_SWEEP_HIGH_SEVERITY_DAYS: i64 = 7;
pub const DEFAULT_DEMAND_ALERT_THRESHOLD: f64 = 1.3;
pub const DEFAULT_WELL_STOCKED_FACTOR: f64 = 2.0;
pub const DEFAULT_MAX_ALTERNATIVES: usize = 3;
pub const DEFAULT_SYNTHESIS_TIMEOUT_SECS: u64 = 60;

// --- Scheduler ---
pub const DEFAULT_SCHEDULER_ENABLED: bool = true;
pub const DEFAULT_GENERATION_CRON: &str = "0 */6 * * *"; // every 6 hours
pub const DEFAULT_EXPIRY_SWEEP_CRON: &str = "0 0 * * *"; // daily at midnight

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_LOG_JSON: bool = true;

pub(crate) fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}
