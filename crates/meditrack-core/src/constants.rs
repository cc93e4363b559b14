/// MediTrack engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Minimum stock level assumed when a medicine record omits one.
pub const DEFAULT_MIN_STOCK_LEVEL: u32 = 10;

/// Neutral demand factor. Missing or unusable season/climate factors collapse to this.
pub const NEUTRAL_FACTOR: f64 = 1.0;

/// Months of supply a medicine's current stock is assumed to cover at a neutral multiplier.
pub const BASELINE_SUPPLY_MONTHS: f64 = 3.0;

/// Default page size for the "recent alerts" view.
pub const DEFAULT_RECENT_ALERTS: usize = 5;

