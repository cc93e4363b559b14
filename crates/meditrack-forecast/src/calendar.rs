//! Month → season/climate classification.
//!
//! Months are 0-based (January = 0). Anything outside 2..=10 lands in winter/cold,
//! including out-of-range input.

use chrono::{DateTime, Datelike, Utc};

use meditrack_core::models::{Climate, Conditions, Season};

pub fn season_for_month(month: u32) -> Season {
    match month {
        2..=4 => Season::Spring,
        5..=7 => Season::Summer,
        8..=10 => Season::Fall,
        _ => Season::Winter,
    }
}

pub fn climate_for_month(month: u32) -> Climate {
    match season_for_month(month) {
        Season::Spring => Climate::Rainy,
        Season::Summer => Climate::Hot,
        Season::Fall => Climate::Dry,
        Season::Winter => Climate::Cold,
    }
}

/// Climate for the month containing `now` (UTC).
pub fn climate_for_now(now: DateTime<Utc>) -> Climate {
    climate_for_month(now.month0())
}

pub fn classify(now: DateTime<Utc>) -> Conditions {
    let month = now.month0();
    Conditions {
        season: season_for_month(month),
        climate: climate_for_month(month),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn month_boundaries() {
        assert_eq!(season_for_month(1), Season::Winter);
        assert_eq!(season_for_month(2), Season::Spring);
        assert_eq!(season_for_month(4), Season::Spring);
        assert_eq!(season_for_month(5), Season::Summer);
        assert_eq!(season_for_month(7), Season::Summer);
        assert_eq!(season_for_month(8), Season::Fall);
        assert_eq!(season_for_month(10), Season::Fall);
        assert_eq!(season_for_month(11), Season::Winter);
        assert_eq!(season_for_month(0), Season::Winter);
    }

    #[test]
    fn climate_follows_season() {
        assert_eq!(climate_for_month(3), Climate::Rainy);
        assert_eq!(climate_for_month(6), Climate::Hot);
        assert_eq!(climate_for_month(9), Climate::Dry);
        assert_eq!(climate_for_month(0), Climate::Cold);
    }

    #[test]
    fn out_of_range_falls_to_winter_cold() {
        assert_eq!(season_for_month(12), Season::Winter);
        assert_eq!(climate_for_month(99), Climate::Cold);
    }

    #[test]
    fn classify_uses_utc_month() {
        let july = Utc.with_ymd_and_hms(2025, 7, 15, 12, 0, 0).unwrap();
        let conditions = classify(july);
        assert_eq!(conditions.season, Season::Summer);
        assert_eq!(conditions.climate, Climate::Hot);
        assert_eq!(climate_for_now(july), Climate::Hot);
    }
}
