//! Row-level SQL for each table, plus the shared timestamp encoding.

pub mod alert_ops;
pub mod medicine_ops;

use chrono::{DateTime, SecondsFormat, Utc};

use meditrack_core::errors::{MediTrackError, StorageError};

/// RFC 3339 with microseconds and a `Z` suffix. Fixed width, so text order is time order.
pub fn fmt_ts(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn parse_ts(table: &str, column: &str, raw: &str) -> Result<DateTime<Utc>, MediTrackError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| decode_err(table, column, format!("{raw:?}: {e}")))
}

pub(crate) fn decode_err(table: &str, column: &str, reason: impl Into<String>) -> MediTrackError {
    StorageError::Decode {
        table: table.to_string(),
        column: column.to_string(),
        reason: reason.into(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    #[test]
    fn timestamps_are_fixed_width_utc() {
        let ts = Utc.with_ymd_and_hms(2026, 1, 15, 0, 0, 0).unwrap();
        assert_eq!(fmt_ts(ts), "2026-01-15T00:00:00.000000Z");
        assert_eq!(parse_ts("t", "c", &fmt_ts(ts)).unwrap(), ts);
    }

    #[test]
    fn bad_timestamp_names_the_column() {
        let err = parse_ts("alerts", "created_at", "yesterday").unwrap_err();
        assert!(err.to_string().contains("alerts.created_at"));
    }

    proptest! {
        #[test]
        fn text_order_matches_time_order(a in 0i64..4_102_444_800, b in 0i64..4_102_444_800) {
            let ta = Utc.timestamp_opt(a, 0).unwrap();
            let tb = Utc.timestamp_opt(b, 0).unwrap();
            prop_assert_eq!(fmt_ts(ta).cmp(&fmt_ts(tb)), ta.cmp(&tb));
        }
    }
}
