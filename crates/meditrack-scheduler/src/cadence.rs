//! Cron cadences for daily and hourly jobs.
//!
//! Accepts the five-field form `M H * * *`. The minute is a number; the hour is a
//! number, `*`, or `*/N`. Day, month and weekday must be `*`. Times are UTC.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Timelike, Utc};

use meditrack_core::errors::{ConfigError, MediTrackError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cadence {
    expression: String,
    minute: u32,
    /// Matching hours, ascending, never empty.
    hours: Vec<u32>,
}

impl Cadence {
    pub fn parse(expression: &str) -> Result<Self, MediTrackError> {
        let fail = |reason: &str| -> MediTrackError {
            ConfigError::InvalidCadence {
                expression: expression.to_string(),
                reason: reason.to_string(),
            }
            .into()
        };

        let fields: Vec<&str> = expression.split_whitespace().collect();
        let &[minute, hour, day, month, weekday] = fields.as_slice() else {
            return Err(fail("expected five fields"));
        };
        if [day, month, weekday].iter().any(|f| *f != "*") {
            return Err(fail("day, month and weekday must be *"));
        }

        let minute: u32 = minute.parse().map_err(|_| fail("minute must be a number"))?;
        if minute > 59 {
            return Err(fail("minute must be 0-59"));
        }

        let hours: Vec<u32> = if hour == "*" {
            (0..24).collect()
        } else if let Some(step) = hour.strip_prefix("*/") {
            let step: u32 = step.parse().map_err(|_| fail("hour step must be a number"))?;
            if step == 0 || step > 23 {
                return Err(fail("hour step must be 1-23"));
            }
            (0..24).step_by(step as usize).collect()
        } else {
            let h: u32 = hour.parse().map_err(|_| fail("hour must be a number, * or */N"))?;
            if h > 23 {
                return Err(fail("hour must be 0-23"));
            }
            vec![h]
        };

        Ok(Self {
            expression: expression.to_string(),
            minute,
            hours,
        })
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// The first fire time strictly after `now`.
    pub fn next_after(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let midnight = now
            - Duration::seconds(i64::from(now.num_seconds_from_midnight()))
            - Duration::nanoseconds(i64::from(now.nanosecond()));

        for day in 0..2 {
            for &hour in &self.hours {
                let candidate = midnight
                    + Duration::days(day)
                    + Duration::hours(i64::from(hour))
                    + Duration::minutes(i64::from(self.minute));
                if candidate > now {
                    return candidate;
                }
            }
        }
        // Unreachable with a non-empty hour list: tomorrow always has a candidate.
        midnight + Duration::days(1)
    }
}

impl FromStr for Cadence {
    type Err = MediTrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, h, m, s).unwrap()
    }

    #[test]
    fn every_six_hours() {
        let c = Cadence::parse("0 */6 * * *").unwrap();
        assert_eq!(c.next_after(at(0, 0, 0)), at(6, 0, 0));
        assert_eq!(c.next_after(at(5, 59, 59)), at(6, 0, 0));
        assert_eq!(c.next_after(at(13, 30, 0)), at(18, 0, 0));
        assert_eq!(
            c.next_after(at(18, 0, 1)),
            Utc.with_ymd_and_hms(2026, 3, 11, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn daily_at_midnight() {
        let c = Cadence::parse("0 0 * * *").unwrap();
        assert_eq!(
            c.next_after(at(0, 0, 0)),
            Utc.with_ymd_and_hms(2026, 3, 11, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn fixed_minute_every_hour() {
        let c = Cadence::parse("15 * * * *").unwrap();
        assert_eq!(c.next_after(at(9, 14, 0)), at(9, 15, 0));
        assert_eq!(c.next_after(at(9, 15, 0)), at(10, 15, 0));
    }

    #[test]
    fn rejects_unsupported_forms() {
        for bad in ["", "0 */6 * *", "60 0 * * *", "0 24 * * *", "0 */0 * * *", "0 0 1 * *", "x 0 * * *"] {
            let err = Cadence::parse(bad).unwrap_err();
            assert!(
                matches!(err, MediTrackError::Config(ConfigError::InvalidCadence { .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    proptest! {
        #[test]
        fn next_is_later_and_on_the_minute(
            secs in 0i64..4_102_444_800,
            minute in 0u32..60,
            step in 1u32..24,
        ) {
            let c = Cadence::parse(&format!("{minute} */{step} * * *")).unwrap();
            let now = Utc.timestamp_opt(secs, 0).unwrap();
            let next = c.next_after(now);
            prop_assert!(next > now);
            prop_assert!(next - now <= Duration::days(1));
            prop_assert_eq!(next.minute(), minute);
            prop_assert_eq!(next.second(), 0);
            prop_assert_eq!(next.hour() % step, 0);
        }
    }
}
