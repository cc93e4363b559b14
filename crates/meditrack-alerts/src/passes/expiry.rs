//! Expiry: expiry date within `[now, now + window]`.

use chrono::{DateTime, Duration, Utc};

use meditrack_core::config::AlertConfig;
use meditrack_core::models::{AlertDraft, AlertType, Medicine, Severity};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Window and severity cutoff for one expiry pass.
///
/// The on-demand run and the daily sweep share the window but use different
/// high-severity cutoffs (15 and 7 days by default).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryPolicy {
    pub window_days: i64,
    /// Days-to-expiry strictly below this is `high`.
    pub high_severity_below_days: i64,
}

impl ExpiryPolicy {
    pub fn on_demand(config: &AlertConfig) -> Self {
        Self {
            window_days: config.expiry_window_days,
            high_severity_below_days: config.expiry_high_severity_days,
        }
    }

    pub fn sweep(config: &AlertConfig) -> Self {
        Self {
            window_days: config.expiry_window_days,
            high_severity_below_days: config.sweep_high_severity_days,
        }
    }

    /// Inclusive upper bound of the window. Saturates at the latest representable
    /// instant rather than overflowing.
    pub fn horizon(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        Duration::try_days(self.window_days)
            .and_then(|window| now.checked_add_signed(window))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    pub fn covers(&self, expiry: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        expiry >= now && expiry <= self.horizon(now)
    }
}

/// Whole days until expiry, rounded up. Zero when `expiry == now`.
pub fn days_to_expiry(expiry: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (expiry - now).num_milliseconds();
    if millis <= 0 {
        return 0;
    }
    (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
}

pub fn detect(medicines: &[Medicine], now: DateTime<Utc>, policy: ExpiryPolicy) -> Vec<AlertDraft> {
    medicines
        .iter()
        .filter_map(|m| {
            let expiry = m.expiry_date?;
            if !policy.covers(expiry, now) {
                return None;
            }
            let days = days_to_expiry(expiry, now);
            let severity = if days < policy.high_severity_below_days {
                Severity::High
            } else {
                Severity::Medium
            };
            Some(AlertDraft::new(
                m.id.clone(),
                AlertType::Expiry,
                format!(
                    "{} will expire in {} days. Quantity: {}",
                    m.name, days, m.current_stock
                ),
                severity,
            ))
        })
        .collect()
}
