//! Alert status state machine.
//!
//! ```text
//! new ──read──▶ read ──resolve──▶ resolved
//!  └───────────resolve───────────▶
//! ```
//! `resolved` is terminal. Setting the current status again changes nothing.

use chrono::{DateTime, Utc};

use meditrack_core::errors::{AlertError, MediTrackResult};
use meditrack_core::models::{Alert, AlertStatus};

pub fn is_allowed(from: AlertStatus, to: AlertStatus) -> bool {
    matches!(
        (from, to),
        (AlertStatus::New, AlertStatus::Read)
            | (AlertStatus::New, AlertStatus::Resolved)
            | (AlertStatus::Read, AlertStatus::Resolved)
    )
}

/// Apply `to` to `alert`. `Ok(None)` when the alert already has that status.
///
/// Resolving requires a non-empty `actor`, recorded with the time in
/// `resolved_by` / `resolved_at`.
pub fn transition(
    alert: &Alert,
    to: AlertStatus,
    actor: Option<&str>,
    now: DateTime<Utc>,
) -> MediTrackResult<Option<Alert>> {
    if alert.status == to {
        return Ok(None);
    }
    if !is_allowed(alert.status, to) {
        return Err(AlertError::InvalidTransition {
            id: alert.id.clone(),
            from: alert.status,
            to,
        }
        .into());
    }

    let mut next = alert.clone();
    next.status = to;
    next.updated_at = now;
    if to == AlertStatus::Resolved {
        let actor = actor
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .ok_or_else(|| AlertError::MissingResolver {
                id: alert.id.clone(),
            })?;
        next.resolved_by = Some(actor.to_string());
        next.resolved_at = Some(now);
    }
    Ok(Some(next))
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use meditrack_core::models::{AlertDraft, AlertType, Severity};
    use meditrack_core::MediTrackError;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap()
    }

    fn fresh() -> Alert {
        AlertDraft::new("m1", AlertType::LowStock, "low", Severity::High).into_alert(now())
    }

    #[test]
    fn new_to_read() {
        let later = now() + Duration::minutes(5);
        let read = transition(&fresh(), AlertStatus::Read, None, later).unwrap().unwrap();
        assert_eq!(read.status, AlertStatus::Read);
        assert_eq!(read.updated_at, later);
        assert!(read.resolved_by.is_none());
    }

    #[test]
    fn resolve_records_actor_and_time() {
        let read = transition(&fresh(), AlertStatus::Read, None, now()).unwrap().unwrap();
        let done = transition(&read, AlertStatus::Resolved, Some("pharmacist@clinic"), now())
            .unwrap()
            .unwrap();
        assert_eq!(done.resolved_by.as_deref(), Some("pharmacist@clinic"));
        assert_eq!(done.resolved_at, Some(now()));
    }

    #[test]
    fn new_can_resolve_directly() {
        assert!(transition(&fresh(), AlertStatus::Resolved, Some("u"), now())
            .unwrap()
            .is_some());
    }

    #[test]
    fn resolve_without_actor_fails() {
        for actor in [None, Some(""), Some("   ")] {
            let err = transition(&fresh(), AlertStatus::Resolved, actor, now()).unwrap_err();
            assert!(matches!(
                err,
                MediTrackError::Alert(AlertError::MissingResolver { .. })
            ));
        }
    }

    #[test]
    fn resolved_is_terminal() {
        let done = transition(&fresh(), AlertStatus::Resolved, Some("u"), now())
            .unwrap()
            .unwrap();
        for to in [AlertStatus::New, AlertStatus::Read] {
            assert!(transition(&done, to, Some("u"), now()).is_err());
        }
    }

    #[test]
    fn read_cannot_go_back_to_new() {
        let read = transition(&fresh(), AlertStatus::Read, None, now()).unwrap().unwrap();
        assert!(transition(&read, AlertStatus::New, None, now()).is_err());
    }

    #[test]
    fn same_status_is_noop() {
        assert!(transition(&fresh(), AlertStatus::New, None, now()).unwrap().is_none());
    }
}
