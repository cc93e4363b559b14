//! Writes a synthesized batch to the alert store.
//!
//! `ReplaceOnGenerate` clears every unresolved alert and inserts the batch, so the
//! unresolved set always mirrors the latest run. `UpsertIfAbsent` inserts a draft only
//! when no unresolved alert exists for its `(medicine_id, type)`. Resolved alerts are
//! untouched by both.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use tracing::Instrument;

use meditrack_core::errors::MediTrackResult;
use meditrack_core::models::{Alert, AlertDraft, AlertStatus, AlertType, ReconcileOutcome};
use meditrack_core::traits::IAlertStore;
use meditrack_observability::reconcile_span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileStrategy {
    ReplaceOnGenerate,
    UpsertIfAbsent,
}

impl ReconcileStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ReplaceOnGenerate => "replace_on_generate",
            Self::UpsertIfAbsent => "upsert_if_absent",
        }
    }
}

impl fmt::Display for ReconcileStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What was written, and the alerts that now exist because of it.
#[derive(Debug, Clone, Default)]
pub struct Reconciled {
    pub outcome: ReconcileOutcome,
    pub inserted: Vec<Alert>,
}

pub async fn reconcile<S>(
    strategy: ReconcileStrategy,
    store: &S,
    drafts: &[AlertDraft],
    now: DateTime<Utc>,
) -> MediTrackResult<Reconciled>
where
    S: IAlertStore + ?Sized,
{
    let span = reconcile_span!(strategy, drafts.len());
    async {
        match strategy {
            ReconcileStrategy::ReplaceOnGenerate => replace_on_generate(store, drafts, now).await,
            ReconcileStrategy::UpsertIfAbsent => upsert_if_absent(store, drafts, now).await,
        }
    }
    .instrument(span)
    .await
}

/// Clear `new`/`read` alerts system-wide, then insert the whole batch.
pub async fn replace_on_generate<S>(
    store: &S,
    drafts: &[AlertDraft],
    now: DateTime<Utc>,
) -> MediTrackResult<Reconciled>
where
    S: IAlertStore + ?Sized,
{
    let (deleted, inserted) = store.replace_unresolved(drafts, now).await?;
    Ok(Reconciled {
        outcome: ReconcileOutcome {
            deleted,
            inserted: inserted.len(),
            skipped: 0,
        },
        inserted,
    })
}

/// Insert drafts whose `(medicine_id, type)` has no unresolved alert, and that
/// appear first in the batch for that pair.
pub async fn upsert_if_absent<S>(
    store: &S,
    drafts: &[AlertDraft],
    now: DateTime<Utc>,
) -> MediTrackResult<Reconciled>
where
    S: IAlertStore + ?Sized,
{
    let mut seen: HashSet<(&str, AlertType)> = HashSet::new();
    let mut fresh = Vec::new();
    let mut skipped = 0;

    for draft in drafts {
        if !seen.insert((draft.medicine_id.as_str(), draft.alert_type)) {
            skipped += 1;
            continue;
        }
        let existing = store
            .find_alert(&draft.medicine_id, draft.alert_type, &AlertStatus::UNRESOLVED)
            .await?;
        if existing.is_some() {
            skipped += 1;
        } else {
            fresh.push(draft.clone());
        }
    }

    let inserted = if fresh.is_empty() {
        Vec::new()
    } else {
        store.insert_alerts(&fresh, now).await?
    };
    Ok(Reconciled {
        outcome: ReconcileOutcome {
            deleted: 0,
            inserted: inserted.len(),
            skipped,
        },
        inserted,
    })
}
