use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Result of one `generate_alerts` run. Failures are reported here, never raised.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct GenerationReport {
    pub success: bool,
    /// Alerts inserted by this run.
    pub count: usize,
    /// Unresolved alerts cleared before inserting.
    pub deleted: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerationReport {
    pub fn succeeded(count: usize, deleted: usize) -> Self {
        Self {
            success: true,
            count,
            deleted,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            count: 0,
            deleted: 0,
            error: Some(error.into()),
        }
    }
}

/// What a reconciliation strategy did to the alert store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileOutcome {
    pub deleted: usize,
    pub inserted: usize,
    /// Drafts dropped because an unresolved alert already covered them.
    pub skipped: usize,
}
