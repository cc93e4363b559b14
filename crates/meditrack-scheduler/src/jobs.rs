//! The two periodic jobs. Each one logs its own failure and returns; the next
//! tick is the retry.

use chrono::{DateTime, Utc};
use tracing::Instrument;

use meditrack_alerts::AlertEngine;
use meditrack_core::models::{GenerationReport, ReconcileOutcome};
use meditrack_core::traits::{IAlertStore, IMedicineStore};
use meditrack_observability::{events, job_span};

pub const GENERATION_JOB: &str = "generate_alerts";
pub const EXPIRY_SWEEP_JOB: &str = "expiry_sweep";

/// Full synthesis with replace-on-generate.
pub async fn run_generation_job<S>(engine: &AlertEngine<S>) -> GenerationReport
where
    S: IMedicineStore + IAlertStore + 'static,
{
    run_generation_job_at(engine, Utc::now()).await
}

pub async fn run_generation_job_at<S>(engine: &AlertEngine<S>, now: DateTime<Utc>) -> GenerationReport
where
    S: IMedicineStore + IAlertStore + 'static,
{
    events::job_fired(GENERATION_JOB);
    engine
        .generate_alerts_at(now)
        .instrument(job_span!(GENERATION_JOB))
        .await
}

/// Expiry-only sweep with upsert-if-absent. `None` when the sweep failed.
pub async fn run_expiry_sweep_job<S>(engine: &AlertEngine<S>) -> Option<ReconcileOutcome>
where
    S: IMedicineStore + IAlertStore + 'static,
{
    run_expiry_sweep_job_at(engine, Utc::now()).await
}

pub async fn run_expiry_sweep_job_at<S>(
    engine: &AlertEngine<S>,
    now: DateTime<Utc>,
) -> Option<ReconcileOutcome>
where
    S: IMedicineStore + IAlertStore + 'static,
{
    events::job_fired(EXPIRY_SWEEP_JOB);
    let result = engine
        .sweep_expiring_at(now)
        .instrument(job_span!(EXPIRY_SWEEP_JOB))
        .await;
    match result {
        Ok(outcome) => Some(outcome),
        Err(e) => {
            tracing::warn!(job = EXPIRY_SWEEP_JOB, error = %e, "job failed, waiting for next run");
            None
        }
    }
}
