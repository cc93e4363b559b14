//! Scheduler: one tokio task per job, each sleeping until its cadence fires.
//!
//! Runs are not caught up: a job whose fire time passed while the process was
//! down waits for the next one.

use std::future::Future;
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;

use meditrack_alerts::AlertEngine;
use meditrack_core::config::SchedulerConfig;
use meditrack_core::errors::MediTrackResult;
use meditrack_core::traits::{IAlertStore, IMedicineStore};
use meditrack_observability::events;

use crate::cadence::Cadence;
use crate::jobs::{self, EXPIRY_SWEEP_JOB, GENERATION_JOB};

pub struct Scheduler;

impl Scheduler {
    /// Parse both cadences and spawn the job loops. A disabled scheduler returns
    /// an empty handle. Must be called inside a tokio runtime.
    pub fn start<S>(engine: AlertEngine<S>, config: &SchedulerConfig) -> MediTrackResult<SchedulerHandle>
    where
        S: IMedicineStore + IAlertStore + 'static,
    {
        let generation = Cadence::parse(&config.generation_cron)?;
        let sweep = Cadence::parse(&config.expiry_sweep_cron)?;

        if !config.enabled {
            tracing::info!("scheduler disabled");
            return Ok(SchedulerHandle { tasks: Vec::new() });
        }

        let gen_engine = engine.clone();
        let gen_task = tokio::spawn(run_on(GENERATION_JOB, generation, move || {
            let engine = gen_engine.clone();
            async move {
                jobs::run_generation_job(&engine).await;
            }
        }));

        let sweep_task = tokio::spawn(run_on(EXPIRY_SWEEP_JOB, sweep, move || {
            let engine = engine.clone();
            async move {
                jobs::run_expiry_sweep_job(&engine).await;
            }
        }));

        tracing::info!(
            generation = %config.generation_cron,
            expiry_sweep = %config.expiry_sweep_cron,
            "scheduler started"
        );
        Ok(SchedulerHandle {
            tasks: vec![(GENERATION_JOB, gen_task), (EXPIRY_SWEEP_JOB, sweep_task)],
        })
    }
}

async fn run_on<F, Fut>(job: &'static str, cadence: Cadence, mut fire: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ()>,
{
    loop {
        let now = Utc::now();
        let next = cadence.next_after(now);
        events::job_scheduled(job, &next.to_rfc3339());
        let wait = (next - now).to_std().unwrap_or(Duration::ZERO);
        tokio::time::sleep(wait).await;
        fire().await;
    }
}

/// Owns the spawned job tasks. Dropping the handle aborts them.
pub struct SchedulerHandle {
    tasks: Vec<(&'static str, JoinHandle<()>)>,
}

impl SchedulerHandle {
    /// Names of the running jobs.
    pub fn jobs(&self) -> Vec<&'static str> {
        self.tasks.iter().map(|(name, _)| *name).collect()
    }

    pub fn is_running(&self) -> bool {
        self.tasks.iter().any(|(_, task)| !task.is_finished())
    }

    /// Abort every job and wait for the tasks to wind down. A run in progress is
    /// cancelled at its next await point.
    pub async fn shutdown(mut self) {
        for (job, task) in std::mem::take(&mut self.tasks) {
            task.abort();
            if let Err(e) = task.await {
                if !e.is_cancelled() {
                    tracing::error!(job, error = %e, "job task ended abnormally");
                }
            }
        }
        tracing::info!("scheduler stopped");
    }
}

impl Drop for SchedulerHandle {
    fn drop(&mut self) {
        for (_, task) in &self.tasks {
            task.abort();
        }
    }
}
