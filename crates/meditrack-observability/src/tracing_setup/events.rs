//! Structured log events for key engine operations.
//!
//! Each function emits a `tracing` event with an `event` field naming it.

/// Log a completed generate-and-replace run.
pub fn generation_completed(inserted: usize, deleted: usize, elapsed_ms: u128) {
    tracing::info!(
        event = "generation_completed",
        inserted = inserted,
        deleted = deleted,
        elapsed_ms = elapsed_ms as u64,
        "alert generation completed"
    );
}

/// Log a failed generation run. The run is reported, never raised.
pub fn generation_failed(error: &str) {
    tracing::error!(
        event = "generation_failed",
        error = %error,
        "alert generation failed"
    );
}

/// Log an upsert-if-absent sweep (expiry, demand prediction, stock check).
pub fn sweep_completed(sweep: &str, inserted: usize, skipped: usize) {
    tracing::info!(
        event = "sweep_completed",
        sweep = %sweep,
        inserted = inserted,
        skipped = skipped,
        "alert sweep completed"
    );
}

/// Log a sweep that failed before reconciling.
pub fn sweep_failed(sweep: &str, error: &str) {
    tracing::error!(
        event = "sweep_failed",
        sweep = %sweep,
        error = %error,
        "alert sweep failed"
    );
}

/// Log a demand factor that cannot be used and was scored as neutral.
pub fn config_fault(medicine_id: &str, key: &str, value: f64) {
    tracing::warn!(
        event = "config_fault",
        medicine_id = %medicine_id,
        key = %key,
        value = value,
        "unusable demand factor, scoring as 1.0"
    );
}

/// Log an alert status transition.
pub fn alert_status_changed(alert_id: &str, from: &str, to: &str, actor: Option<&str>) {
    tracing::info!(
        event = "alert_status_changed",
        alert_id = %alert_id,
        from = %from,
        to = %to,
        actor = actor.unwrap_or("-"),
        "alert status changed"
    );
}

/// Log a scheduled job firing.
pub fn job_fired(job: &str) {
    tracing::info!(event = "job_fired", job = %job, "scheduled job fired");
}

/// Log when a job will next run.
pub fn job_scheduled(job: &str, next_run: &str) {
    tracing::debug!(
        event = "job_scheduled",
        job = %job,
        next_run = %next_run,
        "scheduled job armed"
    );
}
