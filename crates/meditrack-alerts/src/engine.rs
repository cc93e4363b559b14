//! AlertEngine: the alert operations callers invoke, bound to a store.
//!
//! Every write path takes the same run lock: batch generation, sweeps, status
//! changes and stock updates. A manual generate and a scheduled one never interleave
//! their delete and insert, and a status change never lands between them.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::Instrument;

use meditrack_core::constants::DEFAULT_RECENT_ALERTS;
use meditrack_core::errors::{AlertError, MediTrackError, MediTrackResult};
use meditrack_core::models::{
    Alert, AlertDraft, AlertFilter, AlertStatus, AlertSummary, AlertType, DemandPrediction, GenerationReport,
    ReconcileOutcome, Severity, SeverityCounts, StatusCounts,
};
use meditrack_core::traits::{IAlertStore, IMedicineStore};
use meditrack_core::MediTrackConfig;
use meditrack_observability::{events, expiry_sweep_span, generation_span, prediction_span};

use crate::lifecycle;
use crate::passes::low_stock;
use crate::reconcile::{self, Reconciled};
use crate::synthesizer::AlertSynthesizer;

pub struct AlertEngine<S> {
    store: Arc<S>,
    synthesizer: AlertSynthesizer,
    /// Held for the duration of any alert write.
    run_lock: Arc<Mutex<()>>,
    synthesis_timeout: Duration,
}

impl<S> Clone for AlertEngine<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            synthesizer: self.synthesizer.clone(),
            run_lock: Arc::clone(&self.run_lock),
            synthesis_timeout: self.synthesis_timeout,
        }
    }
}

impl<S> AlertEngine<S>
where
    S: IMedicineStore + IAlertStore + 'static,
{
    pub fn new(store: Arc<S>, config: &MediTrackConfig) -> Self {
        Self::with_synthesizer(
            store,
            AlertSynthesizer::from_config(config),
            Duration::from_secs(config.alerts.synthesis_timeout_secs),
        )
    }

    pub fn with_synthesizer(
        store: Arc<S>,
        synthesizer: AlertSynthesizer,
        synthesis_timeout: Duration,
    ) -> Self {
        Self {
            store,
            synthesizer,
            run_lock: Arc::new(Mutex::new(())),
            synthesis_timeout,
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn synthesizer(&self) -> &AlertSynthesizer {
        &self.synthesizer
    }

    // ── Generation ──────────────────────────────────────────────────────

    pub async fn generate_alerts(&self) -> GenerationReport {
        self.generate_alerts_at(Utc::now()).await
    }

    /// Synthesize the full batch and replace every unresolved alert with it.
    /// Never fails: store faults and timeouts come back as `success: false`.
    pub async fn generate_alerts_at(&self, now: DateTime<Utc>) -> GenerationReport {
        let _guard = self.run_lock.lock().await;
        let started = Instant::now();

        let result = match tokio::time::timeout(self.synthesis_timeout, self.synthesize_and_replace(now))
            .await
        {
            Ok(result) => result,
            Err(_) => Err(AlertError::SynthesisTimeout {
                timeout_secs: self.synthesis_timeout.as_secs(),
            }
            .into()),
        };

        match result {
            Ok(outcome) => {
                events::generation_completed(
                    outcome.inserted,
                    outcome.deleted,
                    started.elapsed().as_millis(),
                );
                GenerationReport::succeeded(outcome.inserted, outcome.deleted)
            }
            Err(e) => {
                let message = e.to_string();
                events::generation_failed(&message);
                GenerationReport::failed(message)
            }
        }
    }

    async fn synthesize_and_replace(&self, now: DateTime<Utc>) -> MediTrackResult<ReconcileOutcome> {
        let medicines = self.store.find_all_medicines().await?;
        let span = generation_span!(medicines.len());
        async {
            let drafts = self.synthesizer.synthesize(&medicines, now);
            let reconciled = reconcile::reconcile(
                reconcile::ReconcileStrategy::ReplaceOnGenerate,
                self.store.as_ref(),
                &drafts,
                now,
            )
            .await?;
            Ok(reconciled.outcome)
        }
        .instrument(span)
        .await
    }

    // ── Upsert-if-absent paths ──────────────────────────────────────────

    pub async fn predict_demand(&self) -> MediTrackResult<Vec<DemandPrediction>> {
        self.predict_demand_at(Utc::now()).await
    }

    /// Demand report for every medicine. Also inserts `high_demand_predicted` and
    /// `disease_pattern_risk` alerts for qualifying rows that have none outstanding.
    pub async fn predict_demand_at(
        &self,
        now: DateTime<Utc>,
    ) -> MediTrackResult<Vec<DemandPrediction>> {
        let medicines = self.store.find_all_medicines().await?;
        let span = prediction_span!(medicines.len());
        async {
            let (rows, drafts) = self.synthesizer.predict(&medicines, now);
            self.upsert("demand", &drafts, now).await?;
            Ok(rows)
        }
        .instrument(span)
        .await
    }

    pub async fn sweep_expiring(&self) -> MediTrackResult<ReconcileOutcome> {
        self.sweep_expiring_at(Utc::now()).await
    }

    /// Daily expiry sweep: expiry pass with the sweep cutoff, upsert-if-absent.
    pub async fn sweep_expiring_at(&self, now: DateTime<Utc>) -> MediTrackResult<ReconcileOutcome> {
        let policy = self.synthesizer.sweep_policy();
        async {
            let medicines = self.store.find_expiring(now, policy.horizon(now)).await?;
            let drafts = self.synthesizer.expiry_sweep(&medicines, now);
            Ok(self.upsert("expiry", &drafts, now).await?.outcome)
        }
        .instrument(expiry_sweep_span!(policy.window_days))
        .await
    }

    /// Raise a low-stock alert for one medicine if it is at or below its minimum
    /// and has no outstanding one. Returns the new alert.
    pub async fn check_stock(
        &self,
        medicine_id: &str,
        now: DateTime<Utc>,
    ) -> MediTrackResult<Option<Alert>> {
        let medicine = self
            .store
            .find_medicine(medicine_id)
            .await?
            .ok_or_else(|| MediTrackError::MedicineNotFound {
                id: medicine_id.to_string(),
            })?;
        let Some(draft) = low_stock::draft_for(&medicine) else {
            return Ok(None);
        };
        let reconciled = self.upsert("stock_check", &[draft], now).await?;
        Ok(reconciled.inserted.into_iter().next())
    }

    /// Record a new stock level after a transaction, then run [`Self::check_stock`].
    pub async fn apply_stock_level(
        &self,
        medicine_id: &str,
        current_stock: u32,
        now: DateTime<Utc>,
    ) -> MediTrackResult<Option<Alert>> {
        {
            let _guard = self.run_lock.lock().await;
            self.store.update_stock(medicine_id, current_stock).await?;
        }
        self.check_stock(medicine_id, now).await
    }

    async fn upsert(
        &self,
        sweep: &str,
        drafts: &[AlertDraft],
        now: DateTime<Utc>,
    ) -> MediTrackResult<Reconciled> {
        let _guard = self.run_lock.lock().await;
        let result = reconcile::reconcile(
            reconcile::ReconcileStrategy::UpsertIfAbsent,
            self.store.as_ref(),
            drafts,
            now,
        )
        .await;
        match &result {
            Ok(r) => events::sweep_completed(sweep, r.outcome.inserted, r.outcome.skipped),
            Err(e) => events::sweep_failed(sweep, &e.to_string()),
        }
        result
    }

    // ── Status and queries ──────────────────────────────────────────────

    /// Move an alert through its lifecycle. Setting the current status returns the
    /// alert unchanged without writing.
    pub async fn update_alert_status(
        &self,
        id: &str,
        status: AlertStatus,
        actor: Option<&str>,
        now: DateTime<Utc>,
    ) -> MediTrackResult<Alert> {
        let _guard = self.run_lock.lock().await;
        let alert = self
            .store
            .get_alert(id)
            .await?
            .ok_or_else(|| MediTrackError::AlertNotFound { id: id.to_string() })?;
        let Some(next) = lifecycle::transition(&alert, status, actor, now)? else {
            return Ok(alert);
        };
        let saved = self.store.save_alert(&next).await?;
        events::alert_status_changed(&saved.id, alert.status.as_str(), saved.status.as_str(), actor);
        Ok(saved)
    }

    pub async fn list_alerts(&self, filter: &AlertFilter) -> MediTrackResult<Vec<Alert>> {
        self.store.list_alerts(filter).await
    }

    /// Newest unresolved alerts. `limit` defaults to 5.
    pub async fn recent_alerts(&self, limit: Option<usize>) -> MediTrackResult<Vec<Alert>> {
        let filter = AlertFilter::unresolved().with_limit(limit.unwrap_or(DEFAULT_RECENT_ALERTS));
        self.store.list_alerts(&filter).await
    }

    /// Dashboard counters. Severity and type counts cover unresolved alerts only;
    /// types with no unresolved alerts are omitted.
    pub async fn alert_summary(&self) -> MediTrackResult<AlertSummary> {
        let store = self.store.as_ref();
        let unresolved = &AlertStatus::UNRESOLVED;

        let by_status = StatusCounts {
            new: store.count_alerts(&[AlertStatus::New], None, None).await?,
            read: store.count_alerts(&[AlertStatus::Read], None, None).await?,
            resolved: store.count_alerts(&[AlertStatus::Resolved], None, None).await?,
        };
        let by_severity = SeverityCounts {
            high: store.count_alerts(unresolved, Some(Severity::High), None).await?,
            medium: store.count_alerts(unresolved, Some(Severity::Medium), None).await?,
            low: store.count_alerts(unresolved, Some(Severity::Low), None).await?,
        };
        let mut by_type = BTreeMap::new();
        for alert_type in AlertType::ALL {
            let n = store.count_alerts(unresolved, None, Some(alert_type)).await?;
            if n > 0 {
                by_type.insert(alert_type, n);
            }
        }

        Ok(AlertSummary {
            total: by_status.new + by_status.read + by_status.resolved,
            by_status,
            by_severity,
            by_type,
        })
    }
}
