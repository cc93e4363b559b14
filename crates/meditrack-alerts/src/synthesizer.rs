//! AlertSynthesizer: runs the detection passes over one inventory snapshot.

use chrono::{DateTime, Utc};
use tracing::debug;

use meditrack_core::config::AlertConfig;
use meditrack_core::models::{AlertDraft, DemandPrediction, Medicine};
use meditrack_core::MediTrackConfig;
use meditrack_forecast::DemandForecaster;

use crate::passes::{self, ExpiryPolicy};

/// Pure synthesis: no store access, `now` always supplied by the caller.
#[derive(Debug, Clone, Default)]
pub struct AlertSynthesizer {
    forecaster: DemandForecaster,
    config: AlertConfig,
}

impl AlertSynthesizer {
    pub fn new(forecaster: DemandForecaster, config: AlertConfig) -> Self {
        Self { forecaster, config }
    }

    pub fn from_config(config: &MediTrackConfig) -> Self {
        Self::new(
            DemandForecaster::from_config(&config.forecast),
            config.alerts.clone(),
        )
    }

    pub fn forecaster(&self) -> &DemandForecaster {
        &self.forecaster
    }

    pub fn config(&self) -> &AlertConfig {
        &self.config
    }

    pub fn expiry_policy(&self) -> ExpiryPolicy {
        ExpiryPolicy::on_demand(&self.config)
    }

    pub fn sweep_policy(&self) -> ExpiryPolicy {
        ExpiryPolicy::sweep(&self.config)
    }

    /// Full batch for a generate run, in pass order: low stock, expiry, demand,
    /// substitutes. Within a pass, drafts follow `medicines` order.
    pub fn synthesize(&self, medicines: &[Medicine], now: DateTime<Utc>) -> Vec<AlertDraft> {
        let ctx = self.forecaster.context(now);

        let low_stock = passes::low_stock::detect(medicines);
        let expiry = passes::expiry::detect(medicines, now, self.expiry_policy());
        let demand = passes::demand::detect(
            medicines,
            &self.forecaster,
            &ctx,
            self.config.demand_alert_threshold,
        );
        let substitutes = passes::substitutes::detect(
            medicines,
            &ctx.high_risk,
            self.config.well_stocked_factor,
            self.config.max_alternatives,
        );
        debug!(
            conditions = %ctx.conditions,
            low_stock = low_stock.len(),
            expiry = expiry.len(),
            demand = demand.len(),
            substitutes = substitutes.len(),
            "synthesized alert batch"
        );

        let mut drafts =
            Vec::with_capacity(low_stock.len() + expiry.len() + demand.len() + substitutes.len());
        drafts.extend(low_stock);
        drafts.extend(expiry);
        drafts.extend(demand);
        drafts.extend(substitutes);
        drafts
    }

    /// Demand report rows and the drafts the prediction path raises with them.
    pub fn predict(
        &self,
        medicines: &[Medicine],
        now: DateTime<Utc>,
    ) -> (Vec<DemandPrediction>, Vec<AlertDraft>) {
        let ctx = self.forecaster.context(now);
        passes::demand::sweep_drafts(
            medicines,
            &self.forecaster,
            &ctx,
            self.config.demand_alert_threshold,
            self.config.well_stocked_factor,
        )
    }

    /// Expiry drafts under the daily sweep's severity cutoff.
    pub fn expiry_sweep(&self, medicines: &[Medicine], now: DateTime<Utc>) -> Vec<AlertDraft> {
        passes::expiry::detect(medicines, now, self.sweep_policy())
    }
}
