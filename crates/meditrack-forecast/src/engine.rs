//! DemandForecaster: risk tables and scorer behind one handle.

use chrono::{DateTime, Utc};

use meditrack_core::config::ForecastConfig;
use meditrack_core::models::{Conditions, DemandPrediction, Medicine};

use crate::calendar;
use crate::report;
use crate::risk::{HighRiskCategories, RiskTables};
use crate::scorer::{DemandScore, DemandScorer};

/// Everything a caller needs to score an inventory at a given instant.
#[derive(Debug, Clone, Default)]
pub struct DemandForecaster {
    tables: RiskTables,
    scorer: DemandScorer,
}

/// Conditions and risk set computed once per run.
#[derive(Debug, Clone)]
pub struct ForecastContext {
    pub conditions: Conditions,
    pub high_risk: HighRiskCategories,
}

impl DemandForecaster {
    pub fn new(tables: RiskTables, scorer: DemandScorer) -> Self {
        Self { tables, scorer }
    }

    pub fn from_config(config: &ForecastConfig) -> Self {
        Self::new(
            RiskTables::from_config(&config.risk_tables),
            DemandScorer::from_config(config),
        )
    }

    pub fn tables(&self) -> &RiskTables {
        &self.tables
    }

    pub fn scorer(&self) -> &DemandScorer {
        &self.scorer
    }

    pub fn context(&self, now: DateTime<Utc>) -> ForecastContext {
        let conditions = calendar::classify(now);
        ForecastContext {
            conditions,
            high_risk: self.tables.for_conditions(conditions),
        }
    }

    pub fn score(&self, medicine: &Medicine, ctx: &ForecastContext) -> DemandScore {
        self.scorer.score(medicine, &ctx.conditions, &ctx.high_risk)
    }

    /// Report rows for every medicine, in input order.
    pub fn report(&self, medicines: &[Medicine], now: DateTime<Utc>) -> Vec<DemandPrediction> {
        let ctx = self.context(now);
        tracing::debug!(
            conditions = %ctx.conditions,
            high_risk = ?ctx.high_risk.iter().collect::<Vec<_>>(),
            "building demand report"
        );
        medicines
            .iter()
            .map(|m| report::prediction_row(m, &self.score(m, &ctx), &ctx.high_risk))
            .collect()
    }
}
