//! # meditrack-forecast
//!
//! Demand forecasting from fixed multiplier tables: classify "now" into a season and
//! climate, look up the categories at risk under those conditions, and score each
//! medicine's demand multiplier with the reasons behind it.

pub mod calendar;
pub mod engine;
pub mod report;
pub mod risk;
pub mod scorer;

pub use engine::{DemandForecaster, ForecastContext};
pub use risk::{HighRiskCategories, RiskTables};
pub use scorer::{DemandScore, DemandScorer};
