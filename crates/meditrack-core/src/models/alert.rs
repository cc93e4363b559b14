use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::MediTrackError;

/// What condition raised an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    LowStock,
    Expiry,
    HighDemandPredicted,
    DiseasePatternRisk,
    RecommendedStock,
}

impl AlertType {
    pub const ALL: [AlertType; 5] = [
        AlertType::LowStock,
        AlertType::Expiry,
        AlertType::HighDemandPredicted,
        AlertType::DiseasePatternRisk,
        AlertType::RecommendedStock,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LowStock => "low_stock",
            Self::Expiry => "expiry",
            Self::HighDemandPredicted => "high_demand_predicted",
            Self::DiseasePatternRisk => "disease_pattern_risk",
            Self::RecommendedStock => "recommended_stock",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    #[default]
    Medium,
    High,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Low, Severity::Medium, Severity::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Alert lifecycle: `new -> read -> resolved`, or `new -> resolved`.
/// `resolved` is terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    #[default]
    New,
    Read,
    Resolved,
}

impl AlertStatus {
    pub const ALL: [AlertStatus; 3] = [AlertStatus::New, AlertStatus::Read, AlertStatus::Resolved];

    /// Statuses that count as outstanding.
    pub const UNRESOLVED: [AlertStatus; 2] = [AlertStatus::New, AlertStatus::Read];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Read => "read",
            Self::Resolved => "resolved",
        }
    }

    pub fn is_unresolved(&self) -> bool {
        !matches!(self, Self::Resolved)
    }
}

macro_rules! str_enum_impls {
    ($ty:ty, $field:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = MediTrackError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty>::ALL
                    .into_iter()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| MediTrackError::invalid_value($field, s))
            }
        }
    };
}

str_enum_impls!(AlertType, "alert type");
str_enum_impls!(Severity, "severity");
str_enum_impls!(AlertStatus, "alert status");

/// An alert as produced by synthesis, before it is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertDraft {
    pub medicine_id: String,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    /// Rendered once at synthesis time, never regenerated.
    pub message: String,
    pub severity: Severity,
}

impl AlertDraft {
    pub fn new(
        medicine_id: impl Into<String>,
        alert_type: AlertType,
        message: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            medicine_id: medicine_id.into(),
            alert_type,
            message: message.into(),
            severity,
        }
    }

    /// Materialize as a `new` alert with a fresh id.
    pub fn into_alert(self, now: DateTime<Utc>) -> Alert {
        Alert {
            id: uuid::Uuid::new_v4().to_string(),
            medicine_id: self.medicine_id,
            alert_type: self.alert_type,
            message: self.message,
            severity: self.severity,
            status: AlertStatus::New,
            resolved_by: None,
            resolved_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A persisted alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    pub medicine_id: String,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub message: String,
    pub severity: Severity,
    pub status: AlertStatus,
    /// Acting user; set only on transition to `resolved`.
    pub resolved_by: Option<String>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Alert {
    pub fn is_unresolved(&self) -> bool {
        self.status.is_unresolved()
    }

    /// The part of an alert that synthesis decides. Two runs over the same inventory
    /// produce equal drafts even though ids and timestamps differ.
    pub fn to_draft(&self) -> AlertDraft {
        AlertDraft {
            medicine_id: self.medicine_id.clone(),
            alert_type: self.alert_type,
            message: self.message.clone(),
            severity: self.severity,
        }
    }
}

/// Listing filter. Empty `statuses` matches every status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertFilter {
    pub statuses: Vec<AlertStatus>,
    pub alert_type: Option<AlertType>,
    pub severity: Option<Severity>,
    pub limit: Option<usize>,
}

impl AlertFilter {
    /// Only `new` and `read` alerts.
    pub fn unresolved() -> Self {
        Self {
            statuses: AlertStatus::UNRESOLVED.to_vec(),
            ..Default::default()
        }
    }

    pub fn with_status(mut self, status: AlertStatus) -> Self {
        self.statuses = vec![status];
        self
    }

    pub fn with_type(mut self, alert_type: AlertType) -> Self {
        self.alert_type = Some(alert_type);
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// In-memory evaluation, shared by stores that filter after loading.
    pub fn matches(&self, alert: &Alert) -> bool {
        (self.statuses.is_empty() || self.statuses.contains(&alert.status))
            && self.alert_type.map_or(true, |t| t == alert.alert_type)
            && self.severity.map_or(true, |s| s == alert.severity)
    }
}
