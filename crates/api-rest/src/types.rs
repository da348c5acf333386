//! Request and response bodies for both services.

use medcalc_core::{NumberRecord, ReportStatistics};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatbotHealthRes {
    pub status: String,
    pub model_loaded: bool,
}

// ---- medical chatbot ----

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatReq {
    pub user_input: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatRes {
    pub response: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConditionsRes {
    pub conditions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConditionDetailRes {
    pub condition: String,
    pub symptoms: Vec<String>,
    /// Numbered advice, one item per line.
    pub advice: String,
    pub prevention: Vec<String>,
    pub disclaimer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConditionNotFoundRes {
    pub error: String,
    pub available_conditions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfoRes {
    pub message: String,
    pub status: String,
    pub endpoints: BTreeMap<String, String>,
}

// ---- number calculator ----

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeReq {
    #[serde(default)]
    pub numbers: Option<Vec<i64>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeRes {
    pub results: Vec<NumberRecord>,
    pub statistics: ReportStatistics,
}

/// Statistics as sent back by a client; any field may be missing.
///
/// Unrecognised keys are dropped, but they still make the object non-empty, so the report
/// gets a footer with default values.
#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct StatisticsPayload {
    pub total: Option<usize>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub modes: Option<String>,
    #[serde(skip)]
    pub has_unknown_keys: bool,
}

#[derive(Deserialize)]
struct StatisticsFields {
    #[serde(default)]
    total: Option<usize>,
    #[serde(default)]
    mean: Option<f64>,
    #[serde(default)]
    median: Option<f64>,
    #[serde(default)]
    modes: Option<String>,
    #[serde(flatten)]
    unknown: BTreeMap<String, IgnoredAny>,
}

impl<'de> Deserialize<'de> for StatisticsPayload {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let fields = StatisticsFields::deserialize(deserializer)?;
        Ok(Self {
            total: fields.total,
            mean: fields.mean,
            median: fields.median,
            modes: fields.modes,
            has_unknown_keys: !fields.unknown.is_empty(),
        })
    }
}

impl StatisticsPayload {
    /// Fills missing fields with report defaults. An entirely empty object means "no footer".
    pub fn into_report_statistics(self) -> Option<ReportStatistics> {
        if self.total.is_none()
            && self.mean.is_none()
            && self.median.is_none()
            && self.modes.is_none()
            && !self.has_unknown_keys
        {
            return None;
        }

        Some(ReportStatistics {
            total: self.total.unwrap_or(0),
            mean: self.mean.unwrap_or(0.0),
            median: self.median.unwrap_or(0.0),
            modes: self.modes.unwrap_or_else(|| "N/A".to_string()),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SaveReportReq {
    #[serde(default)]
    pub results: Vec<NumberRecord>,
    #[serde(default)]
    pub statistics: Option<StatisticsPayload>,
    #[serde(default)]
    pub filename: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SaveReportRes {
    pub message: String,
    pub filepath: String,
}
