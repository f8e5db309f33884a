// Report payloads as returned by the reporting API
use super::reading::{as_number, RawRecord};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;

/// The datasets fetched from the reporting API, one endpoint each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    ConsumptionAnalysis,
    ActivePower,
    ConsumptionPatterns,
    DevicesAndMonths,
}

impl ReportKind {
    pub fn path(&self) -> &'static str {
        match self {
            ReportKind::ConsumptionAnalysis => "consumption-analysis",
            ReportKind::ActivePower => "active-power",
            ReportKind::ConsumptionPatterns => "consumption-patterns",
            ReportKind::DevicesAndMonths => "devices-and-months",
        }
    }

    /// Whether the endpoint takes the `startDate`/`endDate` window
    pub fn is_windowed(&self) -> bool {
        matches!(self, ReportKind::ActivePower | ReportKind::ConsumptionPatterns)
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumptionAnalysisPayload {
    pub avg_power_per_day: Vec<RawRecord>,
    pub active_energy_per_day: Vec<RawRecord>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct ActivePowerPayload(pub Vec<RawRecord>);

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumptionPatternsPayload {
    pub peak_hours: Vec<RawRecord>,
    pub lowest_hours: Vec<RawRecord>,
    /// Absent or null when the API has no average for the window
    #[serde(default, deserialize_with = "lenient_number")]
    pub average_consumption: Option<f64>,
}

/// The three payloads one dashboard render needs
#[derive(Debug, Clone, PartialEq)]
pub struct ReportBundle {
    pub consumption_analysis: ConsumptionAnalysisPayload,
    pub active_power: ActivePowerPayload,
    pub consumption_patterns: ConsumptionPatternsPayload,
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(v) => as_number(&v)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("expected a number, got {}", v))),
    }
}
