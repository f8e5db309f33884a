// Source trait for reporting API data access
use crate::domain::report::{ActivePowerPayload, ConsumptionAnalysisPayload, ConsumptionPatternsPayload};
use crate::domain::selection::SelectionOptions;
use crate::error::ReportError;
use async_trait::async_trait;

#[async_trait]
pub trait ReportSource: Send + Sync {
    /// Daily average power and active energy per device
    async fn consumption_analysis(&self) -> Result<ConsumptionAnalysisPayload, ReportError>;

    /// Hourly active power per device within the configured window
    async fn active_power(&self) -> Result<ActivePowerPayload, ReportError>;

    /// Peak and lowest consumption hours within the configured window
    async fn consumption_patterns(&self) -> Result<ConsumptionPatternsPayload, ReportError>;

    /// Months and devices available for selection
    async fn devices_and_months(&self) -> Result<SelectionOptions, ReportError>;
}

#[cfg(test)]
pub mod fixtures {
    use super::*;
    use crate::domain::report::ReportKind;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// In-memory source answering from JSON documents. A report without a
    /// document answers with a 503; a stalled report never answers.
    #[derive(Default)]
    pub struct StaticReportSource {
        pub consumption_analysis: Option<Value>,
        pub active_power: Option<Value>,
        pub consumption_patterns: Option<Value>,
        pub devices_and_months: Option<Value>,
        pub stalled: Option<ReportKind>,
        pub options_calls: AtomicUsize,
    }

    impl StaticReportSource {
        pub fn healthy() -> Self {
            Self {
                consumption_analysis: Some(json!({
                    "avgPowerPerDay": [
                        {"deviceId": "d1", "date": "2024-01-01", "avgPowerPerDay": 40},
                        {"deviceId": "d2", "date": "2024-01-01", "avgPowerPerDay": 25}
                    ],
                    "activeEnergyPerDay": [
                        {"deviceId": "d1", "date": "2024-01-01", "activeEnergyPerDay": 960},
                        {"deviceId": "d2", "date": "2024-01-01", "activeEnergyPerDay": 600}
                    ]
                })),
                active_power: Some(json!([
                    {"deviceId": "d1", "hour": "2024-01-01T00:00:00Z", "activePowerPerHour": 38},
                    {"deviceId": "d2", "hour": "2024-01-01T00:00:00Z", "activePowerPerHour": 21},
                    {"deviceId": "d1", "hour": "2024-02-01T00:00:00Z", "activePowerPerHour": 41}
                ])),
                consumption_patterns: Some(json!({
                    "peakHours": [{"deviceId": "d1", "hour": "2024-01-01T10:00:00Z", "energyPerHour": 5}],
                    "lowestHours": [{"deviceId": "d1", "hour": "2024-01-01T03:00:00Z", "energyPerHour": 1}],
                    "averageConsumption": 3
                })),
                devices_and_months: Some(json!({
                    "months": ["2024-01", "2024-02"],
                    "devices": ["d1", "d2"]
                })),
                stalled: None,
                options_calls: AtomicUsize::new(0),
            }
        }

        async fn answer<T: serde::de::DeserializeOwned>(
            &self,
            report: ReportKind,
            document: &Option<Value>,
        ) -> Result<T, ReportError> {
            if self.stalled == Some(report) {
                tokio::time::sleep(Duration::from_secs(3600)).await;
            }
            let document = document.clone().ok_or(ReportError::Status {
                report,
                status: 503,
                body: "unavailable".to_string(),
            })?;
            serde_json::from_value(document).map_err(|source| ReportError::Decode { report, source })
        }
    }

    #[async_trait]
    impl ReportSource for StaticReportSource {
        async fn consumption_analysis(&self) -> Result<ConsumptionAnalysisPayload, ReportError> {
            self.answer(ReportKind::ConsumptionAnalysis, &self.consumption_analysis)
                .await
        }

        async fn active_power(&self) -> Result<ActivePowerPayload, ReportError> {
            self.answer(ReportKind::ActivePower, &self.active_power).await
        }

        async fn consumption_patterns(&self) -> Result<ConsumptionPatternsPayload, ReportError> {
            self.answer(ReportKind::ConsumptionPatterns, &self.consumption_patterns)
                .await
        }

        async fn devices_and_months(&self) -> Result<SelectionOptions, ReportError> {
            self.options_calls.fetch_add(1, Ordering::SeqCst);
            self.answer(ReportKind::DevicesAndMonths, &self.devices_and_months)
                .await
        }
    }
}
