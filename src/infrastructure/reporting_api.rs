// Reporting API client implementation
use crate::application::report_source::ReportSource;
use crate::domain::report::{ActivePowerPayload, ConsumptionAnalysisPayload, ConsumptionPatternsPayload, ReportKind};
use crate::domain::selection::SelectionOptions;
use crate::error::ReportError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

const MAX_ERROR_BODY: usize = 512;

#[derive(Debug, Clone)]
pub struct ReportingApiClient {
    client: reqwest::Client,
    base_url: String,
    start_date: String,
    end_date: String,
    timeout: Duration,
}

impl ReportingApiClient {
    pub fn new(
        base_url: String,
        start_date: String,
        end_date: String,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: format!("{}/", base_url.trim_end_matches('/')),
            start_date,
            end_date,
            timeout,
        })
    }

    fn build_report_url(&self, report: ReportKind) -> String {
        if report.is_windowed() {
            format!(
                "{}{}?startDate={}&endDate={}",
                self.base_url,
                report.path(),
                urlencoding::encode(&self.start_date),
                urlencoding::encode(&self.end_date)
            )
        } else {
            format!("{}{}", self.base_url, report.path())
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, report: ReportKind) -> Result<T, ReportError> {
        let url = self.build_report_url(report);
        tracing::debug!("Fetching {} from {}", report, url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|source| self.transport_error(report, source))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let mut body = response.text().await.unwrap_or_default();
            if body.len() > MAX_ERROR_BODY {
                let mut end = MAX_ERROR_BODY;
                while !body.is_char_boundary(end) {
                    end -= 1;
                }
                body.truncate(end);
            }
            return Err(ReportError::Status { report, status, body });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|source| self.transport_error(report, source))?;

        serde_json::from_slice(&bytes).map_err(|source| ReportError::Decode { report, source })
    }

    fn transport_error(&self, report: ReportKind, source: reqwest::Error) -> ReportError {
        if source.is_timeout() {
            ReportError::Timeout {
                report,
                secs: self.timeout.as_secs(),
            }
        } else {
            ReportError::Request { report, source }
        }
    }
}

#[async_trait]
impl ReportSource for ReportingApiClient {
    async fn consumption_analysis(&self) -> Result<ConsumptionAnalysisPayload, ReportError> {
        self.fetch(ReportKind::ConsumptionAnalysis).await
    }

    async fn active_power(&self) -> Result<ActivePowerPayload, ReportError> {
        self.fetch(ReportKind::ActivePower).await
    }

    async fn consumption_patterns(&self) -> Result<ConsumptionPatternsPayload, ReportError> {
        self.fetch(ReportKind::ConsumptionPatterns).await
    }

    async fn devices_and_months(&self) -> Result<SelectionOptions, ReportError> {
        self.fetch(ReportKind::DevicesAndMonths).await
    }
}
