// Dashboard service - Use case for rendering the three report charts
use crate::application::pipeline::{self, palette::Palette};
use crate::application::report_source::ReportSource;
use crate::domain::dashboard::{Dashboard, DashboardLayout};
use crate::domain::report::{ReportBundle, ReportKind};
use crate::domain::selection::FilterSelection;
use crate::error::{DashboardError, ReportError};
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Clone)]
pub struct DashboardService {
    source: Arc<dyn ReportSource>,
    palette: Palette,
    title: String,
    fetch_timeout: Duration,
}

impl DashboardService {
    pub fn new(source: Arc<dyn ReportSource>, palette: Palette, title: String, fetch_timeout: Duration) -> Self {
        Self {
            source,
            palette,
            title,
            fetch_timeout,
        }
    }

    /// One render cycle. Either all three charts are built or none is.
    pub async fn render(&self, selection: &FilterSelection) -> Result<Dashboard, DashboardError> {
        let start_time = Instant::now();
        tracing::info!("Rendering dashboard for {} / {}", selection.month, selection.device);

        let reports = self.fetch_reports().await?;
        let layout = self.build_layout(&reports, selection)?;

        let dashboard = Dashboard::new(self.title.clone(), selection.clone(), layout);
        let empty = dashboard.charts().iter().filter(|chart| chart.is_empty()).count();
        tracing::info!(
            "Rendered dashboard for {} / {} in {}ms ({} empty charts)",
            selection.month,
            selection.device,
            start_time.elapsed().as_millis(),
            empty
        );
        Ok(dashboard)
    }

    async fn fetch_reports(&self) -> Result<ReportBundle, ReportError> {
        let (consumption_analysis, active_power, consumption_patterns) = tokio::try_join!(
            self.bounded(ReportKind::ConsumptionAnalysis, self.source.consumption_analysis()),
            self.bounded(ReportKind::ActivePower, self.source.active_power()),
            self.bounded(ReportKind::ConsumptionPatterns, self.source.consumption_patterns()),
        )?;

        Ok(ReportBundle {
            consumption_analysis,
            active_power,
            consumption_patterns,
        })
    }

    async fn bounded<T>(
        &self,
        report: ReportKind,
        fetch: impl Future<Output = Result<T, ReportError>>,
    ) -> Result<T, ReportError> {
        match tokio::time::timeout(self.fetch_timeout, fetch).await {
            Ok(result) => result,
            Err(_) => Err(ReportError::Timeout {
                report,
                secs: self.fetch_timeout.as_secs(),
            }),
        }
    }

    fn build_layout(&self, reports: &ReportBundle, selection: &FilterSelection) -> Result<DashboardLayout, DashboardError> {
        let top = pipeline::consumption_analysis(&reports.consumption_analysis, selection, &self.palette)
            .map_err(|source| DashboardError::Pipeline {
                report: ReportKind::ConsumptionAnalysis,
                source,
            })?;

        let bottom_left = pipeline::active_power(&reports.active_power, selection, &self.palette).map_err(|source| {
            DashboardError::Pipeline {
                report: ReportKind::ActivePower,
                source,
            }
        })?;

        let bottom_right = pipeline::consumption_patterns(&reports.consumption_patterns, selection, &self.palette)
            .map_err(|source| DashboardError::Pipeline {
                report: ReportKind::ConsumptionPatterns,
                source,
            })?;

        Ok(DashboardLayout {
            top,
            bottom_left,
            bottom_right,
        })
    }
}
