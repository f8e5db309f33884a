// Options service - Use case for listing selectable months and devices
use crate::application::report_source::ReportSource;
use crate::domain::selection::{FilterSelection, SelectionOptions};
use crate::error::{DashboardError, ReportError};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Fetches the months/devices list once and keeps it for the process.
#[derive(Clone)]
pub struct OptionsService {
    source: Arc<dyn ReportSource>,
    cache: Arc<RwLock<Option<SelectionOptions>>>,
}

impl OptionsService {
    pub fn new(source: Arc<dyn ReportSource>) -> Self {
        Self {
            source,
            cache: Arc::new(RwLock::new(None)),
        }
    }

    pub async fn options(&self) -> Result<SelectionOptions, ReportError> {
        if let Some(options) = self.cache.read().await.as_ref() {
            return Ok(options.clone());
        }
        self.refresh().await
    }

    /// Refetch and replace the cached list. On failure the previous list is kept.
    pub async fn refresh(&self) -> Result<SelectionOptions, ReportError> {
        let options = self.source.devices_and_months().await?;
        tracing::info!(
            "Loaded {} months and {} devices",
            options.months.len(),
            options.devices.len()
        );
        *self.cache.write().await = Some(options.clone());
        Ok(options)
    }

    pub async fn default_selection(&self) -> Result<FilterSelection, DashboardError> {
        self.options()
            .await?
            .default_selection()
            .ok_or(DashboardError::NoMonthsAvailable)
    }
}
