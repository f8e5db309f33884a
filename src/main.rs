// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod error;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_service::DashboardService;
use crate::application::options_service::OptionsService;
use crate::application::report_source::ReportSource;
use crate::infrastructure::config::load_dashboard_config;
use crate::infrastructure::reporting_api::ReportingApiClient;
use crate::presentation::app_state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_dashboard_config()?;
    let palette = config.dashboard.palette()?;

    // Create report source (infrastructure layer)
    let source: Arc<dyn ReportSource> = Arc::new(ReportingApiClient::new(
        config.api.base_url.clone(),
        config.api.start_date.clone(),
        config.api.end_date.clone(),
        config.api.timeout(),
    )?);

    // Create services (application layer)
    let options_service = OptionsService::new(source.clone());
    let dashboard_service = DashboardService::new(
        source,
        palette,
        config.dashboard.title.clone(),
        config.api.timeout(),
    );

    // Selection options are loaded once up front; a failure here is retried
    // on the first /options or /dashboard request.
    if let Err(e) = options_service.refresh().await {
        tracing::warn!("Could not load months and devices: {}", e);
    }

    let state = Arc::new(AppState {
        options_service,
        dashboard_service,
    });

    // Build router (presentation layer)
    let router = presentation::router(state);

    let addr: SocketAddr = config.server.bind.parse()?;
    tracing::info!("Starting energy-dashboard service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
