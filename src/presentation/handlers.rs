// HTTP request handlers
use crate::domain::month::Month;
use crate::domain::report::ReportKind;
use crate::domain::selection::{DeviceSelection, FilterSelection};
use crate::error::{DashboardError, LoadErrorKind};
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const LOAD_ERROR_MESSAGE: &str = "Erro ao carregar os dados";

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub month: Option<String>,
    pub device: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsView {
    pub months: Vec<Month>,
    pub devices: Vec<String>,
}

/// The single error state shown instead of the charts
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadErrorView {
    pub message: &'static str,
    pub kind: LoadErrorKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<ReportKind>,
    pub detail: String,
}

impl From<&DashboardError> for LoadErrorView {
    fn from(err: &DashboardError) -> Self {
        Self {
            message: LOAD_ERROR_MESSAGE,
            kind: err.kind(),
            report: err.report(),
            detail: err.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct BadRequestView {
    message: String,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Months and device choices for the selection widgets
pub async fn list_options(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let compress = accepts_brotli(&headers);

    match state.options_service.options().await {
        Ok(options) => {
            let view = OptionsView {
                devices: options.device_choices(),
                months: options.months,
            };
            respond(StatusCode::OK, &view, compress).await
        }
        Err(e) => load_error(&DashboardError::from(e), compress).await,
    }
}

/// Render the dashboard for the requested month and device
pub async fn render_dashboard(
    Query(query): Query<DashboardQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let compress = accepts_brotli(&headers);

    let device = query
        .device
        .as_deref()
        .map(DeviceSelection::parse)
        .unwrap_or_default();

    let selection = match query.month.as_deref().map(str::parse::<Month>) {
        Some(Ok(month)) => FilterSelection::new(month, device),
        Some(Err(e)) => {
            let view = BadRequestView { message: e.to_string() };
            return respond(StatusCode::BAD_REQUEST, &view, compress).await;
        }
        None => match state.options_service.default_selection().await {
            Ok(default) => FilterSelection::new(default.month, device),
            Err(e) => return load_error(&e, compress).await,
        },
    };

    match state.dashboard_service.render(&selection).await {
        Ok(dashboard) => respond(StatusCode::OK, &dashboard, compress).await,
        Err(e) => load_error(&e, compress).await,
    }
}

async fn load_error(err: &DashboardError, compress: bool) -> Response {
    tracing::error!("Dashboard data load failed ({:?}): {}", err.kind(), err);
    respond(StatusCode::BAD_GATEWAY, &LoadErrorView::from(err), compress).await
}

async fn respond<T: Serialize>(status: StatusCode, data: &T, compress: bool) -> Response {
    match json_response(status, data, compress).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}
