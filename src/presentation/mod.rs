// Presentation layer - HTTP routes and handlers
pub mod app_state;
pub mod handlers;

use app_state::AppState;
use axum::{routing::get, Router};
use handlers::{health_check, list_options, render_dashboard};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/options", get(list_options))
        .route("/dashboard", get(render_dashboard))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
