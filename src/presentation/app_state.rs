// Application state for HTTP handlers
use crate::application::dashboard_service::DashboardService;
use crate::application::options_service::OptionsService;

#[derive(Clone)]
pub struct AppState {
    pub options_service: OptionsService,
    pub dashboard_service: DashboardService,
}
