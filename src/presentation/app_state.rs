// Application state for HTTP handlers
use crate::application::dashboard_service::DashboardService;
use crate::application::enso_service::EnsoService;

#[derive(Clone)]
pub struct AppState {
    pub dashboard_service: DashboardService,
    pub enso_service: EnsoService,
}
