// Main entry point - Dependency injection and server setup
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::application::dashboard_service::DashboardService;
use crate::application::enso_service::EnsoService;
use crate::infrastructure::config::{load_backend_config, load_dashboard_config};
use crate::infrastructure::rest_gateway::RestGateway;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    get_dashboard, get_dhw_mini, get_oni, health_check, list_sites,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load configuration
    let backend_config = load_backend_config()?;
    let dashboard_config = load_dashboard_config()?;
    let settings = dashboard_config.dashboard;

    // Create gateway (infrastructure layer)
    let gateway = Arc::new(RestGateway::new(
        backend_config.backend.base_url,
        backend_config.backend.api_key,
    ));

    // Create services (application layer)
    let dashboard_service = DashboardService::new(gateway.clone(), settings.clone());
    let enso_service = EnsoService::new(gateway.clone(), settings.oni_since_year);

    // Create application state
    let state = Arc::new(AppState {
        dashboard_service,
        enso_service,
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/sites", get(list_sites))
        .route("/dashboard", get(get_dashboard))
        .route("/charts/dhw-mini", get(get_dhw_mini))
        .route("/oni", get(get_oni))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = "0.0.0.0:8080".parse()?;
    tracing::info!("Starting reef-telemetry service on {addr}");

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
