// HTTP request handlers
use crate::application::enso_service::OniView;
use crate::domain::dashboard::render_chart;
use crate::domain::severity::Metric;
use crate::domain::site::{Locale, Site, SITE_ORDER};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct LangQuery {
    pub lang: Option<String>,
}

impl LangQuery {
    fn locale(&self) -> Locale {
        self.lang
            .as_deref()
            .map(Locale::from_tag)
            .unwrap_or(Locale::En)
    }
}

#[derive(Serialize)]
pub struct SiteInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub color: &'static str,
    pub mmm: f64,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// List the monitored sites with their display metadata
pub async fn list_sites(Query(query): Query<LangQuery>) -> Json<Vec<SiteInfo>> {
    let locale = query.locale();
    let sites = SITE_ORDER
        .iter()
        .map(|site: &Site| SiteInfo {
            id: site.id(),
            name: site.name(locale),
            color: site.color(),
            mmm: site.mmm(),
        })
        .collect();
    Json(sites)
}

/// Full dashboard: one classified status card per metric
pub async fn get_dashboard(
    Query(query): Query<LangQuery>,
    State(state): State<Arc<AppState>>,
) -> Json<crate::domain::dashboard::DashboardView> {
    let dashboard = state.dashboard_service.build_dashboard().await;
    Json(dashboard.render(query.locale()))
}

/// Compact last-N-years DHW chart, served from the dashboard's cache
pub async fn get_dhw_mini(
    Query(query): Query<LangQuery>,
    State(state): State<Arc<AppState>>,
) -> Json<crate::domain::dashboard::ChartView> {
    let slice = state.dashboard_service.dhw_mini_chart().await;
    Json(render_chart(&slice, Metric::DhwPeak, query.locale()))
}

/// ONI chart and current ENSO phase
pub async fn get_oni(
    Query(query): Query<LangQuery>,
    State(state): State<Arc<AppState>>,
) -> Json<OniView> {
    let locale = query.locale();
    match state.enso_service.oni_overview().await {
        Ok(overview) => Json(overview.render(locale)),
        Err(e) => {
            tracing::error!("Error fetching ONI series: {e:#}");
            // Degrade to an empty widget rather than failing the page.
            Json(OniView {
                lang: locale,
                status: None,
                bars: Vec::new(),
            })
        }
    }
}
