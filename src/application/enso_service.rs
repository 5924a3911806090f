// ENSO service - ONI chart data and current-phase status
use crate::application::metrics_repository::MetricsRepository;
use crate::domain::enso::{is_bleaching_year, oni_color, phase, yearly_extremes, OniReading};
use crate::domain::site::Locale;
use serde::Serialize;
use std::sync::Arc;

#[derive(Clone)]
pub struct EnsoService {
    repository: Arc<dyn MetricsRepository>,
    since_year: i32,
}

/// Locale-free ONI state: the yearly extreme series for the chart plus the
/// most recent season for the current-status line.
#[derive(Debug, Clone)]
pub struct OniOverview {
    pub yearly: Vec<OniReading>,
    pub latest: Option<OniReading>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OniStatusView {
    pub year: i32,
    pub season: String,
    pub anomaly: f64,
    pub phase: &'static str,
    pub css_class: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct OniBarView {
    pub year: i32,
    pub anomaly: f64,
    pub color: &'static str,
    pub bleaching: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct OniView {
    pub lang: Locale,
    pub status: Option<OniStatusView>,
    pub bars: Vec<OniBarView>,
}

impl EnsoService {
    pub fn new(repository: Arc<dyn MetricsRepository>, since_year: i32) -> Self {
        Self {
            repository,
            since_year,
        }
    }

    pub async fn oni_overview(&self) -> anyhow::Result<OniOverview> {
        let rows = self.repository.oni_series(self.since_year).await?;
        Ok(OniOverview {
            latest: rows.last().cloned(),
            yearly: yearly_extremes(&rows),
        })
    }
}

impl OniOverview {
    pub fn render(&self, locale: Locale) -> OniView {
        OniView {
            lang: locale,
            status: self.latest.as_ref().map(|r| OniStatusView {
                year: r.year,
                season: r.season.clone(),
                anomaly: r.anomaly,
                phase: phase(r.anomaly).label(locale),
                css_class: phase(r.anomaly).css_class(),
            }),
            bars: self
                .yearly
                .iter()
                .map(|r| OniBarView {
                    year: r.year,
                    anomaly: r.anomaly,
                    color: oni_color(r.anomaly),
                    bleaching: is_bleaching_year(r.year),
                })
                .collect(),
        }
    }
}
