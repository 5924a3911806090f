// Dashboard domain model: status cards and their locale-aware rendering
use crate::domain::series::{colorize, ChartSlice};
use crate::domain::severity::{Classification, Metric, SeverityTier, StatusText};
use crate::domain::site::{Locale, Site};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// One metric's worth of dashboard state, locale-free. Rendering the same
/// card in another language never needs a re-fetch.
#[derive(Debug, Clone)]
pub struct StatusCard {
    pub metric: Metric,
    pub classification: Classification,
    /// Latest value per site (missing sites had no data).
    pub latest: BTreeMap<Site, f64>,
    /// Estimated observation date, where the metric has one.
    pub observed: Option<NaiveDate>,
    pub chart: ChartSlice,
}

impl StatusCard {
    /// Fallback card for a failed or empty fetch: Safe tier, "no data" text,
    /// empty chart.
    pub fn no_data(metric: Metric) -> Self {
        Self {
            metric,
            classification: Classification {
                metric,
                tier: SeverityTier::Safe,
                dominant: None,
            },
            latest: BTreeMap::new(),
            observed: None,
            chart: ChartSlice::empty(),
        }
    }

    pub fn render(&self, locale: Locale) -> CardView {
        CardView {
            metric: self.metric,
            title: self.metric.title(locale),
            unit: self.metric.unit(locale),
            tier: self.classification.tier,
            status: self.classification.status_text(locale),
            latest: self
                .latest
                .iter()
                .map(|(site, value)| SiteValueView {
                    site: *site,
                    name: site.name(locale),
                    color: site.color(),
                    value: *value,
                })
                .collect(),
            observed: self.observed,
            chart: render_chart(&self.chart, self.metric, locale),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    pub cards: Vec<StatusCard>,
}

impl Dashboard {
    pub fn render(&self, locale: Locale) -> DashboardView {
        DashboardView {
            lang: locale,
            cards: self.cards.iter().map(|c| c.render(locale)).collect(),
        }
    }
}

/// Per-site latest value with its localized site name.
#[derive(Debug, Clone, Serialize)]
pub struct SiteValueView {
    pub site: Site,
    pub name: &'static str,
    pub color: &'static str,
    pub value: f64,
}

/// One chart dataset with everything the chart layer needs: the site color
/// for lines and legends, and per-value bucket colors for threshold-colored
/// bars.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetView {
    pub site: Site,
    pub name: &'static str,
    pub color: &'static str,
    pub values: Vec<f64>,
    pub bucket_colors: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartView {
    pub labels: Vec<i32>,
    pub datasets: Vec<DatasetView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CardView {
    pub metric: Metric,
    pub title: &'static str,
    pub unit: &'static str,
    pub tier: SeverityTier,
    #[serde(flatten)]
    pub status: StatusText,
    pub latest: Vec<SiteValueView>,
    pub observed: Option<NaiveDate>,
    pub chart: ChartView,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub lang: Locale,
    pub cards: Vec<CardView>,
}

pub fn render_chart(chart: &ChartSlice, metric: Metric, locale: Locale) -> ChartView {
    ChartView {
        labels: chart.labels.clone(),
        datasets: chart
            .datasets
            .iter()
            .map(|d| DatasetView {
                site: d.site,
                name: d.site.name(locale),
                color: d.color,
                values: d.values.clone(),
                bucket_colors: colorize(&d.values, metric),
            })
            .collect(),
    }
}
