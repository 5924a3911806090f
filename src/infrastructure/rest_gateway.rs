// Supabase REST gateway implementation of the metrics repository
use crate::application::metrics_repository::{ExtremeDays, MetricsRepository};
use crate::domain::enso::OniReading;
use crate::domain::latest::Reading;
use crate::domain::series::YearValue;
use crate::domain::site::Site;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("backend returned {status} for {url}: {body}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
        body: String,
    },
}

/// Client for the remote metrics backend: static JSON documents under the
/// public storage path plus PostgREST table queries. Every document is
/// decoded defensively; rows with missing fields or unknown site keys are
/// dropped, never fatal.
#[derive(Debug, Clone)]
pub struct RestGateway {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl RestGateway {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client: reqwest::Client::new(),
        }
    }

    async fn fetch_document<T: DeserializeOwned>(&self, name: &str) -> Result<T, GatewayError> {
        let url = format!(
            "{}/storage/v1/object/public/data/{}.json",
            self.base_url, name
        );
        self.get_json(&url).await
    }

    async fn query_table<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[(&str, &str)],
    ) -> Result<T, GatewayError> {
        let query = filters
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");
        let url = format!("{}/rest/v1/{}?{}", self.base_url, table, query);
        self.get_json(&url).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, GatewayError> {
        tracing::debug!("Fetching {url}");
        let response = self
            .client
            .get(url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|source| GatewayError::Transport {
                url: url.to_string(),
                source,
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Status {
                url: url.to_string(),
                status,
                body,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|source| GatewayError::Transport {
                url: url.to_string(),
                source,
            })
    }
}

#[derive(Debug, Deserialize)]
struct PeakRow {
    #[serde(default)]
    year: Option<i32>,
    #[serde(default)]
    peak_dhw: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct SstRow {
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    sst: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct DayCountRow {
    #[serde(default)]
    year: Option<i32>,
    #[serde(default)]
    days: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
struct ExtremeDaysDocument {
    #[serde(default)]
    hot_days: HashMap<String, Vec<DayCountRow>>,
    #[serde(default)]
    cold_days: HashMap<String, Vec<DayCountRow>>,
}

#[derive(Debug, Deserialize)]
struct OniRow {
    #[serde(default)]
    year: Option<i32>,
    #[serde(default)]
    season: Option<String>,
    #[serde(default)]
    anomaly: Option<f64>,
}

fn dhw_from_wire(document: HashMap<String, Vec<PeakRow>>) -> BTreeMap<Site, Vec<YearValue>> {
    document
        .into_iter()
        .filter_map(|(key, rows)| {
            let site = Site::from_id(&key)?;
            let series = rows
                .into_iter()
                .filter_map(|row| {
                    Some(YearValue {
                        year: row.year?,
                        value: row.peak_dhw?,
                    })
                })
                .collect();
            Some((site, series))
        })
        .collect()
}

fn sst_from_wire(document: HashMap<String, Vec<SstRow>>) -> Vec<Reading> {
    let mut readings = Vec::new();
    for (key, rows) in document {
        let Some(site) = Site::from_id(&key) else {
            continue;
        };
        for row in rows {
            let (Some(date), Some(value)) = (row.date, row.sst) else {
                continue;
            };
            let Ok(date) = NaiveDate::parse_from_str(&date, "%Y-%m-%d") else {
                tracing::debug!("Skipping SST row with unparseable date {date:?}");
                continue;
            };
            readings.push(Reading { site, date, value });
        }
    }
    readings
}

fn day_counts_from_wire(
    document: HashMap<String, Vec<DayCountRow>>,
) -> BTreeMap<Site, Vec<YearValue>> {
    document
        .into_iter()
        .filter_map(|(key, rows)| {
            let site = Site::from_id(&key)?;
            let series = rows
                .into_iter()
                .filter_map(|row| {
                    Some(YearValue {
                        year: row.year?,
                        value: row.days?,
                    })
                })
                .collect();
            Some((site, series))
        })
        .collect()
}

fn oni_from_wire(rows: Vec<OniRow>) -> Vec<OniReading> {
    rows.into_iter()
        .filter_map(|row| {
            Some(OniReading {
                year: row.year?,
                season: row.season?,
                anomaly: row.anomaly?,
            })
        })
        .collect()
}

#[async_trait]
impl MetricsRepository for RestGateway {
    async fn dhw_annual_peaks(&self) -> anyhow::Result<BTreeMap<Site, Vec<YearValue>>> {
        let document = self.fetch_document("dhw_annual_peak").await?;
        Ok(dhw_from_wire(document))
    }

    async fn recent_sst(&self) -> anyhow::Result<Vec<Reading>> {
        let document = self.fetch_document("sst_recent").await?;
        Ok(sst_from_wire(document))
    }

    async fn extreme_days(&self) -> anyhow::Result<ExtremeDays> {
        let document: ExtremeDaysDocument = self.fetch_document("extreme_days").await?;
        Ok(ExtremeDays {
            hot_days: day_counts_from_wire(document.hot_days),
            cold_days: day_counts_from_wire(document.cold_days),
        })
    }

    async fn oni_series(&self, since_year: i32) -> anyhow::Result<Vec<OniReading>> {
        let year_filter = format!("gte.{since_year}");
        let rows = self
            .query_table(
                "oni_monthly",
                &[
                    ("year", year_filter.as_str()),
                    ("select", "year,season,anomaly"),
                    ("order", "year.asc,id.asc"),
                ],
            )
            .await?;
        Ok(oni_from_wire(rows))
    }
}
