// Dashboard service - assembles status cards from pre-computed metrics
use crate::application::metrics_repository::{ExtremeDays, MetricsRepository};
use crate::domain::dashboard::{Dashboard, StatusCard};
use crate::domain::latest::{estimated_observation, latest_by_site, Reading};
use crate::domain::series::{slice_recent, ChartSlice, YearValue};
use crate::domain::severity::{classify, Metric};
use crate::domain::site::Site;
use crate::infrastructure::config::DashboardSettings;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Cached multi-year DHW series shared with the mini chart, so the dependent
/// chart never triggers a second backend fetch. Last writer wins; refreshes
/// are idempotent so a stale read only shows slightly older data.
type DhwCache = Arc<RwLock<Option<BTreeMap<Site, Vec<YearValue>>>>>;

#[derive(Clone)]
pub struct DashboardService {
    repository: Arc<dyn MetricsRepository>,
    settings: DashboardSettings,
    dhw_cache: DhwCache,
}

impl DashboardService {
    pub fn new(repository: Arc<dyn MetricsRepository>, settings: DashboardSettings) -> Self {
        Self {
            repository,
            settings,
            dhw_cache: Arc::new(RwLock::new(None)),
        }
    }

    /// Fetch every metric concurrently and build one card per metric. A
    /// failed fetch degrades only its own card to the "no data" fallback;
    /// the rest of the dashboard still renders.
    pub async fn build_dashboard(&self) -> Dashboard {
        let (dhw, sst, extreme) = futures::join!(
            self.repository.dhw_annual_peaks(),
            self.repository.recent_sst(),
            self.repository.extreme_days(),
        );

        let dhw_card = match dhw {
            Ok(series) => {
                *self.dhw_cache.write().await = Some(series.clone());
                self.dhw_card(&series)
            }
            Err(e) => {
                tracing::error!("Error fetching DHW annual peaks: {e:#}");
                StatusCard::no_data(Metric::DhwPeak)
            }
        };

        let sst_card = match sst {
            Ok(rows) => self.sst_card(&rows),
            Err(e) => {
                tracing::error!("Error fetching recent SST: {e:#}");
                StatusCard::no_data(Metric::SstAnomaly)
            }
        };

        let (hot_card, cold_card) = match extreme {
            Ok(days) => self.extreme_day_cards(&days),
            Err(e) => {
                tracing::error!("Error fetching extreme days: {e:#}");
                (
                    StatusCard::no_data(Metric::HotDays),
                    StatusCard::no_data(Metric::ColdDays),
                )
            }
        };

        Dashboard {
            cards: vec![dhw_card, sst_card, hot_card, cold_card],
        }
    }

    /// Last-N-years DHW slice for the compact chart, served from the cache
    /// left behind by the most recent dashboard build when possible.
    pub async fn dhw_mini_chart(&self) -> ChartSlice {
        {
            let cached = self.dhw_cache.read().await;
            if let Some(series) = cached.as_ref() {
                return slice_recent(series, self.settings.mini_years);
            }
        }

        match self.repository.dhw_annual_peaks().await {
            Ok(series) => {
                let slice = slice_recent(&series, self.settings.mini_years);
                *self.dhw_cache.write().await = Some(series);
                slice
            }
            Err(e) => {
                tracing::error!("Error fetching DHW annual peaks: {e:#}");
                ChartSlice::empty()
            }
        }
    }

    fn dhw_card(&self, series: &BTreeMap<Site, Vec<YearValue>>) -> StatusCard {
        let latest = latest_year_values(series);
        StatusCard {
            metric: Metric::DhwPeak,
            classification: classify(Metric::DhwPeak, &latest),
            latest,
            observed: None,
            chart: slice_recent(series, self.settings.recent_years),
        }
    }

    fn sst_card(&self, rows: &[Reading]) -> StatusCard {
        let snapshot = latest_by_site(rows);

        // Classify on the warm anomaly against each site's MMM baseline so
        // one threshold table covers sites with different climatologies.
        let anomalies: BTreeMap<Site, f64> = snapshot
            .values
            .iter()
            .map(|(site, sst)| (*site, sst - site.mmm()))
            .collect();

        StatusCard {
            metric: Metric::SstAnomaly,
            classification: classify(Metric::SstAnomaly, &anomalies),
            latest: snapshot.values,
            observed: snapshot
                .published
                .map(|d| estimated_observation(d, self.settings.observation_offset_days)),
            chart: ChartSlice::empty(),
        }
    }

    fn extreme_day_cards(&self, days: &ExtremeDays) -> (StatusCard, StatusCard) {
        let hot_latest = latest_year_values(&days.hot_days);
        let hot = StatusCard {
            metric: Metric::HotDays,
            classification: classify(Metric::HotDays, &hot_latest),
            latest: hot_latest,
            observed: None,
            chart: slice_recent(&days.hot_days, self.settings.recent_years),
        };
        let cold_latest = latest_year_values(&days.cold_days);
        let cold = StatusCard {
            metric: Metric::ColdDays,
            classification: classify(Metric::ColdDays, &cold_latest),
            latest: cold_latest,
            observed: None,
            chart: slice_recent(&days.cold_days, self.settings.recent_years),
        };
        (hot, cold)
    }
}

/// Each site's value at its own most recent year.
fn latest_year_values(series: &BTreeMap<Site, Vec<YearValue>>) -> BTreeMap<Site, f64> {
    series
        .iter()
        .filter_map(|(site, values)| {
            values
                .iter()
                .max_by_key(|yv| yv.year)
                .map(|yv| (*site, yv.value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::enso::OniReading;
    use crate::domain::severity::SeverityTier;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeRepository {
        dhw_calls: AtomicUsize,
        fail_sst: bool,
    }

    impl FakeRepository {
        fn new(fail_sst: bool) -> Self {
            Self {
                dhw_calls: AtomicUsize::new(0),
                fail_sst,
            }
        }
    }

    #[async_trait]
    impl MetricsRepository for FakeRepository {
        async fn dhw_annual_peaks(&self) -> anyhow::Result<BTreeMap<Site, Vec<YearValue>>> {
            self.dhw_calls.fetch_add(1, Ordering::SeqCst);
            let mut series = BTreeMap::new();
            series.insert(
                Site::Manza,
                vec![
                    YearValue { year: 2023, value: 2.4 },
                    YearValue { year: 2024, value: 10.9 },
                ],
            );
            series.insert(Site::Ogasawara, vec![YearValue { year: 2024, value: 4.1 }]);
            Ok(series)
        }

        async fn recent_sst(&self) -> anyhow::Result<Vec<Reading>> {
            if self.fail_sst {
                anyhow::bail!("backend unavailable");
            }
            Ok(vec![Reading {
                site: Site::Sesoko,
                date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
                value: 30.2,
            }])
        }

        async fn extreme_days(&self) -> anyhow::Result<ExtremeDays> {
            let mut hot_days = BTreeMap::new();
            hot_days.insert(Site::Sesoko, vec![YearValue { year: 2024, value: 25.0 }]);
            Ok(ExtremeDays {
                hot_days,
                cold_days: BTreeMap::new(),
            })
        }

        async fn oni_series(&self, _since_year: i32) -> anyhow::Result<Vec<OniReading>> {
            Ok(Vec::new())
        }
    }

    fn service(fail_sst: bool) -> (DashboardService, Arc<FakeRepository>) {
        let repository = Arc::new(FakeRepository::new(fail_sst));
        (
            DashboardService::new(repository.clone(), DashboardSettings::default()),
            repository,
        )
    }

    #[tokio::test]
    async fn test_dashboard_has_one_card_per_metric() {
        let (service, _) = service(false);
        let dashboard = service.build_dashboard().await;
        let metrics: Vec<Metric> = dashboard.cards.iter().map(|c| c.metric).collect();
        assert_eq!(
            metrics,
            vec![
                Metric::DhwPeak,
                Metric::SstAnomaly,
                Metric::HotDays,
                Metric::ColdDays
            ]
        );
    }

    #[tokio::test]
    async fn test_failed_fetch_degrades_only_its_card() {
        let (service, _) = service(true);
        let dashboard = service.build_dashboard().await;

        let sst = &dashboard.cards[1];
        assert_eq!(sst.classification.dominant, None);
        assert!(sst.latest.is_empty());

        // DHW card is unaffected by the SST failure.
        let dhw = &dashboard.cards[0];
        assert_eq!(dhw.classification.tier, SeverityTier::Alert);
        assert_eq!(dhw.classification.dominant, Some((Site::Manza, 10.9)));
    }

    #[tokio::test]
    async fn test_sst_card_classifies_on_anomaly() {
        let (service, _) = service(false);
        let dashboard = service.build_dashboard().await;
        let sst = &dashboard.cards[1];
        // 30.2 against MMM 29.0 is a +1.2 anomaly: Watch.
        assert_eq!(sst.classification.tier, SeverityTier::Watch);
        assert_eq!(sst.latest[&Site::Sesoko], 30.2);
        // Published 2025-03-01 minus the 3-day latency.
        assert_eq!(sst.observed, NaiveDate::from_ymd_opt(2025, 2, 26));
    }

    #[tokio::test]
    async fn test_mini_chart_reuses_cached_series() {
        let (service, repository) = service(false);
        service.build_dashboard().await;
        assert_eq!(repository.dhw_calls.load(Ordering::SeqCst), 1);

        let mini = service.dhw_mini_chart().await;
        assert_eq!(repository.dhw_calls.load(Ordering::SeqCst), 1);
        assert_eq!(mini.labels.len(), DashboardSettings::default().mini_years);
    }

    #[tokio::test]
    async fn test_mini_chart_fetches_when_cache_cold() {
        let (service, repository) = service(false);
        let mini = service.dhw_mini_chart().await;
        assert_eq!(repository.dhw_calls.load(Ordering::SeqCst), 1);
        assert!(!mini.labels.is_empty());
    }
}
