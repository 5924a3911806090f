// Repository trait for pre-computed heat-stress metrics
use crate::domain::enso::OniReading;
use crate::domain::latest::Reading;
use crate::domain::series::YearValue;
use crate::domain::site::Site;
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Extreme-day counts per site: days above the hot cutoff and below the cold
/// cutoff, both pre-computed upstream.
#[derive(Debug, Clone, Default)]
pub struct ExtremeDays {
    pub hot_days: BTreeMap<Site, Vec<YearValue>>,
    pub cold_days: BTreeMap<Site, Vec<YearValue>>,
}

#[async_trait]
pub trait MetricsRepository: Send + Sync {
    /// Annual peak Degree Heating Weeks per site.
    async fn dhw_annual_peaks(&self) -> anyhow::Result<BTreeMap<Site, Vec<YearValue>>>;

    /// Recent daily SST rows, possibly several per site.
    async fn recent_sst(&self) -> anyhow::Result<Vec<Reading>>;

    /// Annual hot-day and cold-day counts per site.
    async fn extreme_days(&self) -> anyhow::Result<ExtremeDays>;

    /// Monthly ONI rows from `since_year` onward, ordered ascending.
    async fn oni_series(&self, since_year: i32) -> anyhow::Result<Vec<OniReading>>;
}
