use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    pub backend: BackendSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendSettings {
    /// Base URL of the Supabase-style backend, without a trailing slash.
    pub base_url: String,
    /// Anon key sent as both `apikey` and bearer token.
    pub api_key: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    #[serde(default)]
    pub dashboard: DashboardSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardSettings {
    /// Years shown on the full annual charts.
    #[serde(default = "default_recent_years")]
    pub recent_years: usize,
    /// Years shown on the compact DHW chart.
    #[serde(default = "default_mini_years")]
    pub mini_years: usize,
    /// Satellite-to-publish latency subtracted from the publish date to
    /// estimate the observation date.
    #[serde(default = "default_observation_offset_days")]
    pub observation_offset_days: i64,
    /// First year of the ONI series.
    #[serde(default = "default_oni_since_year")]
    pub oni_since_year: i32,
}

fn default_recent_years() -> usize {
    10
}

fn default_mini_years() -> usize {
    5
}

fn default_observation_offset_days() -> i64 {
    3
}

fn default_oni_since_year() -> i32 {
    1980
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            recent_years: default_recent_years(),
            mini_years: default_mini_years(),
            observation_offset_days: default_observation_offset_days(),
            oni_since_year: default_oni_since_year(),
        }
    }
}

pub fn load_backend_config() -> anyhow::Result<BackendConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/backend"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
