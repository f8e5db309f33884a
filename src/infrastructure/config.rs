use crate::application::pipeline::palette::Palette;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub api: ApiSettings,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub dashboard: DashboardSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    #[serde(default = "default_start_date")]
    pub start_date: String,
    #[serde(default = "default_end_date")]
    pub end_date: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardSettings {
    pub title: String,
    /// Overrides the default Plotly palette
    #[serde(default)]
    pub palette: Option<Vec<String>>,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            title: "Greenant".to_string(),
            palette: None,
        }
    }
}

fn default_start_date() -> String {
    "2022-06-01 03:00:00+00".to_string()
}

fn default_end_date() -> String {
    "2024-07-01 04:00:00+00".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl ApiSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl DashboardSettings {
    pub fn palette(&self) -> anyhow::Result<Palette> {
        match &self.palette {
            None => Ok(Palette::default()),
            Some(colors) => {
                Palette::new(colors.clone()).ok_or_else(|| anyhow::anyhow!("dashboard.palette must not be empty"))
            }
        }
    }
}

/// Load `config/dashboard.*`, with `DASHBOARD__SECTION__KEY` environment overrides
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard"))
        .add_source(config::Environment::with_prefix("DASHBOARD").separator("__"))
        .build()?;

    validate(settings.try_deserialize()?)
}

fn validate(config: DashboardConfig) -> anyhow::Result<DashboardConfig> {
    if config.api.base_url.trim().is_empty() {
        anyhow::bail!("api.base_url must not be empty");
    }
    if config.api.timeout_secs == 0 {
        anyhow::bail!("api.timeout_secs must be greater than 0");
    }
    config.dashboard.palette()?;
    Ok(config)
}
