use crate::filter::SortBy;
use crate::model::SearchParams;
use serde::Deserialize;
use std::fs;

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub client_id: String,
    pub client_secret: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_max_results")]
    pub max_results: u32,
}

/// One watched route: the search to run plus optional filter preferences
/// applied on top of the result-derived defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteConfig {
    #[serde(flatten)]
    pub search: SearchParams,
    #[serde(default)]
    pub stops: Option<Vec<u32>>,
    #[serde(default)]
    pub airlines: Vec<String>,
    #[serde(default)]
    pub max_price: Option<f64>,
    #[serde(default)]
    pub departure_hours: Option<(u32, u32)>,
    #[serde(default)]
    pub sort_by: SortBy,
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub routes: Vec<RouteConfig>,
    pub check_interval_seconds: u64,
    #[serde(default = "default_calendar_radius")]
    pub calendar_radius_days: i64,
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_max_results() -> u32 {
    50
}

fn default_calendar_radius() -> i64 {
    3
}

pub fn load_config(path: &str) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}
