use std::env;

use serde::{
    Deserialize,
    Serialize,
};
use tracing::{
    info,
    warn,
};

use crate::persistence::{
    data_file_exists,
    load_json_or_default,
    save_json,
};

pub const CONFIG_FILE: &str = "config.json";
pub const API_URL_ENV: &str = "COURSE_PLANNER_API";

const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings, read once at startup and handed to the sync layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl AppConfig {
    /// Loads `config.json` from the app data dir, writing the defaults out on
    /// first run, then applies the `COURSE_PLANNER_API` override.
    pub fn load() -> Self {
        let config = if data_file_exists(CONFIG_FILE) {
            load_json_or_default::<AppConfig>(CONFIG_FILE)
        } else {
            let config = AppConfig::default();
            if let Err(e) = save_json(&config, CONFIG_FILE) {
                warn!("Could not write default config: {}", e);
            }
            config
        };

        let config = config.with_api_override(env::var(API_URL_ENV).ok()).normalized();
        info!("Using backend at {}", config.api_base_url);
        config
    }

    pub fn with_api_override(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.api_base_url = url.trim().to_string();
        }
        self
    }

    pub fn normalized(mut self) -> Self {
        let trimmed = self.api_base_url.trim().trim_end_matches('/');
        self.api_base_url =
            if trimmed.is_empty() { DEFAULT_API_URL.to_string() } else { trimmed.to_string() };

        if self.request_timeout_secs == 0 {
            self.request_timeout_secs = DEFAULT_TIMEOUT_SECS;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_file_fills_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{ "api_base_url": "http://planner.lan:9000" }"#).unwrap();

        assert_eq!(config.api_base_url, "http://planner.lan:9000");
        assert_eq!(config.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_env_override_and_normalization() {
        let config = AppConfig::default()
            .with_api_override(Some(" http://10.0.0.2:8000/ ".to_string()))
            .normalized();
        assert_eq!(config.api_base_url, "http://10.0.0.2:8000");

        let unchanged = AppConfig::default().with_api_override(Some("  ".to_string())).normalized();
        assert_eq!(unchanged, AppConfig::default());

        let broken = AppConfig { api_base_url: "/".to_string(), request_timeout_secs: 0 }.normalized();
        assert_eq!(broken, AppConfig::default());
    }
}
