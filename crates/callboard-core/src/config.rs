//! Dashboard configuration
//!
//! Loaded from an optional TOML file, then overridden by environment
//! variables. Every section and field has a default, so an empty file (or no
//! file at all) is a valid configuration.

use crate::api::{Page, DEFAULT_DAYS, DEFAULT_LIMIT};
use crate::error::CoreError;
use crate::poll::DEFAULT_DASHBOARD_INTERVAL;
use crate::session::ViewId;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable overriding `api.base_url`
pub const API_URL_ENV: &str = "CALLBOARD_API_URL";

/// Backend used when nothing is configured
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub polling: PollingConfig,
    #[serde(default)]
    pub views: ViewsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Poll intervals in milliseconds; 0 means fetch once on activation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollingConfig {
    #[serde(default = "default_dashboard_interval_ms")]
    pub dashboard_interval_ms: u64,
    #[serde(default)]
    pub calls_interval_ms: u64,
    #[serde(default)]
    pub analytics_interval_ms: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            dashboard_interval_ms: default_dashboard_interval_ms(),
            calls_interval_ms: 0,
            analytics_interval_ms: 0,
        }
    }
}

impl PollingConfig {
    /// Poll interval for `view`, `None` when the view does not poll
    pub fn interval_for(&self, view: ViewId) -> Option<Duration> {
        let ms = match view {
            ViewId::Dashboard => self.dashboard_interval_ms,
            ViewId::Calls => self.calls_interval_ms,
            ViewId::Analytics => self.analytics_interval_ms,
            ViewId::Settings => 0,
        };
        (ms > 0).then(|| Duration::from_millis(ms))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewsConfig {
    /// Initial day range of the analytics view
    #[serde(default = "default_analytics_days")]
    pub analytics_days: u32,
    /// Page size of the calls view
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for ViewsConfig {
    fn default() -> Self {
        Self {
            analytics_days: default_analytics_days(),
            page_size: default_page_size(),
        }
    }
}

impl ViewsConfig {
    pub fn calls_page(&self) -> Page {
        Page::new(0, self.page_size)
    }
}

fn default_base_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_dashboard_interval_ms() -> u64 {
    DEFAULT_DASHBOARD_INTERVAL.as_millis() as u64
}

fn default_analytics_days() -> u32 {
    DEFAULT_DAYS
}

fn default_page_size() -> u32 {
    DEFAULT_LIMIT
}

impl DashboardConfig {
    /// Load from `path` (if given), apply process environment, validate
    pub fn load(path: Option<&Path>) -> Result<Self, CoreError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, CoreError> {
        let content = std::fs::read_to_string(path).map_err(|source| CoreError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| CoreError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply overrides from an environment lookup
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(API_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.api.base_url = url.trim().to_string();
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        let url = &self.api.base_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(CoreError::InvalidConfig {
                message: format!(
                    "api.base_url must start with http:// or https:// (got '{}')",
                    url
                ),
            });
        }
        if self.views.analytics_days == 0 {
            return Err(CoreError::InvalidConfig {
                message: "views.analytics_days must be greater than zero".to_string(),
            });
        }
        if self.views.page_size == 0 {
            return Err(CoreError::InvalidConfig {
                message: "views.page_size must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
