//! Client configuration
//!
//! Loaded from an optional `mellow.toml` and overridden by `MELLOW_`-prefixed
//! environment variables (e.g. `MELLOW_API_URL`, `MELLOW_TIMEOUT_SECS`).

use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Configuration for the catalog client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the API (e.g. "https://music.example.com/api")
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Whole-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection timeout
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Interval between background library refreshes
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
}

impl ClientConfig {
    /// Default settings pointed at `api_url`
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Self::default()
        }
    }

    /// Load configuration from `mellow.toml` and the environment
    pub fn load() -> Result<Self> {
        Self::load_from("mellow.toml")
    }

    /// Load configuration from `path` (if it exists) and the environment
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        // Load from config file if it exists
        let path = path.as_ref();
        if path.exists() {
            settings = settings.add_source(config::File::from(path));
        }

        // Field names contain underscores, so nested keys use a double one
        settings = settings.add_source(
            config::Environment::with_prefix("MELLOW")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = settings
            .build()
            .map_err(|e| CatalogError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CatalogError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.api_url)
            .map_err(|e| CatalogError::InvalidUrl(format!("{}: {}", self.api_url, e)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(CatalogError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        if self.timeout_secs == 0 || self.connect_timeout_secs == 0 {
            return Err(CatalogError::Config("timeouts must be positive".into()));
        }

        if self.refresh_interval_secs == 0 {
            return Err(CatalogError::Config(
                "refresh interval must be positive".into(),
            ));
        }

        Ok(())
    }

    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Connect timeout as a `Duration`
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Library refresh interval as a `Duration`
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            refresh_interval_secs: default_refresh_interval_secs(),
        }
    }
}

// Default values
fn default_api_url() -> String {
    "https://musious-1.onrender.com/api".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_refresh_interval_secs() -> u64 {
    600
}
