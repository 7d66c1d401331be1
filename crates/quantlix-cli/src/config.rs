//! CLI configuration loaded from environment variables.

use anyhow::{Context, Result};
use quantlix_client::DEFAULT_BASE_URL;
use secrecy::SecretString;
use serde::Deserialize;
use std::time::Duration;

/// CLI configuration.
///
/// Every field comes from a `QUANTLIX_`-prefixed variable, e.g.
/// `QUANTLIX_API_KEY`, `QUANTLIX_API_URL`, `QUANTLIX_TIMEOUT=45s`.
/// `CLOUD_API_KEY` and `CLOUD_API_URL` are still read as fallbacks.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// API key for authenticated commands
    #[serde(default)]
    pub api_key: Option<SecretString>,

    /// API base URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Per-request timeout
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,

    /// Log level, overridden by RUST_LOG
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_api_url() -> String {
    DEFAULT_BASE_URL.into()
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_log_level() -> String {
    "warn".into()
}

impl Config {
    /// Load configuration from `.env` and the process environment.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Self::from_environment(environment(), legacy_environment())
    }

    fn from_environment(
        source: config::Environment,
        legacy: config::Environment,
    ) -> Result<Self> {
        let legacy: LegacyConfig = config::Config::builder()
            .add_source(legacy)
            .build()
            .and_then(|c| c.try_deserialize())
            .context("Failed to read CLOUD_* variables")?;

        // Lowest priority: any QUANTLIX_ variable wins
        let mut builder = config::Config::builder();
        if let Some(api_key) = non_blank(legacy.api_key) {
            builder = builder.set_default("api_key", api_key)?;
        }
        if let Some(api_url) = non_blank(legacy.api_url) {
            builder = builder.set_default("api_url", api_url)?;
        }

        let config = builder
            .add_source(source)
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("QUANTLIX")
        .prefix_separator("_")
        // Keys look like numbers sometimes; keep strings as strings
        .try_parsing(false)
}

/// Older `CLOUD_API_KEY` / `CLOUD_API_URL` names.
#[derive(Deserialize)]
struct LegacyConfig {
    #[serde(default)]
    api_key: Option<String>,
    #[serde(default)]
    api_url: Option<String>,
}

fn legacy_environment() -> config::Environment {
    config::Environment::with_prefix("CLOUD")
        .prefix_separator("_")
        .try_parsing(false)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
