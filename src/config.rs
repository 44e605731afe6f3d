//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.popmap.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Feed endpoint settings.
    #[serde(default)]
    pub endpoints: EndpointsConfig,

    /// HTTP client settings.
    #[serde(default)]
    pub http: HttpConfig,
}

/// Upstream feed endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointsConfig {
    /// Status page summary endpoint.
    #[serde(default = "default_status_url")]
    pub status_url: String,

    /// Speed test locations endpoint.
    #[serde(default = "default_speed_url")]
    pub speed_url: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            status_url: default_status_url(),
            speed_url: default_speed_url(),
        }
    }
}

fn default_status_url() -> String {
    "https://www.cloudflarestatus.com/api/v2/summary.json".to_string()
}

fn default_speed_url() -> String {
    "https://speed.cloudflare.com/locations".to_string()
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds, applied to each feed fetch.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        // Same rule the CLI enforces for --timeout.
        if config.http.timeout_seconds == 0 {
            return Err(anyhow::anyhow!(
                "Invalid config file {}: timeout_seconds must be at least 1",
                path.display()
            ));
        }

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but is invalid.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(".popmap.toml");

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref status_url) = args.status_url {
            self.endpoints.status_url = status_url.clone();
        }
        if let Some(ref speed_url) = args.speed_url {
            self.endpoints.speed_url = speed_url.clone();
        }
        if let Some(timeout) = args.timeout {
            self.http.timeout_seconds = timeout;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
