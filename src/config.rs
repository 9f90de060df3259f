//! Configuration management for the citycast pipeline
//!
//! Handles loading configuration from a TOML file with serde defaults and
//! provides validation for all configuration settings. Every field has a
//! default, so a missing or partial file still yields a runnable setup.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::CitycastError;

/// Root configuration structure for the citycast pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CitycastConfig {
    /// Forecast provider configuration
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Fetch stage configuration
    #[serde(default)]
    pub fetch: FetchConfig,
    /// Export stage configuration
    #[serde(default)]
    pub export: ExportConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// City identifiers to analyze
    #[serde(default = "default_cities")]
    pub cities: Vec<String>,
}

/// Forecast provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL the per-city payloads are served from
    #[serde(default = "default_provider_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_provider_timeout")]
    pub timeout_seconds: u32,
}

/// Fetch stage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Extra in-flight requests beyond the CPU count; fetch tasks mostly
    /// wait on I/O, so the pool is sized above the available parallelism
    #[serde(default = "default_io_headroom")]
    pub io_headroom: usize,
}

/// Export stage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Path of the CSV report artifact
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_provider_base_url() -> String {
    "https://code.s3.yandex.net/async-module".to_string()
}

fn default_provider_timeout() -> u32 {
    30
}

fn default_io_headroom() -> usize {
    4
}

fn default_output_path() -> PathBuf {
    PathBuf::from("city_data_table.csv")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_cities() -> Vec<String> {
    [
        "MOSCOW",
        "PARIS",
        "LONDON",
        "BERLIN",
        "BEIJING",
        "KAZAN",
        "SPETERSBURG",
        "VOLGOGRAD",
        "NOVOSIBIRSK",
        "KALININGRAD",
        "ABUDHABI",
        "WARSZAWA",
        "BUCHAREST",
        "ROMA",
        "CAIRO",
    ]
    .map(String::from)
    .to_vec()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_provider_base_url(),
            timeout_seconds: default_provider_timeout(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            io_headroom: default_io_headroom(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for CitycastConfig {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            fetch: FetchConfig::default(),
            export: ExportConfig::default(),
            logging: LoggingConfig::default(),
            cities: default_cities(),
        }
    }
}

impl CitycastConfig {
    /// Load configuration from a TOML file, or fall back to defaults when no
    /// path is given
    pub fn load(path: Option<&Path>) -> Result<Self, CitycastError> {
        let config = match path {
            Some(path) => {
                let raw = fs::read_to_string(path).map_err(|e| {
                    CitycastError::config(format!(
                        "failed to read config file '{}': {e}",
                        path.display()
                    ))
                })?;
                toml::from_str(&raw).map_err(|e| {
                    CitycastError::config(format!(
                        "failed to parse config file '{}': {e}",
                        path.display()
                    ))
                })?
            }
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), CitycastError> {
        if self.provider.base_url.trim().is_empty() {
            return Err(CitycastError::config("provider.base_url must not be empty"));
        }
        if self.provider.timeout_seconds == 0 {
            return Err(CitycastError::config(
                "provider.timeout_seconds must be greater than zero",
            ));
        }
        if self.cities.is_empty() {
            return Err(CitycastError::config("cities must not be empty"));
        }
        Ok(())
    }
}
