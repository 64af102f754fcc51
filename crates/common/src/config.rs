//! Configuration layer
//!
//! Sources, later wins: built-in defaults -> optional TOML file ->
//! `STOCKTAKE_*` environment variables. Validation runs once after
//! merging, before any network activity.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value for {key}: {value} ({reason})")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

/// Top-level configuration for the stocktake client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StocktakeConfig {
    /// Base URL of the backend inventory service
    pub api_base_url: String,
    /// Active venue; may also come from the CLI `--venue` flag
    pub venue_id: Option<String>,
    /// HTTP client timeout in milliseconds
    pub http_timeout_ms: u64,
    /// On load failure, fall back to the built-in demo dataset instead
    /// of failing closed (the never-block-the-counter policy)
    pub fallback_to_demo: bool,
    /// Interval between connectivity probes in milliseconds
    pub probe_interval_ms: u64,
    /// Emit JSON log lines instead of human-readable output
    pub log_json: bool,
    /// Default log filter when STOCKTAKE_LOG is not set
    pub log_filter: String,
}

impl Default for StocktakeConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080".to_string(),
            venue_id: None,
            http_timeout_ms: 10_000,
            fallback_to_demo: true,
            probe_interval_ms: 15_000,
            log_json: false,
            log_filter: "info".to_string(),
        }
    }
}

impl StocktakeConfig {
    /// Load configuration: defaults, then the TOML file (if any), then
    /// environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match std::env::var("STOCKTAKE_CONFIG") {
                Ok(env_path) if !env_path.trim().is_empty() => {
                    Self::from_file(Path::new(&env_path))?
                }
                _ => Self::default(),
            },
        };
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML file over the defaults
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Apply `STOCKTAKE_*` environment variables on top of the current
    /// values
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(value) = std::env::var("STOCKTAKE_API_BASE_URL") {
            self.api_base_url = value;
        }
        if let Ok(value) = std::env::var("STOCKTAKE_VENUE_ID") {
            self.venue_id = Some(value);
        }
        if let Ok(value) = std::env::var("STOCKTAKE_HTTP_TIMEOUT_MS") {
            self.http_timeout_ms = parse_env("STOCKTAKE_HTTP_TIMEOUT_MS", &value)?;
        }
        if let Ok(value) = std::env::var("STOCKTAKE_PROBE_INTERVAL_MS") {
            self.probe_interval_ms = parse_env("STOCKTAKE_PROBE_INTERVAL_MS", &value)?;
        }
        if let Ok(value) = std::env::var("STOCKTAKE_FALLBACK_TO_DEMO") {
            self.fallback_to_demo = parse_env("STOCKTAKE_FALLBACK_TO_DEMO", &value)?;
        }
        if let Ok(value) = std::env::var("STOCKTAKE_LOG_JSON") {
            self.log_json = parse_env("STOCKTAKE_LOG_JSON", &value)?;
        }
        Ok(())
    }

    /// Validate the merged configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://")
        {
            return Err(ConfigError::InvalidValue {
                key: "api_base_url".to_string(),
                value: self.api_base_url.clone(),
                reason: "must start with http:// or https://".to_string(),
            });
        }
        if self.http_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "http_timeout_ms".to_string(),
                value: "0".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.probe_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "probe_interval_ms".to_string(),
                value: "0".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_millis(self.http_timeout_ms)
    }

    pub fn probe_interval(&self) -> Duration {
        Duration::from_millis(self.probe_interval_ms)
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        reason: "could not be parsed".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = StocktakeConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.fallback_to_demo);
        assert_eq!(config.http_timeout(), Duration::from_millis(10_000));
    }

    #[test]
    fn test_partial_toml_merges_over_defaults() {
        let config: StocktakeConfig = toml::from_str(
            r#"
            api_base_url = "https://inventory.example.com"
            venue_id = "venue-7"
            fallback_to_demo = false
            "#,
        )
        .unwrap();

        assert_eq!(config.api_base_url, "https://inventory.example.com");
        assert_eq!(config.venue_id.as_deref(), Some("venue-7"));
        assert!(!config.fallback_to_demo);
        // Untouched fields keep their defaults
        assert_eq!(config.http_timeout_ms, 10_000);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_validation_rejects_bad_base_url() {
        let config = StocktakeConfig {
            api_base_url: "ftp://inventory.example.com".to_string(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("api_base_url"));
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let config = StocktakeConfig {
            http_timeout_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_overrides_win_over_file_values() {
        let mut config: StocktakeConfig =
            toml::from_str(r#"api_base_url = "https://file.example.com""#).unwrap();

        std::env::set_var("STOCKTAKE_API_BASE_URL", "https://env.example.com");
        std::env::set_var("STOCKTAKE_HTTP_TIMEOUT_MS", "2500");
        let result = config.apply_env_overrides();
        std::env::remove_var("STOCKTAKE_API_BASE_URL");
        std::env::remove_var("STOCKTAKE_HTTP_TIMEOUT_MS");

        result.unwrap();
        assert_eq!(config.api_base_url, "https://env.example.com");
        assert_eq!(config.http_timeout_ms, 2500);
    }
}
