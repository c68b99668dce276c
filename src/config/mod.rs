//! Configuration management for fleetop
//!
//! Every field has a default in code. `~/.fleetop/config.yaml` (or the file given
//! with `--config`) overrides those defaults, and command-line flags or environment
//! variables override the file.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cache::CacheConfig;
use crate::client::RetryPolicy;
use crate::client::retry::{DEFAULT_MAX_RETRIES, DEFAULT_RETRYABLE_STATUS_CODES};
use crate::error::{ConfigError, Result};

/// Default REST base URL
pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";

/// `--fixtures` value selecting the fixture document compiled into the binary
pub const BUNDLED_FIXTURES: &str = "bundled";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the fleet REST API
    pub api_url: String,

    /// Serve data from a fixture document instead of the API
    pub fixture_mode: bool,

    /// Fixture document to use in fixture mode; the bundled one when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixtures_path: Option<PathBuf>,

    pub cache: CacheSettings,

    pub retry: RetrySettings,
}

/// Response cache settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    pub ttl_secs: u64,
    pub max_entries: usize,
    pub excluded_key_patterns: Vec<String>,
}

/// Retry/backoff settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub retryable_status_codes: Vec<u16>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            fixture_mode: false,
            fixtures_path: None,
            cache: CacheSettings::default(),
            retry: RetrySettings::default(),
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        let defaults = CacheConfig::default();
        Self {
            ttl_secs: defaults.ttl.as_secs(),
            max_entries: defaults.max_entries,
            excluded_key_patterns: defaults.excluded_key_patterns,
        }
    }
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay_ms: 1000,
            retryable_status_codes: DEFAULT_RETRYABLE_STATUS_CODES.to_vec(),
        }
    }
}

impl CacheSettings {
    pub fn to_cache_config(&self) -> CacheConfig {
        CacheConfig {
            ttl: Duration::from_secs(self.ttl_secs),
            max_entries: self.max_entries,
            excluded_key_patterns: self.excluded_key_patterns.clone(),
        }
    }
}

impl RetrySettings {
    pub fn to_retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            base_delay: Duration::from_millis(self.base_delay_ms),
            retryable_status_codes: self
                .retryable_status_codes
                .iter()
                .copied()
                .collect::<BTreeSet<u16>>(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".fleetop").join("config.yaml"))
    }

    /// Load configuration from an explicit path, or from the default path.
    ///
    /// A missing default file yields the built-in defaults; a missing explicit file
    /// is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => {
                let path = Self::default_path()?;
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()).into());
        }

        let contents = std::fs::read_to_string(path)?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;
        config.validate()?;

        Ok(config)
    }

    /// Reject values that cannot work at all
    pub fn validate(&self) -> Result<()> {
        let url = self.api_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "api_url must start with http:// or https://, got '{}'",
                self.api_url
            ))
            .into());
        }
        Ok(())
    }

    /// Apply command-line and environment overrides.
    ///
    /// `fixtures` switches to fixture mode; [`BUNDLED_FIXTURES`] selects the built-in
    /// document, anything else is a file path.
    pub fn with_overrides(mut self, api_url: Option<&str>, fixtures: Option<&str>) -> Self {
        if let Some(url) = api_url {
            self.api_url = url.to_string();
        }
        match fixtures {
            Some(BUNDLED_FIXTURES) => {
                self.fixture_mode = true;
                self.fixtures_path = None;
            }
            Some(path) => {
                self.fixture_mode = true;
                self.fixtures_path = Some(PathBuf::from(path));
            }
            None => {}
        }
        self
    }
}
