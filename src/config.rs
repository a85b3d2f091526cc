//! Client configuration for the remote task store.
//!
//! Defaults point at a local development store. Environment variables
//! override them:
//!
//! - `TASKDECK_API_URL`: base URL of the task API
//! - `TASKDECK_UPLOAD_URL`: image upload endpoint
//! - `TASKDECK_ASSET_URL`: base URL that uploaded image paths resolve against
//! - `TASKDECK_TIMEOUT_SECS`: per-request timeout in whole seconds

use std::time::Duration;
use thiserror::Error;

/// Environment variable naming the task API base URL.
pub const API_URL_VAR: &str = "TASKDECK_API_URL";
/// Environment variable naming the image upload endpoint.
pub const UPLOAD_URL_VAR: &str = "TASKDECK_UPLOAD_URL";
/// Environment variable naming the uploaded asset base URL.
pub const ASSET_URL_VAR: &str = "TASKDECK_ASSET_URL";
/// Environment variable holding the request timeout in seconds.
pub const TIMEOUT_SECS_VAR: &str = "TASKDECK_TIMEOUT_SECS";

/// Errors returned while loading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A URL value does not use an HTTP scheme.
    #[error("{variable} must be an http(s) URL, got '{value}'")]
    InvalidUrl {
        /// Variable carrying the value.
        variable: &'static str,
        /// Rejected value.
        value: String,
    },

    /// The timeout is not a positive whole number of seconds.
    #[error("TASKDECK_TIMEOUT_SECS must be a positive number of seconds, got '{0}'")]
    InvalidTimeout(String),
}

/// Endpoints and limits used by the HTTP adapters.
///
/// # Examples
///
/// ```
/// use taskdeck::config::TodoClientConfig;
///
/// let config = TodoClientConfig::default();
/// assert_eq!(config.api_base_url, "http://localhost:8080/api/v1");
/// assert_eq!(config.request_timeout.as_secs(), 30);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoClientConfig {
    /// Base URL of the task API; `/tasks` is appended.
    pub api_base_url: String,
    /// Image upload endpoint.
    pub upload_url: String,
    /// Base URL that uploaded image paths resolve against.
    pub asset_base_url: String,
    /// Per-request timeout.
    pub request_timeout: Duration,
}

impl Default for TodoClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080/api/v1".to_owned(),
            upload_url: "http://localhost:8080/api/upload".to_owned(),
            asset_base_url: "http://localhost:8080".to_owned(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl TodoClientConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through `lookup`, falling back to defaults for
    /// unset or blank keys.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a value is invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let value = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_owned())
                .filter(|trimmed| !trimmed.is_empty())
        };

        let api_base_url = url_or(API_URL_VAR, value(API_URL_VAR), defaults.api_base_url)?;
        let upload_url = url_or(UPLOAD_URL_VAR, value(UPLOAD_URL_VAR), defaults.upload_url)?;
        let asset_base_url = url_or(ASSET_URL_VAR, value(ASSET_URL_VAR), defaults.asset_base_url)?;
        let request_timeout = value(TIMEOUT_SECS_VAR)
            .map_or(Ok(defaults.request_timeout), |raw| parse_timeout(&raw))?;

        Ok(Self {
            api_base_url,
            upload_url,
            asset_base_url,
            request_timeout,
        })
    }
}

fn url_or(
    variable: &'static str,
    candidate: Option<String>,
    fallback: String,
) -> Result<String, ConfigError> {
    let Some(url) = candidate else {
        return Ok(fallback);
    };
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(url.trim_end_matches('/').to_owned())
    } else {
        Err(ConfigError::InvalidUrl {
            variable,
            value: url,
        })
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.parse::<u64>() {
        Ok(seconds) if seconds > 0 => Ok(Duration::from_secs(seconds)),
        _ => Err(ConfigError::InvalidTimeout(raw.to_owned())),
    }
}
