use std::env;
use std::time::Duration;

use dotenvy::dotenv;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub api_prefix: String,
    pub token: Option<String>,
    pub request_timeout: Duration,

    // Logging
    pub log_dir: String,
    pub log_level: String,

    // Interaction tuning
    pub search_debounce: Duration,
    pub geolocation_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup, `HRIS_*` keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("HRIS_API_URL").ok_or(ConfigError::Missing("HRIS_API_URL"))?;
        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            return Err(ConfigError::Invalid {
                key: "HRIS_API_URL",
                value: api_url,
            });
        }

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            api_prefix: normalize_prefix(
                &lookup("HRIS_API_PREFIX").unwrap_or_else(|| "/api/v1".to_string()),
            ),
            token: lookup("HRIS_TOKEN").filter(|t| !t.trim().is_empty()),
            request_timeout: Duration::from_secs(parse_or(&lookup, "HRIS_TIMEOUT_SECS", 30)?),

            log_dir: lookup("HRIS_LOG_DIR").unwrap_or_else(|| "logs".to_string()),
            log_level: lookup("HRIS_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),

            search_debounce: Duration::from_millis(parse_or(
                &lookup,
                "HRIS_SEARCH_DEBOUNCE_MS",
                300,
            )?),
            geolocation_timeout: Duration::from_millis(parse_or(
                &lookup,
                "HRIS_GEOLOCATION_TIMEOUT_MS",
                10_000,
            )?),
        })
    }

    /// Base URL every endpoint path is appended to.
    pub fn base_url(&self) -> String {
        format!("{}{}", self.api_url, self.api_prefix)
    }
}

fn parse_or<F>(lookup: &F, key: &'static str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}

fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}
