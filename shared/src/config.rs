//! Runtime configuration for the exchange front end

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::errors::{SharedError, SharedResult};

pub const DEFAULT_CATALOG_URL: &str = "https://www.googleapis.com/books/v1";
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:3000";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_MAX_RESULTS: u32 = 20;

/// Endpoints and limits used by the page controllers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeConfig {
    /// Base URL of the book metadata catalog
    pub catalog_url: String,
    /// Base URL of the exchange backend (`/api/donate`, `/api/receive`)
    pub backend_url: String,
    pub request_timeout: Duration,
    /// Upper bound on keyword search candidates
    pub max_results: u32,
    /// JSON file replacing the built-in sponsor pool
    pub ad_pool_path: Option<PathBuf>,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            max_results: DEFAULT_MAX_RESULTS,
            ad_pool_path: None,
        }
    }
}

impl ExchangeConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - EXCHANGE_CATALOG_URL: catalog base URL
    /// - EXCHANGE_BACKEND_URL: backend base URL
    /// - EXCHANGE_REQUEST_TIMEOUT_MS: per-request timeout in milliseconds
    /// - EXCHANGE_MAX_RESULTS: keyword search result limit (1-40)
    /// - EXCHANGE_AD_POOL: path to a JSON sponsor pool
    pub fn from_env() -> SharedResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> SharedResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("EXCHANGE_CATALOG_URL") {
            config.catalog_url = parse_url("EXCHANGE_CATALOG_URL", &url)?;
        }
        if let Some(url) = lookup("EXCHANGE_BACKEND_URL") {
            config.backend_url = parse_url("EXCHANGE_BACKEND_URL", &url)?;
        }
        if let Some(timeout) = lookup("EXCHANGE_REQUEST_TIMEOUT_MS") {
            let millis: u64 = timeout.trim().parse().map_err(|_| invalid("EXCHANGE_REQUEST_TIMEOUT_MS", &timeout))?;
            if millis == 0 {
                return Err(invalid("EXCHANGE_REQUEST_TIMEOUT_MS", &timeout));
            }
            config.request_timeout = Duration::from_millis(millis);
        }
        if let Some(max) = lookup("EXCHANGE_MAX_RESULTS") {
            let parsed: u32 = max.trim().parse().map_err(|_| invalid("EXCHANGE_MAX_RESULTS", &max))?;
            // Google Books caps maxResults at 40
            if !(1..=40).contains(&parsed) {
                return Err(invalid("EXCHANGE_MAX_RESULTS", &max));
            }
            config.max_results = parsed;
        }
        if let Some(path) = lookup("EXCHANGE_AD_POOL") {
            if !path.trim().is_empty() {
                config.ad_pool_path = Some(PathBuf::from(path));
            }
        }

        Ok(config)
    }
}

fn parse_url(field: &str, value: &str) -> SharedResult<String> {
    let trimmed = value.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(trimmed.to_string())
    } else {
        Err(invalid(field, value))
    }
}

fn invalid(field: &str, value: &str) -> SharedError {
    SharedError::InvalidConfig {
        field: field.to_string(),
        value: value.to_string(),
    }
}
