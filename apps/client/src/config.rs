use std::time::Duration;

use anyhow::{Context, Result};

use crate::upload::validation::DEFAULT_MAX_UPLOAD_BYTES;

const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Client configuration loaded from environment variables.
/// Every variable is optional; a malformed value is a startup error.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub max_upload_bytes: u64,
    /// `None` leaves the transport default in place (no client-side timeout).
    pub request_timeout: Option<Duration>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_base_url = lookup("API_BASE_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let max_upload_bytes = match lookup("MAX_UPLOAD_BYTES") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .context("MAX_UPLOAD_BYTES must be a whole number of bytes")?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        let request_timeout = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(raw) if !raw.trim().is_empty() => {
                let secs = raw
                    .trim()
                    .parse::<u64>()
                    .context("REQUEST_TIMEOUT_SECS must be a whole number of seconds")?;
                Some(Duration::from_secs(secs))
            }
            _ => None,
        };

        Ok(Config {
            api_base_url,
            max_upload_bytes,
            request_timeout,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.max_upload_bytes, 10_485_760);
        assert!(config.request_timeout.is_none());
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn test_base_url_override_drops_trailing_slash() {
        let config = config_from(&[("API_BASE_URL", "https://ats.example.com/")]).unwrap();
        assert_eq!(config.api_base_url, "https://ats.example.com");
    }

    #[test]
    fn test_blank_base_url_falls_back_to_default() {
        let config = config_from(&[("API_BASE_URL", "  ")]).unwrap();
        assert_eq!(config.api_base_url, "http://localhost:8000");
    }

    #[test]
    fn test_timeout_and_size_overrides() {
        let config = config_from(&[
            ("REQUEST_TIMEOUT_SECS", "45"),
            ("MAX_UPLOAD_BYTES", "2048"),
        ])
        .unwrap();
        assert_eq!(config.request_timeout, Some(Duration::from_secs(45)));
        assert_eq!(config.max_upload_bytes, 2048);
    }

    #[test]
    fn test_malformed_size_is_an_error() {
        let err = config_from(&[("MAX_UPLOAD_BYTES", "ten megs")]).unwrap_err();
        assert!(err.to_string().contains("MAX_UPLOAD_BYTES"));
    }
}
