//! Configuration management for the Crypto News MCP Server
//!
//! Handles environment variables and configuration loading.

use std::time::Duration;

use crate::error::{ConfigError, Result};

/// Environment variable overriding the news API base URL
pub const API_URL_VAR: &str = "CRYPTO_NEWS_API_URL";

/// Environment variable overriding the per-request timeout (seconds)
pub const TIMEOUT_VAR: &str = "CRYPTO_NEWS_TIMEOUT_SECS";

/// Configuration for the Crypto News MCP Server
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the news API, without a trailing slash
    pub api_base_url: String,

    /// Timeout applied to every downstream request
    pub request_timeout: Duration,

    /// User-Agent sent to the news API
    pub user_agent: String,
}

impl Config {
    /// Create a new configuration from the environment
    pub fn new() -> Result<Self> {
        Self::from_values(
            std::env::var(API_URL_VAR).ok(),
            std::env::var(TIMEOUT_VAR).ok(),
        )
    }

    /// Build a configuration from raw (possibly unset) values
    pub fn from_values(api_url: Option<String>, timeout_secs: Option<String>) -> Result<Self> {
        let api_base_url = match api_url {
            Some(url) if !url.trim().is_empty() => normalize_base_url(&url)?,
            _ => news::DEFAULT_API_BASE_URL.to_string(),
        };

        let request_timeout = match timeout_secs {
            Some(raw) if !raw.trim().is_empty() => {
                let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidEnvVar {
                    var: TIMEOUT_VAR.to_string(),
                    message: format!("'{}' is not a whole number of seconds", raw),
                })?;
                if secs == 0 {
                    return Err(ConfigError::InvalidEnvVar {
                        var: TIMEOUT_VAR.to_string(),
                        message: "timeout must be at least 1 second".to_string(),
                    }
                    .into());
                }
                Duration::from_secs(secs)
            }
            _ => Duration::from_secs(news::DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            api_base_url,
            request_timeout,
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        })
    }

    /// Point the configuration at a different news API host
    pub fn with_base_url(mut self, url: &str) -> Result<Self> {
        self.api_base_url = normalize_base_url(url)?;
        Ok(self)
    }

    /// Override the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: news::DEFAULT_API_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(news::DEFAULT_TIMEOUT_SECS),
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Validate an absolute http(s) URL and strip trailing slashes
fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let url = reqwest::Url::parse(trimmed).map_err(|e| ConfigError::InvalidConfig {
        message: format!("invalid API URL '{}': {}", trimmed, e),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidConfig {
            message: format!("API URL must use http or https, got '{}'", url.scheme()),
        }
        .into());
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}

/// News API constants
pub mod news {
    /// Public instance of the news API
    pub const DEFAULT_API_BASE_URL: &str = "https://free-crypto-news.vercel.app";

    /// Default per-request timeout in seconds
    pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

    /// Source identifiers understood by the `/api/news` route
    pub const SOURCES: &[&str] = &[
        "coindesk",
        "theblock",
        "decrypt",
        "cointelegraph",
        "bitcoinmagazine",
        "blockworks",
        "defiant",
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_values(None, None).unwrap();
        assert_eq!(config.api_base_url, news::DEFAULT_API_BASE_URL);
        assert_eq!(config.request_timeout, Duration::from_secs(15));
        assert!(config.user_agent.starts_with("crypto-news-mcp/"));
    }

    #[test]
    fn test_custom_base_url_strips_trailing_slash() {
        let config =
            Config::from_values(Some("http://localhost:3000/".to_string()), None).unwrap();
        assert_eq!(config.api_base_url, "http://localhost:3000");
    }

    #[test]
    fn test_rejects_non_http_url() {
        assert!(Config::from_values(Some("ftp://example.com".to_string()), None).is_err());
        assert!(Config::from_values(Some("not a url".to_string()), None).is_err());
    }

    #[test]
    fn test_timeout_parsing() {
        let config = Config::from_values(None, Some("3".to_string())).unwrap();
        assert_eq!(config.request_timeout, Duration::from_secs(3));

        assert!(Config::from_values(None, Some("0".to_string())).is_err());
        assert!(Config::from_values(None, Some("soon".to_string())).is_err());
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = Config::from_values(Some("  ".to_string()), Some(String::new())).unwrap();
        assert_eq!(config.api_base_url, news::DEFAULT_API_BASE_URL);
        assert_eq!(config.request_timeout, Duration::from_secs(15));
    }
}
