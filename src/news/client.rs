//! News API client
//!
//! Thin HTTP client for the downstream news API.

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::{ConfigError, NewsMcpError, Result, TransportError};
use crate::news::request::{Endpoint, NewsRequest};
use crate::news::types::{NewsResponse, SourcesResponse};

/// Longest slice of an error body carried into error messages
const MAX_ERROR_BODY: usize = 500;

/// News API client
#[derive(Debug, Clone)]
pub struct NewsClient {
    /// HTTP client
    http_client: reqwest::Client,

    /// Base URL of the news API
    base_url: String,

    /// Per-request timeout, kept for error reporting
    timeout: Duration,
}

impl NewsClient {
    /// Create a new client from configuration
    pub fn new(config: &Config) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| ConfigError::HttpClient {
                message: e.to_string(),
            })?;

        Ok(Self {
            http_client,
            base_url: config.api_base_url.clone(),
            timeout: config.request_timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch articles for a tool request
    pub async fn fetch(&self, request: &NewsRequest) -> Result<NewsResponse> {
        self.get_json(request).await
    }

    /// List the outlets known to the API
    pub async fn get_sources(&self) -> Result<SourcesResponse> {
        self.get_json(&NewsRequest::new(Endpoint::Sources)).await
    }

    async fn get_json<T: DeserializeOwned>(&self, request: &NewsRequest) -> Result<T> {
        let url = request.url(&self.base_url);
        let endpoint = request.endpoint.path().to_string();

        tracing::debug!(%url, "Requesting news API");

        let response = self
            .http_client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            return Err(TransportError::Status {
                endpoint,
                status: status.as_u16(),
                body: truncate(&text),
            }
            .into());
        }

        serde_json::from_str(&text).map_err(|e| {
            TransportError::Decode {
                endpoint,
                message: e.to_string(),
            }
            .into()
        })
    }

    fn transport_error(&self, err: reqwest::Error) -> NewsMcpError {
        let err = match TransportError::from(err) {
            TransportError::Timeout { endpoint, .. } => TransportError::Timeout {
                endpoint,
                timeout_ms: self.timeout.as_millis(),
            },
            other => other,
        };
        err.into()
    }
}

fn truncate(body: &str) -> String {
    let body = body.trim();
    if body.chars().count() <= MAX_ERROR_BODY {
        return body.to_string();
    }
    let mut cut: String = body.chars().take(MAX_ERROR_BODY).collect();
    cut.push('…');
    cut
}
