//! Downstream request construction
//!
//! Maps a validated tool invocation onto exactly one news API route.

use std::fmt;

use crate::error::McpError;
use crate::mcp::validate::NormalizedArgs;

/// Routes exposed by the news API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    News,
    Search,
    Defi,
    Bitcoin,
    Breaking,
    Sources,
}

impl Endpoint {
    /// URL path of the route
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::News => "/api/news",
            Endpoint::Search => "/api/search",
            Endpoint::Defi => "/api/defi",
            Endpoint::Bitcoin => "/api/bitcoin",
            Endpoint::Breaking => "/api/breaking",
            Endpoint::Sources => "/api/sources",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// A fully resolved GET request against the news API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsRequest {
    pub endpoint: Endpoint,

    /// Query pairs in wire order, already encoded
    pub query: Vec<(String, String)>,
}

impl NewsRequest {
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            query: Vec::new(),
        }
    }

    fn with_param(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    fn with_limit(self, limit: Option<String>) -> Self {
        match limit {
            Some(limit) => self.with_param("limit", limit),
            None => self,
        }
    }

    /// Look up a query value by key
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Render the absolute URL against `base_url`
    pub fn url(&self, base_url: &str) -> String {
        let mut url = format!("{}{}", base_url.trim_end_matches('/'), self.endpoint.path());
        if !self.query.is_empty() {
            let query = self
                .query
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<_>>()
                .join("&");
            url.push('?');
            url.push_str(&query);
        }
        url
    }
}

/// Build the downstream request for a tool invocation
pub fn build(tool: &str, args: &NormalizedArgs) -> Result<NewsRequest, McpError> {
    let limit = args.integer("limit").map(|n| n.to_string());

    let request = match tool {
        "get_crypto_news" => {
            let mut request = NewsRequest::new(Endpoint::News).with_limit(limit);
            if let Some(source) = args.text("source") {
                // Known ids encode to themselves; anything else cannot leak extra parameters.
                request = request.with_param("source", urlencoding::encode(source));
            }
            request
        }
        "search_crypto_news" => {
            let keywords = args.text("keywords").unwrap_or_default();
            NewsRequest::new(Endpoint::Search)
                .with_param("q", urlencoding::encode(keywords))
                .with_limit(limit)
        }
        "get_defi_news" => NewsRequest::new(Endpoint::Defi).with_limit(limit),
        "get_bitcoin_news" => NewsRequest::new(Endpoint::Bitcoin).with_limit(limit),
        "get_breaking_news" => NewsRequest::new(Endpoint::Breaking).with_limit(limit),
        _ => {
            return Err(McpError::UnknownTool {
                name: tool.to_string(),
            })
        }
    };

    Ok(request)
}
