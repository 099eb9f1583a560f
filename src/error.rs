//! Error types for the Crypto News MCP Server
//!
//! This module defines the error hierarchy for all operations in the server.

use thiserror::Error;

/// Main error type for the Crypto News MCP Server
#[derive(Error, Debug)]
pub enum NewsMcpError {
    /// Tool argument validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// MCP protocol errors
    #[error("MCP protocol error: {0}")]
    Mcp(#[from] McpError),

    /// News API transport errors
    #[error("News API error: {0}")]
    Transport(#[from] TransportError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Tool argument validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid parameter: {field} - {reason}")]
    InvalidParameter { field: String, reason: String },

    #[error("Tool arguments must be a JSON object")]
    NotAnObject,
}

/// MCP protocol errors
#[derive(Error, Debug)]
pub enum McpError {
    #[error("Unknown tool: {name}")]
    UnknownTool { name: String },

    #[error("Invalid tool arguments: {message}")]
    InvalidArguments { message: String },
}

/// Failures talking to the downstream news API
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Request to {endpoint} timed out after {timeout_ms}ms")]
    Timeout { endpoint: String, timeout_ms: u128 },

    #[error("Request to {endpoint} failed with status {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("Could not decode response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },

    #[error("News API unreachable: {message}")]
    Unreachable { message: String },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {message}")]
    InvalidEnvVar { var: String, message: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Failed to build HTTP client: {message}")]
    HttpClient { message: String },
}

/// Result type alias for Crypto News MCP operations
pub type Result<T> = std::result::Result<T, NewsMcpError>;

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let endpoint = err
            .url()
            .map(|url| url.path().to_string())
            .unwrap_or_default();

        if err.is_timeout() {
            // The precise budget is not carried by reqwest; the client fills it in.
            TransportError::Timeout {
                endpoint,
                timeout_ms: 0,
            }
        } else if err.is_decode() {
            TransportError::Decode {
                endpoint,
                message: err.to_string(),
            }
        } else {
            TransportError::Unreachable {
                message: err.to_string(),
            }
        }
    }
}

impl From<reqwest::Error> for NewsMcpError {
    fn from(err: reqwest::Error) -> Self {
        NewsMcpError::Transport(TransportError::from(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ValidationError::MissingField {
            field: "keywords".to_string(),
        };
        assert_eq!(err.to_string(), "Missing required field: keywords");
    }

    #[test]
    fn test_error_conversion() {
        let err: NewsMcpError = McpError::UnknownTool {
            name: "get_weather".to_string(),
        }
        .into();
        assert!(matches!(err, NewsMcpError::Mcp(_)));
        assert!(err.to_string().contains("get_weather"));
    }

    #[test]
    fn test_status_error_includes_cause() {
        let err = TransportError::Status {
            endpoint: "/api/news".to_string(),
            status: 500,
            body: "{\"error\":\"Failed to fetch news\"}".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("500"));
        assert!(text.contains("Failed to fetch news"));
    }
}
