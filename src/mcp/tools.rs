//! MCP tool dispatch
//!
//! Runs one invocation through validation, request construction, the news
//! API call and rendering. Every failure along the way ends up as an
//! error-flagged [`CallToolResult`].

use serde_json::Value;

use crate::error::{McpError, Result};
use crate::mcp::types::{CallToolResult, Tool};
use crate::mcp::{catalog, format, validate};
use crate::news::client::NewsClient;
use crate::news::request;
use crate::news::types::NewsResponse;

/// Tool handler
#[derive(Debug, Clone)]
pub struct ToolHandler {
    news_client: NewsClient,
}

impl ToolHandler {
    /// Create a new tool handler
    pub fn new(news_client: NewsClient) -> Self {
        Self { news_client }
    }

    /// List all available tools
    pub fn list_tools(&self) -> Vec<Tool> {
        catalog::list_tools()
    }

    /// Call a tool by name
    pub async fn call_tool(&self, name: &str, args: Value) -> CallToolResult {
        let outcome = self.execute(name, &args).await;

        match &outcome {
            Ok(response) => tracing::info!(
                tool = name,
                articles = response.articles().len(),
                "Tool call succeeded"
            ),
            Err(e) => tracing::warn!(tool = name, error = %e, "Tool call failed"),
        }

        format::render(outcome)
    }

    async fn execute(&self, name: &str, args: &Value) -> Result<NewsResponse> {
        let tool = catalog::find(name).ok_or_else(|| McpError::UnknownTool {
            name: name.to_string(),
        })?;

        let args = validate::normalize(tool, args)?;
        let request = request::build(tool.name, &args)?;

        self.news_client.fetch(&request).await
    }
}
