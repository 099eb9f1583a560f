//! Response rendering
//!
//! Converts news API payloads, or the failure that replaced them, into the
//! content blocks returned from `tools/call`.

use crate::error::Result;
use crate::mcp::types::{CallToolResult, ToolResultContent};
use crate::news::types::{Article, NewsResponse};

/// Fallback when the API does not report its sources
const UNKNOWN_SOURCES: &str = "various sources";

/// Render the outcome of a tool invocation
pub fn render(outcome: Result<NewsResponse>) -> CallToolResult {
    match outcome {
        Ok(response) => render_news(&response),
        Err(e) => CallToolResult::error(e.to_string()),
    }
}

/// One block per article followed by a summary block
pub fn render_news(response: &NewsResponse) -> CallToolResult {
    let mut content: Vec<ToolResultContent> = response
        .articles()
        .iter()
        .enumerate()
        .map(|(i, article)| ToolResultContent::text(format_article(i + 1, article)))
        .collect();

    content.push(ToolResultContent::text(summary(response)));

    CallToolResult::blocks(content)
}

fn format_article(position: usize, article: &Article) -> String {
    format!(
        "{}. **{}**\n   Link: {}\n   Source: {} • {}",
        position,
        article.title(),
        article.link(),
        article.source(),
        article.recency()
    )
}

fn summary(response: &NewsResponse) -> String {
    let sources = if response.sources().is_empty() {
        UNKNOWN_SOURCES.to_string()
    } else {
        response.sources().join(", ")
    };

    format!("Found {} articles from {}", response.total_count(), sources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{NewsMcpError, TransportError};
    use serde_json::json;

    fn response(value: serde_json::Value) -> NewsResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_single_article() {
        let result = render_news(&response(json!({
            "articles": [{"title": "A", "link": "L", "source": "S", "timeAgo": "1h"}],
            "totalCount": 1,
            "sources": ["S"]
        })));

        assert!(!result.is_error);
        assert_eq!(result.content.len(), 2);

        let article = result.content[0].as_text();
        assert!(article.starts_with("1. **A**"));
        for needle in ["L", "S", "1h"] {
            assert!(article.contains(needle));
        }

        assert_eq!(result.content[1].as_text(), "Found 1 articles from S");
    }

    #[test]
    fn test_order_and_numbering() {
        let result = render_news(&response(json!({
            "articles": [{"title": "first"}, {"title": "second"}, {"title": "third"}],
            "totalCount": 42,
            "sources": ["CoinDesk", "Decrypt"]
        })));

        assert_eq!(result.content.len(), 4);
        assert!(result.content[0].as_text().starts_with("1. **first**"));
        assert!(result.content[2].as_text().starts_with("3. **third**"));
        assert_eq!(
            result.content[3].as_text(),
            "Found 42 articles from CoinDesk, Decrypt"
        );
    }

    #[test]
    fn test_empty_payload() {
        let result = render_news(&NewsResponse::default());
        assert!(!result.is_error);
        assert_eq!(result.content.len(), 1);
        assert_eq!(result.content[0].as_text(), "Found 0 articles from various sources");
    }

    #[test]
    fn test_failure_becomes_error_block() {
        let err = NewsMcpError::Transport(TransportError::Unreachable {
            message: "connection refused".to_string(),
        });
        let result = render(Err(err));
        assert!(result.is_error);
        assert_eq!(result.content.len(), 1);
        assert!(result.content[0].as_text().contains("connection refused"));
    }
}
