//! News API type definitions
//!
//! These types mirror the news API responses. Every field is optional: the
//! API owns the shape, and a missing field degrades to a default instead of
//! failing the whole response.

use serde::{Deserialize, Serialize};

/// A single news article
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Headline
    #[serde(default)]
    pub title: Option<String>,

    /// Link to the full article
    #[serde(default)]
    pub link: Option<String>,

    /// Display name of the publishing outlet
    #[serde(default)]
    pub source: Option<String>,

    /// Relative age, e.g. "2h ago"
    #[serde(default)]
    pub time_ago: Option<String>,

    /// Publication timestamp
    #[serde(default)]
    pub pub_date: Option<String>,
}

impl Article {
    /// Headline, or a placeholder when the API omitted it
    pub fn title(&self) -> &str {
        non_empty(&self.title).unwrap_or("(untitled)")
    }

    /// Link, or a placeholder when the API omitted it
    pub fn link(&self) -> &str {
        non_empty(&self.link).unwrap_or("(no link)")
    }

    /// Source label, or a placeholder when the API omitted it
    pub fn source(&self) -> &str {
        non_empty(&self.source).unwrap_or("unknown source")
    }

    /// Recency marker: `timeAgo`, then `pubDate`
    pub fn recency(&self) -> &str {
        non_empty(&self.time_ago)
            .or_else(|| non_empty(&self.pub_date))
            .unwrap_or("unknown time")
    }
}

/// Response of the article routes (`/api/news`, `/api/search`, ...)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewsResponse {
    /// Articles in ranking order
    #[serde(default)]
    pub articles: Option<Vec<Article>>,

    /// Total number of matching articles
    #[serde(default)]
    pub total_count: Option<u64>,

    /// Outlets that contributed to this response
    #[serde(default)]
    pub sources: Option<Vec<String>>,
}

impl NewsResponse {
    pub fn articles(&self) -> &[Article] {
        self.articles.as_deref().unwrap_or_default()
    }

    pub fn total_count(&self) -> u64 {
        self.total_count.unwrap_or(0)
    }

    pub fn sources(&self) -> &[String] {
        self.sources.as_deref().unwrap_or_default()
    }
}

/// An outlet known to the news API
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SourceInfo {
    /// Identifier accepted by the `source` query parameter
    #[serde(default)]
    pub key: Option<String>,

    /// Display name
    #[serde(default)]
    pub name: Option<String>,

    /// Homepage or feed URL
    #[serde(default)]
    pub url: Option<String>,

    /// Health as reported by the API
    #[serde(default)]
    pub status: Option<String>,
}

/// Response of `/api/sources`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SourcesResponse {
    #[serde(default)]
    pub sources: Option<Vec<SourceInfo>>,
}

impl SourcesResponse {
    pub fn sources(&self) -> &[SourceInfo] {
        self.sources.as_deref().unwrap_or_default()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_payload() {
        let response: NewsResponse = serde_json::from_value(json!({
            "articles": [{"title": "A", "link": "L", "source": "S", "timeAgo": "1h"}],
            "totalCount": 1,
            "sources": ["S"]
        }))
        .unwrap();

        assert_eq!(response.articles().len(), 1);
        assert_eq!(response.articles()[0].title(), "A");
        assert_eq!(response.articles()[0].recency(), "1h");
        assert_eq!(response.total_count(), 1);
        assert_eq!(response.sources(), ["S".to_string()]);
    }

    #[test]
    fn test_missing_and_null_fields_default() {
        let response: NewsResponse =
            serde_json::from_value(json!({"articles": null, "extra": true})).unwrap();
        assert!(response.articles().is_empty());
        assert_eq!(response.total_count(), 0);
        assert!(response.sources().is_empty());
    }

    #[test]
    fn test_article_fallbacks() {
        let article: Article =
            serde_json::from_value(json!({"title": " ", "pubDate": "2026-01-02"})).unwrap();
        assert_eq!(article.title(), "(untitled)");
        assert_eq!(article.link(), "(no link)");
        assert_eq!(article.source(), "unknown source");
        assert_eq!(article.recency(), "2026-01-02");
    }

    #[test]
    fn test_wrong_shape_is_rejected() {
        let result: Result<NewsResponse, _> = serde_json::from_value(json!({"articles": "none"}));
        assert!(result.is_err());
    }
}
