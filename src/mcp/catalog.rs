//! Tool catalog
//!
//! The fixed set of tools this server advertises. Each tool is described
//! declaratively; the JSON input schema and argument validation are both
//! derived from the same field table.

use serde_json::{json, Map, Value};

use crate::config::news::SOURCES;
use crate::mcp::types::Tool;

/// Shape and constraints of a single tool argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Whole number, clamped into `min..=max`
    Integer { default: i64, min: i64, max: i64 },

    /// Free text; `choices` is advisory and not enforced
    Text {
        required: bool,
        choices: &'static [&'static str],
    },
}

/// A documented tool argument
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub fn is_required(&self) -> bool {
        matches!(self.kind, FieldKind::Text { required: true, .. })
    }

    fn schema(&self) -> Value {
        match self.kind {
            FieldKind::Integer { default, min, max } => json!({
                "type": "integer",
                "description": self.description,
                "default": default,
                "minimum": min,
                "maximum": max,
            }),
            FieldKind::Text { choices, .. } => {
                let mut schema = json!({
                    "type": "string",
                    "description": self.description,
                });
                if !choices.is_empty() {
                    schema["enum"] = json!(choices);
                }
                schema
            }
        }
    }
}

/// A tool definition
#[derive(Debug, Clone, Copy)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub fields: &'static [FieldSpec],
}

impl ToolSpec {
    /// JSON Schema for the tool's arguments
    pub fn input_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .fields
            .iter()
            .map(|field| (field.name.to_string(), field.schema()))
            .collect();

        let mut schema = json!({
            "type": "object",
            "properties": properties,
        });

        let required: Vec<&str> = self
            .fields
            .iter()
            .filter(|field| field.is_required())
            .map(|field| field.name)
            .collect();
        if !required.is_empty() {
            schema["required"] = json!(required);
        }

        schema
    }

    /// Protocol representation of this tool
    pub fn to_tool(&self) -> Tool {
        Tool {
            name: self.name.to_string(),
            description: Some(self.description.to_string()),
            input_schema: self.input_schema(),
        }
    }
}

const fn limit(default: i64, max: i64, description: &'static str) -> FieldSpec {
    FieldSpec {
        name: "limit",
        description,
        kind: FieldKind::Integer {
            default,
            min: 1,
            max,
        },
    }
}

/// All tools, in advertised order
pub static TOOLS: &[ToolSpec] = &[
    ToolSpec {
        name: "get_crypto_news",
        description: "Get latest crypto news from 7 major sources (CoinDesk, The Block, Decrypt, CoinTelegraph, Bitcoin Magazine, Blockworks, The Defiant)",
        fields: &[
            limit(10, 50, "Maximum articles to return (1-50)"),
            FieldSpec {
                name: "source",
                description: "Filter by source: coindesk, theblock, decrypt, cointelegraph, bitcoinmagazine, blockworks, defiant",
                kind: FieldKind::Text {
                    required: false,
                    choices: SOURCES,
                },
            },
        ],
    },
    ToolSpec {
        name: "search_crypto_news",
        description: "Search crypto news by keywords across all sources",
        fields: &[
            FieldSpec {
                name: "keywords",
                description: "Comma-separated keywords to search for",
                kind: FieldKind::Text {
                    required: true,
                    choices: &[],
                },
            },
            limit(10, 30, "Maximum results (1-30)"),
        ],
    },
    ToolSpec {
        name: "get_defi_news",
        description: "Get DeFi-specific news (yield farming, DEXs, lending, protocols)",
        fields: &[limit(10, 30, "Maximum articles (1-30)")],
    },
    ToolSpec {
        name: "get_bitcoin_news",
        description: "Get Bitcoin-specific news (BTC, Lightning Network, miners, ordinals)",
        fields: &[limit(10, 30, "Maximum articles (1-30)")],
    },
    ToolSpec {
        name: "get_breaking_news",
        description: "Get breaking crypto news from the last 2 hours",
        fields: &[limit(5, 20, "Maximum articles (1-20)")],
    },
];

/// Find a tool by name
pub fn find(name: &str) -> Option<&'static ToolSpec> {
    TOOLS.iter().find(|tool| tool.name == name)
}

/// All tools in protocol form
pub fn list_tools() -> Vec<Tool> {
    TOOLS.iter().map(ToolSpec::to_tool).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_entries_complete() {
        let tools = list_tools();
        assert_eq!(tools.len(), 5);
        for tool in &tools {
            assert!(!tool.name.is_empty());
            assert!(!tool.description.as_deref().unwrap_or("").is_empty());
            assert_eq!(tool.input_schema["type"], "object");
            assert!(tool.input_schema["properties"].is_object());
        }
    }

    #[test]
    fn test_names_unique_and_ordered() {
        let names: Vec<String> = list_tools().into_iter().map(|t| t.name).collect();
        let unique: HashSet<&String> = names.iter().collect();
        assert_eq!(unique.len(), names.len());
        assert_eq!(names[0], "get_crypto_news");
        assert_eq!(names[4], "get_breaking_news");
        assert_eq!(
            names,
            list_tools().into_iter().map(|t| t.name).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_search_schema_requires_keywords() {
        let schema = find("search_crypto_news").unwrap().input_schema();
        assert_eq!(schema["required"], json!(["keywords"]));
        assert_eq!(schema["properties"]["limit"]["maximum"], 30);
    }

    #[test]
    fn test_optional_only_tools_have_no_required_list() {
        let schema = find("get_breaking_news").unwrap().input_schema();
        assert!(schema.get("required").is_none());
        assert_eq!(schema["properties"]["limit"]["default"], 5);
        assert_eq!(schema["properties"]["limit"]["minimum"], 1);
    }

    #[test]
    fn test_source_enum_advertised() {
        let schema = find("get_crypto_news").unwrap().input_schema();
        let choices = schema["properties"]["source"]["enum"].as_array().unwrap();
        assert_eq!(choices.len(), SOURCES.len());
        assert!(choices.contains(&json!("coindesk")));
    }

    #[test]
    fn test_find_unknown() {
        assert!(find("get_weather").is_none());
    }
}
