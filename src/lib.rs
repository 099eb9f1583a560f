//! Crypto News MCP Server Library
//!
//! A Model Context Protocol (MCP) server exposing a free crypto news API.
//! Provides tools for fetching latest, topical, breaking and keyword-matched
//! news articles.

pub mod config;
pub mod error;
pub mod mcp;
pub mod news;

pub use config::Config;
pub use error::{NewsMcpError, Result};
