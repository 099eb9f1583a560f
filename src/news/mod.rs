//! News API module
//!
//! Contains types, request construction, and the HTTP client for the downstream news API.

pub mod client;
pub mod request;
pub mod types;
