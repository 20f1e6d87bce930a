//! # Service Configuration Module
//!
//! This module defines the configuration for the recipe search service,
//! including the external catalog endpoint, timeouts, and server binding.

use std::env;

// Constants for service configuration
pub const DEFAULT_BASE_URL: &str = "https://api.spoonacular.com";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
/// Number of recipes returned when the client does not ask for a count
pub const DEFAULT_RECIPE_COUNT: usize = 3;

/// Configuration for the recipe search service
#[derive(Debug, Clone)]
pub struct Config {
    /// API key for the external recipe catalog
    pub api_key: String,
    /// Base URL of the external recipe catalog
    pub base_url: String,
    /// Address the HTTP server binds to
    pub bind_addr: String,
    /// Timeout applied to every outbound catalog call, in seconds
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Build a configuration from environment variables
    ///
    /// `SPOONACULAR_API_KEY` is required; `SPOONACULAR_BASE_URL`,
    /// `BIND_ADDR` and `REQUEST_TIMEOUT_SECS` fall back to defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = env::var("SPOONACULAR_API_KEY")
            .map_err(|_| anyhow::anyhow!("SPOONACULAR_API_KEY must be set"))?;

        let base_url =
            env::var("SPOONACULAR_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let request_timeout_secs = env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        Ok(Self {
            api_key,
            base_url,
            bind_addr,
            request_timeout_secs,
        })
    }
}
