//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `LIQUID_LUXURY_API_URL` - Base URL of the backend REST API
//!
//! ## Optional
//! - `LIQUID_LUXURY_STORAGE_PATH` - Path to the persisted-state JSON file
//!   (defaults to in-memory storage when unset)
//! - `LIQUID_LUXURY_TIMEOUT_SECS` - Per-request timeout (default: 30)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend REST API.
    pub api_url: Url,
    /// Where to persist browser-equivalent state (token, theme, liked IDs).
    pub storage_path: Option<PathBuf>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_url = get_required_env("LIQUID_LUXURY_API_URL")?;
        let api_url = Url::parse(&api_url).map_err(|e| {
            ConfigError::InvalidEnvVar("LIQUID_LUXURY_API_URL".to_string(), e.to_string())
        })?;

        let storage_path = get_optional_env("LIQUID_LUXURY_STORAGE_PATH").map(PathBuf::from);

        let timeout_secs = get_env_or_default("LIQUID_LUXURY_TIMEOUT_SECS", "30")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("LIQUID_LUXURY_TIMEOUT_SECS".to_string(), e.to_string())
            })?;

        Ok(Self {
            api_url,
            storage_path,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Build a config pointing at a given base URL, with defaults elsewhere.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the URL does not parse.
    pub fn for_api_url(api_url: &str) -> Result<Self, ConfigError> {
        let api_url = Url::parse(api_url).map_err(|e| {
            ConfigError::InvalidEnvVar("LIQUID_LUXURY_API_URL".to_string(), e.to_string())
        })?;
        Ok(Self {
            api_url,
            storage_path: None,
            timeout: Duration::from_secs(30),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
