//! Client-side error type.
//!
//! Expected HTTP failures are NOT represented here - the gateway folds them
//! into the uniform `{status, data}` response shape and screens branch on the
//! status (see [`crate::gateway::ApiResponse`]). `ClientError` covers the
//! cases where the client itself cannot proceed: bad configuration, a broken
//! HTTP client, storage I/O, and undecodable payloads. Form validation never reaches this type;
//! screens surface those as notices without issuing a request.

use thiserror::Error;

use crate::config::ConfigError;

/// Application-level error type for the storefront client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Configuration is missing or invalid.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// A response body did not decode into the expected shape.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Persisted storage could not be read or written.
    #[error("Storage error: {0}")]
    Storage(String),
}
