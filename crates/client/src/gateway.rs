//! Generic API gateway client.
//!
//! Every feature module talks to the backend through [`ApiClient::request`]
//! or [`ApiClient::authed`]. The contract, kept from the web storefront:
//!
//! - Callers always get back a uniform `{status, data}` shape and branch on
//!   `status`; expected HTTP failures are never surfaced as `Err`.
//! - Network and protocol failures are folded into the same shape with a
//!   synthetic status of 0 and the error text as the message.
//! - Authenticated calls read the token from the session and short-circuit
//!   with a synthetic 401 when it is absent - no network call is made.
//! - No retry, no request deduplication. Read caching lives one layer up in
//!   [`crate::resource`].

use std::sync::Arc;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::instrument;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::session::Session;

/// Status used when the request never produced an HTTP response
/// (connection refused, DNS failure, timeout). Matches the browser
/// convention of a zero status for transport errors.
pub const STATUS_TRANSPORT_ERROR: u16 = 0;

/// The body of an outgoing request.
pub enum RequestBody {
    Empty,
    Json(Value),
    /// Multipart form for image-bearing operations (product create/update,
    /// profile picture).
    Multipart(reqwest::multipart::Form),
}

/// Uniform response shape returned by the gateway for every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status, or a synthetic one (0 transport, 401 missing token).
    pub status: u16,
    /// Parsed response body; non-JSON bodies are wrapped as `{"message": text}`.
    pub data: Value,
}

impl ApiResponse {
    /// A client-fabricated response produced without a network call.
    #[must_use]
    pub fn synthetic(status: u16, message: &str) -> Self {
        Self {
            status,
            data: json!({ "message": message }),
        }
    }

    /// The synthetic 401 used when no token is stored.
    #[must_use]
    pub fn missing_token() -> Self {
        Self::synthetic(401, "No token provided")
    }

    /// Whether the status is in the 2xx range.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Human-readable message: the body's `message` field when present,
    /// otherwise the given fallback.
    #[must_use]
    pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.data
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or(fallback)
    }

    /// Decode the body into a typed value.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Decode`] if the body does not match `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        Ok(serde_json::from_value(self.data.clone())?)
    }
}

/// Client for the Liquid Luxury backend REST API.
///
/// Cloning is cheap; clones share the HTTP connection pool and session.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: String,
    session: Session,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying HTTP client cannot
    /// be built with the configured timeout.
    pub fn new(config: &ClientConfig, session: Session) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: config.api_url.as_str().trim_end_matches('/').to_owned(),
                session,
            }),
        })
    }

    /// The session this client reads tokens from.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.inner.base_url, path.trim_start_matches('/'))
    }

    /// Issue an unauthenticated request.
    #[instrument(skip(self, body), fields(method = %method, path = %path))]
    pub async fn request(&self, method: Method, path: &str, body: RequestBody) -> ApiResponse {
        self.send(method, path, body, None).await
    }

    /// Issue an authenticated request.
    ///
    /// Short-circuits with a synthetic 401 when no token is stored. A real
    /// 401 from the backend tears the session down, mirroring the web app's
    /// token-expiry handling.
    #[instrument(skip(self, body), fields(method = %method, path = %path))]
    pub async fn authed(&self, method: Method, path: &str, body: RequestBody) -> ApiResponse {
        let Some(token) = self.inner.session.token() else {
            tracing::debug!("No token stored, returning synthetic 401");
            return ApiResponse::missing_token();
        };

        let response = self.send(method, path, body, Some(&token)).await;

        if response.status == 401 {
            tracing::info!("Backend rejected token, clearing session");
            self.inner.session.clear();
        }

        response
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
        token: Option<&str>,
    ) -> ApiResponse {
        let mut builder = self.inner.client.request(method, self.endpoint(path));

        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }

        builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(form) => builder.multipart(form),
        };

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "Request failed before a response arrived");
                return ApiResponse::synthetic(STATUS_TRANSPORT_ERROR, &e.to_string());
            }
        };

        let status = response.status().as_u16();
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read response body");
                return ApiResponse::synthetic(STATUS_TRANSPORT_ERROR, &e.to_string());
            }
        };

        let data = if text.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or_else(|_| json!({ "message": text }))
        };

        ApiResponse { status, data }
    }
}
