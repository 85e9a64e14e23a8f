//! Auth API transport.
//!
//! Thin reqwest wrapper for `/api/Auth/login` and `/api/Auth/register`.
//! Status handling belongs to the flow; this layer only reports what the
//! server said. Pure parsing in `parse_reply` for testability.

use std::time::Duration;

use serde_json::Value;

use super::types::{ApiReply, AuthError, LoginRequest, RegisterRequest};
use crate::config::{ClientConfig, ConfigError};

const LOGIN_PATH: &str = "/api/Auth/login";
const REGISTER_PATH: &str = "/api/Auth/register";

/// Seam between the credential flow and the network.
#[async_trait::async_trait]
pub trait AuthApi: Send + Sync {
    /// Submit login credentials. Any HTTP status is an `Ok` reply.
    async fn login(&self, request: &LoginRequest) -> Result<ApiReply, AuthError>;

    /// Submit a registration. Any HTTP status is an `Ok` reply.
    async fn register(&self, request: &RegisterRequest) -> Result<ApiReply, AuthError>;
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct HttpAuthApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpAuthApi {
    /// Build a client for the configured API base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClientBuild`] if the reqwest client cannot
    /// be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| ConfigError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.api_base_url.clone() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<B: serde::Serialize + Sync>(&self, path: &str, body: &B) -> Result<ApiReply, AuthError> {
        let url = endpoint(&self.base_url, path);
        tracing::debug!(%url, "auth request");

        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        tracing::debug!(%url, status, "auth response");
        Ok(parse_reply(status, &text))
    }
}

#[async_trait::async_trait]
impl AuthApi for HttpAuthApi {
    async fn login(&self, request: &LoginRequest) -> Result<ApiReply, AuthError> {
        self.post(LOGIN_PATH, request).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<ApiReply, AuthError> {
        self.post(REGISTER_PATH, request).await
    }
}

// =============================================================================
// PARSING
// =============================================================================

fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}

/// Pull `token` and `message` out of a body. Each field is read on its own,
/// so a non-string value in one never hides the other. Bodies that are not
/// JSON (empty, plain text, HTML error pages) yield neither field.
fn parse_reply(status: u16, body: &str) -> ApiReply {
    let parsed = serde_json::from_str::<Value>(body).unwrap_or(Value::Null);
    ApiReply { status, token: string_field(&parsed, "token"), message: string_field(&parsed, "message") }
}

fn string_field(body: &Value, key: &str) -> Option<String> {
    body.get(key).and_then(Value::as_str).map(str::to_owned)
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
