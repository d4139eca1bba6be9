//! HTTP client for the token-pool backend.
//!
//! Endpoints:
//!   GET    /api/tokens?page=P&per_page=N
//!   POST   /api/tokens/batch
//!   DELETE /api/tokens/{id}
//!   DELETE /api/tokens/cleanup
//!   GET    /api/env
//!   POST   /api/env
//!   POST   /api/env/apply
//!
//! Non-success responses carry `{"detail": "..."}`; the detail is surfaced
//! to the operator verbatim.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::errors::ConsoleError;
use crate::models::env::{ApplyResponse, EnvValues};
use crate::models::token::{MessageResponse, TokenBatchRequest, TokenBatchResponse, TokenPage};

/// Token CRUD operations the listing controller depends on.
#[async_trait]
pub trait TokenBackend: Send + Sync {
    async fn list_tokens(&self, page: u32, per_page: u32) -> Result<TokenPage, ConsoleError>;
    async fn add_batch(&self, tokens: &[String]) -> Result<TokenBatchResponse, ConsoleError>;
    async fn delete_token(&self, id: u64) -> Result<(), ConsoleError>;
    async fn cleanup(&self) -> Result<MessageResponse, ConsoleError>;
}

/// Environment endpoints used by the env form.
#[async_trait]
pub trait EnvBackend: Send + Sync {
    async fn get_env(&self) -> Result<EnvValues, ConsoleError>;
    async fn save_env(&self, values: &EnvValues) -> Result<MessageResponse, ConsoleError>;
    async fn apply_env(&self, values: &EnvValues) -> Result<ApplyResponse, ConsoleError>;
}

/// Client for a single backend instance.
#[derive(Clone)]
pub struct ApiClient {
    base: String,
    http: Client,
}

impl ApiClient {
    /// Build a client from the loaded configuration.
    pub fn new(cfg: &Config) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
            .build()
            .expect("failed to build HTTP client");

        Self {
            base: cfg.base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Decode a response, mapping non-2xx statuses to `Backend` errors.
    async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ConsoleError> {
        let status = resp.status();
        if !status.is_success() {
            return Err(Self::backend_error(status, resp).await);
        }
        resp.json::<T>()
            .await
            .map_err(|e| ConsoleError::Decode(e.to_string()))
    }

    async fn backend_error(status: StatusCode, resp: Response) -> ConsoleError {
        let body = resp.bytes().await.unwrap_or_default();
        ConsoleError::Backend {
            status: status.as_u16(),
            detail: detail_from_body(status, &body),
        }
    }
}

/// Pull the `detail` field out of an error body, falling back to the raw
/// text, then to the bare status.
fn detail_from_body(status: StatusCode, body: &[u8]) -> String {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) {
        if let Some(detail) = value.get("detail").and_then(|d| d.as_str()) {
            return detail.to_string();
        }
    }
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        text.to_string()
    }
}

#[async_trait]
impl TokenBackend for ApiClient {
    async fn list_tokens(&self, page: u32, per_page: u32) -> Result<TokenPage, ConsoleError> {
        tracing::debug!(page, per_page, "fetching token page");
        let resp = self
            .http
            .get(self.url("/api/tokens"))
            .query(&[("page", page), ("per_page", per_page)])
            .send()
            .await?;
        Self::decode(resp).await
    }

    async fn add_batch(&self, tokens: &[String]) -> Result<TokenBatchResponse, ConsoleError> {
        tracing::debug!(count = tokens.len(), "submitting token batch");
        let body = TokenBatchRequest {
            tokens: tokens.to_vec(),
        };
        let resp = self
            .http
            .post(self.url("/api/tokens/batch"))
            .json(&body)
            .send()
            .await?;
        Self::decode(resp).await
    }

    async fn delete_token(&self, id: u64) -> Result<(), ConsoleError> {
        tracing::debug!(id, "deleting token");
        let resp = self
            .http
            .delete(self.url(&format!("/api/tokens/{id}")))
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Self::backend_error(status, resp).await);
        }
        Ok(())
    }

    async fn cleanup(&self) -> Result<MessageResponse, ConsoleError> {
        tracing::debug!("requesting expired-token cleanup");
        let resp = self
            .http
            .delete(self.url("/api/tokens/cleanup"))
            .send()
            .await?;
        Self::decode(resp).await
    }
}

#[async_trait]
impl EnvBackend for ApiClient {
    async fn get_env(&self) -> Result<EnvValues, ConsoleError> {
        let resp = self.http.get(self.url("/api/env")).send().await?;
        Self::decode(resp).await
    }

    async fn save_env(&self, values: &EnvValues) -> Result<MessageResponse, ConsoleError> {
        tracing::debug!(keys = values.len(), "saving environment variables");
        let resp = self
            .http
            .post(self.url("/api/env"))
            .json(values)
            .send()
            .await?;
        Self::decode(resp).await
    }

    async fn apply_env(&self, values: &EnvValues) -> Result<ApplyResponse, ConsoleError> {
        tracing::debug!(keys = values.len(), "applying environment variables live");
        let resp = self
            .http
            .post(self.url("/api/env/apply"))
            .json(values)
            .send()
            .await?;
        Self::decode(resp).await
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(base: &str) -> Config {
        Config {
            base_url: base.to_string(),
            timeout_secs: 5,
            connect_timeout_secs: 2,
            page_size: 15,
        }
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = ApiClient::new(&test_config("http://localhost:8000/"));
        assert_eq!(client.url("/api/tokens"), "http://localhost:8000/api/tokens");
    }

    #[test]
    fn test_detail_extracted_from_json() {
        let detail = detail_from_body(
            StatusCode::BAD_REQUEST,
            br#"{"detail": "No valid environment variables provided"}"#,
        );
        assert_eq!(detail, "No valid environment variables provided");
    }

    #[test]
    fn test_detail_falls_back_to_raw_text() {
        let detail = detail_from_body(StatusCode::BAD_GATEWAY, b"upstream exploded");
        assert_eq!(detail, "upstream exploded");
    }

    #[test]
    fn test_detail_falls_back_to_status() {
        let detail = detail_from_body(StatusCode::INTERNAL_SERVER_ERROR, b"");
        assert_eq!(detail, "HTTP 500");
    }
}
