//! Wire types for the token listing endpoints.

use serde::{Deserialize, Serialize};

/// A pool token as reported by the backend.
///
/// Immutable on the client: records are created only through batch-add and
/// removed only by id. Expiry is presented exactly as the server formatted
/// it; the client never recomputes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRecord {
    pub id: u64,
    /// Opaque credential material.
    pub token: String,
    /// Raw expiry as a unix timestamp.
    #[serde(default)]
    pub exp_time: i64,
    /// Pre-formatted expiry string, rendered verbatim.
    #[serde(rename = "exp_time_beijing")]
    pub exp_time_display: String,
    /// Whether the token falls inside the backend's expiry threshold.
    pub is_expired: bool,
}

/// One page of the token listing (`GET /api/tokens`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPage {
    pub tokens: Vec<TokenRecord>,
    pub total: u64,
    pub page: u32,
    #[serde(default)]
    pub per_page: u32,
    pub total_pages: u32,
}

/// Body for `POST /api/tokens/batch`.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenBatchRequest {
    pub tokens: Vec<String>,
}

/// Batch-add result. `tokens` holds the records the server actually created;
/// invalid or duplicate submissions are skipped server-side.
#[derive(Debug, Deserialize)]
pub struct TokenBatchResponse {
    #[serde(default)]
    pub message: String,
    pub tokens: Vec<TokenRecord>,
}

/// Generic `{message}` response used by the delete and cleanup endpoints.
#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
