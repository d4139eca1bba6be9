use thiserror::Error;

/// Failure taxonomy for console operations.
///
/// Validation errors are rejected before any network call. Backend errors
/// carry the server's `detail` message verbatim. Stale listing responses are
/// not errors; the controller discards them silently.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("{0}")]
    Validation(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("backend rejected request ({status}): {detail}")]
    Backend { status: u16, detail: String },

    #[error("invalid response body: {0}")]
    Decode(String),
}

impl ConsoleError {
    /// True for errors raised before any request was sent.
    pub fn is_validation(&self) -> bool {
        matches!(self, ConsoleError::Validation(_))
    }
}
