//! Managed server environment variables.
//!
//! The backend exposes a fixed key set; anything outside it is ignored
//! server-side, so the form never offers free-form keys.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Key/value map exchanged with `/api/env` and `/api/env/apply`.
pub type EnvValues = BTreeMap<String, String>;

/// A managed configuration key with its operator-facing description.
#[derive(Debug, Clone, Copy)]
pub struct ManagedKey {
    pub key: &'static str,
    pub description: &'static str,
}

/// The fixed set of keys the backend accepts, in display order.
pub const MANAGED_KEYS: &[ManagedKey] = &[
    ManagedKey {
        key: "AUTH_KEY",
        description: "authentication key for the proxy API",
    },
    ManagedKey {
        key: "MAX_CONNECTIONS",
        description: "maximum upstream connections",
    },
    ManagedKey {
        key: "MAX_KEEPALIVE_CONNECTIONS",
        description: "maximum keep-alive connections",
    },
    ManagedKey {
        key: "KEEPALIVE_EXPIRY",
        description: "keep-alive expiry (seconds)",
    },
    ManagedKey {
        key: "HOST",
        description: "server bind address",
    },
    ManagedKey {
        key: "PORT",
        description: "server port",
    },
];

/// Response of `POST /api/env/apply`: which keys the server actually updated.
#[derive(Debug, Deserialize)]
pub struct ApplyResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub updated: EnvValues,
    #[serde(default)]
    pub note: Option<String>,
}

/// True if `key` is one of the managed keys.
pub fn is_managed(key: &str) -> bool {
    MANAGED_KEYS.iter().any(|k| k.key == key)
}
