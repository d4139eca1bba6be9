//! Environment variable form.
//!
//! The backend exposes a fixed key set (see `models::env::MANAGED_KEYS`);
//! the form holds one editable value per key, collects all non-empty values
//! into a single object, and submits it either to `/api/env` (persisted,
//! takes effect after restart) or `/api/env/apply` (applied to the running
//! server, which reports back the keys it actually updated). Value semantics
//! are never validated client-side; the backend is the sole authority.

use crate::client::EnvBackend;
use crate::errors::ConsoleError;
use crate::models::env::{is_managed, ApplyResponse, EnvValues, ManagedKey, MANAGED_KEYS};
use crate::notify::{Notice, Notifier};

pub struct EnvForm<B, N> {
    backend: B,
    notifier: N,
    values: EnvValues,
}

impl<B, N> EnvForm<B, N>
where
    B: EnvBackend,
    N: Notifier,
{
    pub fn new(backend: B, notifier: N) -> Self {
        Self {
            backend,
            notifier,
            values: EnvValues::new(),
        }
    }

    /// Fetch current values for the managed keys. Keys outside the managed
    /// set are ignored.
    pub async fn load(&mut self) -> Result<(), ConsoleError> {
        match self.backend.get_env().await {
            Ok(current) => {
                self.values = MANAGED_KEYS
                    .iter()
                    .filter_map(|k| {
                        current.get(k.key).map(|v| (k.key.to_string(), v.clone()))
                    })
                    .collect();
                Ok(())
            }
            Err(e) => {
                self.notifier
                    .notify(Notice::error(format!("failed to load configuration: {e}")));
                Err(e)
            }
        }
    }

    /// Set the value for a managed key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConsoleError> {
        if !is_managed(key) {
            return Err(ConsoleError::Validation(format!(
                "unknown configuration key: {key}"
            )));
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    /// The managed keys in display order, with their current values.
    pub fn entries(&self) -> Vec<(&'static ManagedKey, Option<&str>)> {
        MANAGED_KEYS
            .iter()
            .map(|k| (k, self.values.get(k.key).map(String::as_str)))
            .collect()
    }

    /// All non-empty trimmed values, as the single object submitted to the
    /// backend.
    pub fn collect(&self) -> EnvValues {
        self.values
            .iter()
            .map(|(k, v)| (k.clone(), v.trim().to_string()))
            .filter(|(_, v)| !v.is_empty())
            .collect()
    }

    /// Persist the collected values. They take effect after a restart; the
    /// backend rejects an empty or unrecognized set with a `detail` message.
    pub async fn save(&self) -> Result<String, ConsoleError> {
        match self.backend.save_env(&self.collect()).await {
            Ok(resp) => {
                self.notifier.notify(Notice::success(resp.message.clone()));
                Ok(resp.message)
            }
            Err(e) => {
                self.notifier
                    .notify(Notice::error(format!("failed to save configuration: {e}")));
                Err(e)
            }
        }
    }

    /// Apply the collected values to the running server. Applying with
    /// nothing collected is a validation error with no network call.
    pub async fn apply_live(&self) -> Result<ApplyResponse, ConsoleError> {
        let values = self.collect();
        if values.is_empty() {
            let message = "fill in at least one configuration value".to_string();
            self.notifier.notify(Notice::warning(message.clone()));
            return Err(ConsoleError::Validation(message));
        }

        match self.backend.apply_env(&values).await {
            Ok(resp) => {
                self.notifier.notify(Notice::success(format!(
                    "applied {} configuration changes",
                    resp.updated.len()
                )));
                if let Some(note) = &resp.note {
                    self.notifier.notify(Notice::info(note.clone()));
                }
                Ok(resp)
            }
            Err(e) => {
                self.notifier
                    .notify(Notice::error(format!("live apply failed: {e}")));
                Err(e)
            }
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::token::MessageResponse;
    use async_trait::async_trait;

    struct NullEnvBackend;

    #[async_trait]
    impl EnvBackend for NullEnvBackend {
        async fn get_env(&self) -> Result<EnvValues, ConsoleError> {
            Ok(EnvValues::new())
        }

        async fn save_env(&self, _: &EnvValues) -> Result<MessageResponse, ConsoleError> {
            Ok(MessageResponse {
                message: "saved".into(),
            })
        }

        async fn apply_env(&self, _: &EnvValues) -> Result<ApplyResponse, ConsoleError> {
            Ok(ApplyResponse {
                message: "applied".into(),
                updated: EnvValues::new(),
                note: None,
            })
        }
    }

    struct NullNotifier;

    impl Notifier for NullNotifier {
        fn notify(&self, _: Notice) {}
    }

    #[test]
    fn test_collect_drops_empty_and_trims() {
        let mut form = EnvForm::new(NullEnvBackend, NullNotifier);
        form.set("HOST", " 0.0.0.0 ").unwrap();
        form.set("PORT", "").unwrap();
        form.set("AUTH_KEY", "   ").unwrap();

        let collected = form.collect();
        assert_eq!(collected.len(), 1);
        assert_eq!(collected["HOST"], "0.0.0.0");
    }

    #[test]
    fn test_unknown_key_rejected() {
        let mut form = EnvForm::new(NullEnvBackend, NullNotifier);
        let result = form.set("DATABASE_URL", "x");
        assert!(matches!(result, Err(ConsoleError::Validation(_))));
    }

    #[tokio::test]
    async fn test_apply_with_nothing_collected_is_validation_error() {
        let form = EnvForm::new(NullEnvBackend, NullNotifier);
        let result = form.apply_live().await;
        assert!(result.unwrap_err().is_validation());
    }

    #[test]
    fn test_entries_follow_display_order() {
        let mut form = EnvForm::new(NullEnvBackend, NullNotifier);
        form.set("PORT", "8000").unwrap();

        let entries = form.entries();
        assert_eq!(entries.len(), MANAGED_KEYS.len());
        assert_eq!(entries[0].0.key, "AUTH_KEY");
        assert_eq!(entries[0].1, None);
        let port = entries.iter().find(|(k, _)| k.key == "PORT").unwrap();
        assert_eq!(port.1, Some("8000"));
    }
}
