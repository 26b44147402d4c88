//! Model selection
//!
//! Holds the active model identifier and the server-advertised list. A
//! selection updates local state optimistically before the network call
//! resolves; on failure the selection is kept and the status reports the
//! risk of desync (same policy as the rubric synchronizer).

use compass_common::api::ModelList;
use tracing::{info, warn};

use crate::models::StatusLine;
use crate::services::ConfigStore;

/// Owner of the active model identifier.
#[derive(Debug, Default)]
pub struct ModelSelector {
    current: String,
    available: Vec<String>,
}

impl ModelSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt the server's model list; called once, at the first successful
    /// fetch. `current` is displayed as returned, not validated locally.
    pub fn initialize(&mut self, models: ModelList) {
        info!(
            current = %models.current,
            available = models.available.len(),
            "Model selection initialized"
        );
        self.current = models.current;
        self.available = models.available;
    }

    /// Active model identifier; empty until initialized.
    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn available(&self) -> &[String] {
        &self.available
    }

    /// Select a model: local state first, then the push. A failed push
    /// keeps the optimistic selection and surfaces a status.
    pub async fn select(&mut self, store: &dyn ConfigStore, model: &str) -> Option<StatusLine> {
        self.current = model.to_string();
        match store.set_model(model).await {
            Ok(()) => None,
            Err(error) => {
                warn!(
                    model = %model,
                    error = %error,
                    "Model sync failed; optimistic selection retained"
                );
                Some(StatusLine::ModelUpdateFailed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{ConfigLoadError, ConfigSaveError};
    use async_trait::async_trait;
    use compass_common::api::PromptConfig;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct MockStore {
        pushes: AtomicUsize,
        fail_pushes: bool,
    }

    #[async_trait]
    impl ConfigStore for MockStore {
        async fn fetch_prompt(&self) -> Result<PromptConfig, ConfigLoadError> {
            unimplemented!("not used by the model selector")
        }

        async fn save_prompt(
            &self,
            _config: &PromptConfig,
        ) -> Result<PromptConfig, ConfigSaveError> {
            unimplemented!("not used by the model selector")
        }

        async fn fetch_models(&self) -> Result<ModelList, ConfigLoadError> {
            Ok(sample_models())
        }

        async fn set_model(&self, _model: &str) -> Result<(), ConfigSaveError> {
            self.pushes.fetch_add(1, Ordering::SeqCst);
            if self.fail_pushes {
                return Err(ConfigSaveError::Status(500));
            }
            Ok(())
        }
    }

    fn sample_models() -> ModelList {
        ModelList {
            current: "gemini-2.5-flash".to_string(),
            available: vec![
                "gemini-2.5-pro".to_string(),
                "gemini-2.5-flash".to_string(),
            ],
        }
    }

    #[tokio::test]
    async fn select_pushes_and_keeps_current() {
        let store = MockStore::default();
        let mut selector = ModelSelector::new();
        selector.initialize(sample_models());

        let status = selector.select(&store, "gemini-2.5-pro").await;
        assert_eq!(status, None);
        assert_eq!(selector.current(), "gemini-2.5-pro");
        assert_eq!(store.pushes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_push_keeps_optimistic_selection() {
        let store = MockStore {
            fail_pushes: true,
            ..Default::default()
        };
        let mut selector = ModelSelector::new();
        selector.initialize(sample_models());

        let status = selector.select(&store, "gemini-2.5-pro").await;
        assert_eq!(status, Some(StatusLine::ModelUpdateFailed));
        // No rollback: local reflects intent, status communicates risk
        assert_eq!(selector.current(), "gemini-2.5-pro");
    }
}
