//! Rubric synchronization
//!
//! Maintains the working rubric list and pushes every effective mutation to
//! the remote config store. The server response to each commit is the new
//! source of truth: both the committed config and the working draft adopt
//! it, so server-side normalization is immediately visible.
//!
//! On commit failure the draft is NOT rolled back: the operator keeps
//! their edit and sees a failure status instead. Commits are serialized:
//! each add/remove awaits its own commit through the exclusive receiver, so
//! at most one save is in flight at a time.

use compass_common::api::PromptConfig;
use tracing::{info, warn};

use crate::models::StatusLine;
use crate::services::ConfigStore;

/// Owner of the rubric draft and its commit protocol.
#[derive(Debug, Default)]
pub struct RubricSynchronizer {
    draft: Vec<String>,
    committed: Option<PromptConfig>,
    syncing: bool,
}

impl RubricSynchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt the loaded config; called once, at the first successful fetch.
    pub fn initialize(&mut self, config: PromptConfig) {
        self.draft = config.rubric.clone();
        info!(
            prompt_version = %config.prompt_version,
            rubric_labels = self.draft.len(),
            "Rubric initialized from config store"
        );
        self.committed = Some(config);
    }

    /// Working rubric list, unique and order-significant.
    pub fn draft(&self) -> &[String] {
        &self.draft
    }

    /// Last server-acknowledged config, if any.
    pub fn committed(&self) -> Option<&PromptConfig> {
        self.committed.as_ref()
    }

    /// True while a commit round-trip is in flight.
    pub fn is_syncing(&self) -> bool {
        self.syncing
    }

    /// Append a label and commit.
    ///
    /// The label is trimmed first; an empty or already-present label is a
    /// no-op (no draft change, no commit, `None` returned).
    pub async fn add(&mut self, store: &dyn ConfigStore, label: &str) -> Option<StatusLine> {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return None;
        }
        if self.draft.iter().any(|existing| existing == trimmed) {
            return None;
        }

        self.draft.push(trimmed.to_string());
        self.commit(store).await
    }

    /// Remove the first (and, by the uniqueness invariant, only) occurrence
    /// of `label` and commit. Removing an absent label edits nothing and
    /// does not commit.
    pub async fn remove(&mut self, store: &dyn ConfigStore, label: &str) -> Option<StatusLine> {
        let position = self.draft.iter().position(|existing| existing == label)?;
        self.draft.remove(position);
        self.commit(store).await
    }

    /// Push the full config with the current draft as rubric.
    ///
    /// Before initialization there is nothing to save against; the commit
    /// is skipped and the draft keeps diverging locally.
    pub async fn commit(&mut self, store: &dyn ConfigStore) -> Option<StatusLine> {
        let committed = match self.committed.as_ref() {
            Some(committed) => committed,
            None => {
                warn!("Rubric commit skipped: prompt configuration not loaded");
                return None;
            }
        };

        let payload = PromptConfig {
            prompt_version: committed.prompt_version.clone(),
            prompt_text: committed.prompt_text.clone(),
            rubric: self.draft.clone(),
        };

        self.syncing = true;
        let outcome = store.save_prompt(&payload).await;
        self.syncing = false;

        match outcome {
            Ok(saved) => {
                self.draft = saved.rubric.clone();
                self.committed = Some(saved);
                Some(StatusLine::RubricUpdated)
            }
            Err(error) => {
                warn!(error = %error, "Rubric sync failed; local draft retained");
                Some(StatusLine::RubricSaveFailed)
            }
        }
    }
}
