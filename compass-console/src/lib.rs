//! Compass operator console library
//!
//! Client-side orchestration for the interview analysis backend: the
//! upload → analyze → result session state machine, rubric and model
//! synchronization with the remote config store, and the pure presentation
//! derivations. The rendering layer (the REPL binary, or any other
//! front-end) receives plain data and drives the operations exposed here.

pub mod export;
pub mod models;
pub mod presenter;
pub mod services;
pub mod session;

pub use models::{PreviewUrl, PreviewWatch, StatusLine, VideoAsset};
pub use services::{
    AnalysisBackend, AnalysisClient, AnalysisError, ConfigClient, ConfigLoadError, ConfigSaveError,
    ConfigStore,
};
pub use session::{ModelSelector, RubricSynchronizer, SessionController, SessionPhase};

use chrono::{NaiveDate, Utc};
use std::path::{Path, PathBuf};
use tracing::warn;

/// One operator session: the three sibling state owners plus the latest
/// operator-visible status line.
///
/// Sub-state is mutated only through the delegating operations below; the
/// presentation layer reads through the accessors.
#[derive(Debug, Default)]
pub struct OperatorSession {
    rubric: RubricSynchronizer,
    models: ModelSelector,
    controller: SessionController,
    status: StatusLine,
}

impl OperatorSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load prompt and model configuration from the config store. The two
    /// fetches are independent and may complete in either order; each
    /// failure maps to its own persistent OFFLINE status.
    pub async fn initialize(&mut self, store: &dyn ConfigStore) {
        let (prompt, models) = tokio::join!(store.fetch_prompt(), store.fetch_models());

        match prompt {
            Ok(config) => self.rubric.initialize(config),
            Err(error) => {
                warn!(error = %error, "Prompt configuration unavailable");
                self.status = StatusLine::PromptLoadFailed;
            }
        }

        match models {
            Ok(list) => self.models.initialize(list),
            Err(error) => {
                warn!(error = %error, "Model list unavailable");
                self.status = StatusLine::ModelLoadFailed;
            }
        }
    }

    /// Add a rubric label and commit; updates the status when a commit ran.
    pub async fn add_rubric_label(&mut self, store: &dyn ConfigStore, label: &str) {
        if let Some(status) = self.rubric.add(store, label).await {
            self.status = status;
        }
    }

    /// Remove a rubric label and commit; updates the status when a commit ran.
    pub async fn remove_rubric_label(&mut self, store: &dyn ConfigStore, label: &str) {
        if let Some(status) = self.rubric.remove(store, label).await {
            self.status = status;
        }
    }

    /// Select the active model (optimistic, pushed to the store).
    pub async fn select_model(&mut self, store: &dyn ConfigStore, model: &str) {
        if let Some(status) = self.models.select(store, model).await {
            self.status = status;
        }
    }

    /// Select the source video, replacing (and releasing) any prior one.
    pub fn select_video(&mut self, asset: VideoAsset) {
        self.controller.select_video(asset);
    }

    pub fn clear_video(&mut self) {
        self.controller.clear_video();
    }

    /// Run one analysis round-trip and record the settled status.
    pub async fn run_analysis(&mut self, backend: &dyn AnalysisBackend) {
        self.status = self.controller.run_analysis(backend).await;
    }

    /// Export the current result as a JSON document; `Ok(None)` when export
    /// is disabled (no result present).
    pub fn export(&self, dir: &Path, prefix: &str) -> compass_common::Result<Option<PathBuf>> {
        let document = export::build_document(
            self.controller.result(),
            self.controller.provenance(),
            Utc::now(),
        );
        match document {
            Some(document) => Ok(Some(export::write_document(&document, dir, prefix)?)),
            None => Ok(None),
        }
    }

    /// Headline derived from the current phase and result.
    pub fn headline(&self) -> String {
        presenter::headline(self.controller.is_submitting(), self.controller.result())
    }

    /// Session metadata line for the given date.
    pub fn session_line(&self, date: NaiveDate) -> String {
        presenter::session_line(
            date,
            self.controller.video().map(VideoAsset::file_name),
            self.controller
                .provenance()
                .map(|provenance| provenance.model.as_str()),
            self.models.current(),
            self.controller
                .provenance()
                .map(|provenance| provenance.video_hash.as_str()),
        )
    }

    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    pub fn rubric(&self) -> &RubricSynchronizer {
        &self.rubric
    }

    pub fn models(&self) -> &ModelSelector {
        &self.models
    }

    pub fn controller(&self) -> &SessionController {
        &self.controller
    }
}
