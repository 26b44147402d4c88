//! Remote service clients for the Compass console
//!
//! One client struct per concern: [`ConfigClient`] wraps the prompt/model
//! config endpoints, [`AnalysisClient`] wraps the analyze endpoint. Each
//! operation maps to exactly one network round-trip; no caching, batching,
//! or retry happens at this layer.
//!
//! The [`ConfigStore`] and [`AnalysisBackend`] traits are the seams the
//! session components talk through; tests substitute counting mocks.

pub mod analysis_client;
pub mod config_client;

pub use analysis_client::{AnalysisClient, AnalysisError};
pub use config_client::{ConfigClient, ConfigLoadError, ConfigSaveError};

use crate::models::VideoAsset;
use async_trait::async_trait;
use compass_common::api::{AnalyzeResponse, ModelList, PromptConfig};

/// Remote prompt/model configuration store.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    async fn fetch_prompt(&self) -> Result<PromptConfig, ConfigLoadError>;

    /// Save the full config, rubric replaced wholesale. The returned config
    /// is the new source of truth (the server may normalize fields).
    async fn save_prompt(&self, config: &PromptConfig) -> Result<PromptConfig, ConfigSaveError>;

    async fn fetch_models(&self) -> Result<ModelList, ConfigLoadError>;

    async fn set_model(&self, model: &str) -> Result<(), ConfigSaveError>;
}

/// Remote analysis service.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    async fn analyze(&self, video: &VideoAsset) -> Result<AnalyzeResponse, AnalysisError>;
}
