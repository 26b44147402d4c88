//! Prompt/model configuration endpoint client
//!
//! Thin fetch wrappers over the backend's config endpoints. A load failure
//! is surfaced as a persistent offline status by the caller; there is no
//! automatic retry policy anywhere in the console.

use async_trait::async_trait;
use compass_common::api::{HealthStatus, ModelList, PromptConfig, SetModelRequest};
use thiserror::Error;
use tracing::{debug, info};

use super::ConfigStore;

const USER_AGENT: &str = concat!("Compass/", env!("CARGO_PKG_VERSION"));

/// Prompt or model fetch failed
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Server returned status {0}")]
    Status(u16),
}

/// Rubric or model update rejected
#[derive(Debug, Error)]
pub enum ConfigSaveError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Server returned status {0}")]
    Status(u16),
}

/// Config endpoint client
pub struct ConfigClient {
    http: reqwest::Client,
    base_url: String,
}

impl ConfigClient {
    /// Create a client for the given backend base URL (no trailing slash).
    ///
    /// No request timeout is set: a hung call stays in flight until the
    /// transport resolves it.
    pub fn new(base_url: &str) -> Result<Self, ConfigLoadError> {
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Connectivity probe against `GET /api/health`.
    pub async fn health(&self) -> Result<HealthStatus, ConfigLoadError> {
        let url = format!("{}/api/health", self.base_url);
        debug!(url = %url, "Checking backend health");
        let resp = self.http.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ConfigLoadError::Status(status.as_u16()));
        }
        Ok(resp.json().await?)
    }
}

#[async_trait]
impl ConfigStore for ConfigClient {
    async fn fetch_prompt(&self) -> Result<PromptConfig, ConfigLoadError> {
        let url = format!("{}/api/prompt", self.base_url);
        debug!(url = %url, "Fetching prompt configuration");

        let resp = self.http.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ConfigLoadError::Status(status.as_u16()));
        }

        let config: PromptConfig = resp.json().await?;
        info!(
            prompt_version = %config.prompt_version,
            rubric_labels = config.rubric.len(),
            "Prompt configuration loaded"
        );
        Ok(config)
    }

    async fn save_prompt(&self, config: &PromptConfig) -> Result<PromptConfig, ConfigSaveError> {
        let url = format!("{}/api/prompt", self.base_url);
        debug!(
            url = %url,
            rubric_labels = config.rubric.len(),
            "Saving prompt configuration"
        );

        let resp = self.http.put(&url).json(config).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ConfigSaveError::Status(status.as_u16()));
        }

        let saved: PromptConfig = resp.json().await?;
        info!(
            prompt_version = %saved.prompt_version,
            rubric_labels = saved.rubric.len(),
            "Prompt configuration saved"
        );
        Ok(saved)
    }

    async fn fetch_models(&self) -> Result<ModelList, ConfigLoadError> {
        let url = format!("{}/api/models", self.base_url);
        debug!(url = %url, "Fetching model list");

        let resp = self.http.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ConfigLoadError::Status(status.as_u16()));
        }

        let models: ModelList = resp.json().await?;
        info!(
            current = %models.current,
            available = models.available.len(),
            "Model list loaded"
        );
        Ok(models)
    }

    async fn set_model(&self, model: &str) -> Result<(), ConfigSaveError> {
        let url = format!("{}/api/models", self.base_url);
        debug!(url = %url, model = %model, "Pushing model selection");

        let body = SetModelRequest {
            model: model.to_string(),
        };
        let resp = self.http.put(&url).json(&body).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ConfigSaveError::Status(status.as_u16()));
        }

        // Response body ignored on success
        info!(model = %model, "Model selection saved");
        Ok(())
    }
}
