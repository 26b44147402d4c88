//! Analyze endpoint client
//!
//! Submits the selected video as a multipart body and decodes the
//! structured analysis response. Non-success responses carry an optional
//! `detail` message that becomes the operator-facing error reason.

use async_trait::async_trait;
use compass_common::api::{AnalyzeResponse, ErrorDetail};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::AnalysisBackend;
use crate::models::VideoAsset;

const USER_AGENT: &str = concat!("Compass/", env!("CARGO_PKG_VERSION"));

/// Generic reason when the server rejects an analysis without detail
pub const GENERIC_ANALYSIS_REASON: &str = "ANALYSIS_FAILED";

/// Analyze call failed
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Analysis rejected: {0}")]
    Rejected(String),
}

impl AnalysisError {
    /// Operator-facing reason, upper-cased.
    pub fn reason(&self) -> String {
        match self {
            AnalysisError::Rejected(detail) => detail.to_uppercase(),
            AnalysisError::Network(err) => err.to_string().to_uppercase(),
        }
    }
}

/// Analyze endpoint client
pub struct AnalysisClient {
    http: reqwest::Client,
    base_url: String,
}

impl AnalysisClient {
    /// Create a client for the given backend base URL (no trailing slash).
    ///
    /// No request timeout is set: analysis duration is unbounded and a hung
    /// call leaves the session submitting until the transport resolves.
    pub fn new(base_url: &str) -> Result<Self, AnalysisError> {
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl AnalysisBackend for AnalysisClient {
    async fn analyze(&self, video: &VideoAsset) -> Result<AnalyzeResponse, AnalysisError> {
        let url = format!("{}/api/analyze", self.base_url);
        debug!(
            url = %url,
            file_name = %video.file_name(),
            size_bytes = video.size_bytes(),
            "Submitting video for analysis"
        );

        let part = reqwest::multipart::Part::bytes(video.bytes().to_vec())
            .file_name(video.file_name().to_string());
        let form = reqwest::multipart::Form::new().part("video", part);

        let resp = self.http.post(&url).multipart(form).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let detail = resp
                .json::<ErrorDetail>()
                .await
                .ok()
                .and_then(|body| body.detail);
            warn!(
                status = status.as_u16(),
                detail = detail.as_deref().unwrap_or("<none>"),
                "Analyze request rejected"
            );
            return Err(AnalysisError::Rejected(
                detail.unwrap_or_else(|| GENERIC_ANALYSIS_REASON.to_string()),
            ));
        }

        let response: AnalyzeResponse = resp.json().await?;
        info!(
            model = %response.model,
            cached = response.cached,
            video_hash = %response.video_hash,
            "Analysis complete"
        );
        Ok(response)
    }
}
