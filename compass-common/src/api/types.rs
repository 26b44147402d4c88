//! Wire types for the analysis backend API
//!
//! Exact request/response shapes the console depends on:
//! - `GET  /api/health`  → [`HealthStatus`]
//! - `GET  /api/prompt`  → [`PromptConfig`]
//! - `PUT  /api/prompt`  body [`PromptConfig`] → [`PromptConfig`]
//! - `GET  /api/models`  → [`ModelList`]
//! - `PUT  /api/models`  body [`SetModelRequest`] → 2xx (body ignored)
//! - `POST /api/analyze` multipart `video` → [`AnalyzeResponse`],
//!   non-2xx body [`ErrorDetail`]

use serde::{Deserialize, Serialize};

/// Prompt configuration held by the remote config store.
///
/// The rubric is ordered and order-significant; labels are unique
/// (case-sensitive). The server may normalize fields on save, so the
/// response to `PUT /api/prompt` is the new source of truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptConfig {
    pub prompt_version: String,
    pub prompt_text: String,
    pub rubric: Vec<String>,
}

/// Score for a single rubric dimension.
///
/// The server bounds `score` to 1..=5; the console renders it as a
/// fraction of 5 and does not re-validate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RubricScore {
    pub label: String,
    pub score: u8,
    pub rationale: String,
}

/// Structured analysis of one submitted video.
///
/// Produced exactly once per successful analyze call; immutable once
/// received; replaced wholesale by the next analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub rubric: Vec<RubricScore>,
    pub overall_summary: String,
}

/// Successful `POST /api/analyze` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub analysis: AnalysisResult,
    #[serde(default)]
    pub cached: bool,
    pub model: String,
    pub video_hash: String,
}

/// `GET /api/models` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelList {
    pub current: String,
    pub available: Vec<String>,
}

/// `PUT /api/models` request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetModelRequest {
    pub model: String,
}

/// Error body carried by non-2xx analyze responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub detail: Option<String>,
}

/// `GET /api/health` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}
