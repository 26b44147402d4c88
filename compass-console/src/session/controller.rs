//! Analysis session state machine
//!
//! One analysis run progresses Idle → Submitting → (Succeeded | CacheHit |
//! Failed). Succeeded and CacheHit are both terminal-until-next-submit
//! variants of the same "has result" condition, distinguished by the
//! backend's `cached` flag. Failed carries the operator-facing reason.
//!
//! At most one analyze call is outstanding at any instant: `begin_submit`
//! rejects while Submitting, and the async driver holds the controller
//! exclusively for the duration of the round-trip.

use compass_common::api::{AnalysisResult, AnalyzeResponse};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::models::{StatusLine, VideoAsset};
use crate::services::{AnalysisBackend, AnalysisError};

/// Session phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "UPPERCASE")]
pub enum SessionPhase {
    /// No run started, or source selection in progress
    Idle,
    /// Analyze call in flight
    Submitting,
    /// Result freshly computed by the backend
    Succeeded,
    /// Result served from the backend cache
    CacheHit,
    /// Analyze call failed; resubmission is allowed
    Failed { reason: String },
}

impl SessionPhase {
    pub fn is_submitting(&self) -> bool {
        matches!(self, SessionPhase::Submitting)
    }

    pub fn has_result(&self) -> bool {
        matches!(self, SessionPhase::Succeeded | SessionPhase::CacheHit)
    }
}

/// Provenance of the last successful result.
///
/// Set together with the analysis result, cleared together when a new
/// analysis starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionProvenance {
    pub model: String,
    pub cached: bool,
    pub video_hash: String,
}

/// A submit attempt that never reaches the network
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitRejection {
    #[error("no source file selected")]
    MissingSource,

    #[error("an analysis is already in flight")]
    AlreadySubmitting,
}

/// Owner of one analysis session's state.
///
/// All mutation goes through the transition operations below; the
/// presentation layer reads through the accessors.
#[derive(Debug, Default)]
pub struct SessionController {
    phase: SessionPhase,
    video: Option<VideoAsset>,
    result: Option<AnalysisResult>,
    provenance: Option<SessionProvenance>,
}

impl Default for SessionPhase {
    fn default() -> Self {
        SessionPhase::Idle
    }
}

impl SessionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the source video, replacing any previous asset.
    ///
    /// The new preview handle already exists (created with the asset); the
    /// prior asset's handle is released immediately after the swap.
    pub fn select_video(&mut self, asset: VideoAsset) {
        info!(file_name = %asset.file_name(), "Source video selected");
        if let Some(prev) = self.video.replace(asset) {
            prev.release_preview();
        }
    }

    /// Drop the selected video, releasing its preview handle.
    pub fn clear_video(&mut self) {
        if let Some(prev) = self.video.take() {
            prev.release_preview();
        }
    }

    /// Enter Submitting, clearing the previous result and provenance so no
    /// stale data is visible during the new run.
    ///
    /// Rejected synchronously when no source is selected or when a run is
    /// already in flight; a rejected submit has no network effect.
    pub fn begin_submit(&mut self) -> Result<(), SubmitRejection> {
        if self.phase.is_submitting() {
            warn!("Submit ignored: analysis already in flight");
            return Err(SubmitRejection::AlreadySubmitting);
        }
        if self.video.is_none() {
            warn!("Submit rejected: no source file selected");
            return Err(SubmitRejection::MissingSource);
        }

        self.result = None;
        self.provenance = None;
        self.phase = SessionPhase::Submitting;
        info!("Analysis submitted");
        Ok(())
    }

    /// Store the backend response and settle into Succeeded or CacheHit.
    pub fn complete_success(&mut self, response: AnalyzeResponse) -> StatusLine {
        let status = if response.cached {
            StatusLine::CacheHit
        } else {
            StatusLine::AnalysisSuccess
        };
        self.phase = if response.cached {
            SessionPhase::CacheHit
        } else {
            SessionPhase::Succeeded
        };
        info!(
            model = %response.model,
            cached = response.cached,
            video_hash = %response.video_hash,
            "Analysis session completed"
        );
        self.provenance = Some(SessionProvenance {
            model: response.model,
            cached: response.cached,
            video_hash: response.video_hash,
        });
        self.result = Some(response.analysis);
        status
    }

    /// Settle into Failed with the operator-facing reason. No partial
    /// result is ever stored; resubmission is allowed from here.
    pub fn complete_failure(&mut self, error: &AnalysisError) -> StatusLine {
        let reason = error.reason();
        warn!(reason = %reason, "Analysis session failed");
        self.phase = SessionPhase::Failed {
            reason: reason.clone(),
        };
        StatusLine::AnalysisFailed(reason)
    }

    /// Drive one full analysis round-trip: begin, one analyze call,
    /// complete. Returns the settled status line.
    pub async fn run_analysis(&mut self, backend: &dyn AnalysisBackend) -> StatusLine {
        match self.begin_submit() {
            Err(SubmitRejection::MissingSource) => return StatusLine::MissingSource,
            Err(SubmitRejection::AlreadySubmitting) => return StatusLine::Analyzing,
            Ok(()) => {}
        }

        let outcome = match self.video.as_ref() {
            Some(video) => backend.analyze(video).await,
            // Unreachable after a successful begin_submit; keep the state
            // machine honest rather than panic.
            None => return StatusLine::MissingSource,
        };

        match outcome {
            Ok(response) => self.complete_success(response),
            Err(error) => self.complete_failure(&error),
        }
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase.is_submitting()
    }

    pub fn video(&self) -> Option<&VideoAsset> {
        self.video.as_ref()
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn provenance(&self) -> Option<&SessionProvenance> {
        self.provenance.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compass_common::api::RubricScore;

    fn sample_response(cached: bool) -> AnalyzeResponse {
        AnalyzeResponse {
            analysis: AnalysisResult {
                rubric: vec![RubricScore {
                    label: "Communication".to_string(),
                    score: 4,
                    rationale: "Clear delivery.".to_string(),
                }],
                overall_summary: "Great communication.".to_string(),
            },
            cached,
            model: "gemini-2.5-flash".to_string(),
            video_hash: "abcdef1234567890".to_string(),
        }
    }

    #[test]
    fn submit_without_source_is_rejected() {
        let mut controller = SessionController::new();
        assert_eq!(
            controller.begin_submit(),
            Err(SubmitRejection::MissingSource)
        );
        assert_eq!(controller.phase(), &SessionPhase::Idle);
    }

    #[test]
    fn submit_while_submitting_is_rejected() {
        let mut controller = SessionController::new();
        controller.select_video(VideoAsset::from_bytes("a.mp4", vec![0]));
        controller.begin_submit().unwrap();
        assert_eq!(
            controller.begin_submit(),
            Err(SubmitRejection::AlreadySubmitting)
        );
        assert!(controller.is_submitting());
    }

    #[test]
    fn begin_submit_clears_stale_result() {
        let mut controller = SessionController::new();
        controller.select_video(VideoAsset::from_bytes("a.mp4", vec![0]));
        controller.begin_submit().unwrap();
        controller.complete_success(sample_response(false));
        assert!(controller.result().is_some());
        assert!(controller.provenance().is_some());

        // New run: no stale result may be visible while Submitting
        controller.begin_submit().unwrap();
        assert!(controller.is_submitting());
        assert!(controller.result().is_none());
        assert!(controller.provenance().is_none());
    }

    #[test]
    fn cached_flag_selects_cache_hit_phase() {
        let mut controller = SessionController::new();
        controller.select_video(VideoAsset::from_bytes("a.mp4", vec![0]));
        controller.begin_submit().unwrap();
        let status = controller.complete_success(sample_response(true));
        assert_eq!(status, StatusLine::CacheHit);
        assert_eq!(controller.phase(), &SessionPhase::CacheHit);
        assert!(controller.phase().has_result());
        assert!(controller.provenance().unwrap().cached);
    }

    #[test]
    fn failure_stores_reason_and_allows_resubmission() {
        let mut controller = SessionController::new();
        controller.select_video(VideoAsset::from_bytes("a.mp4", vec![0]));
        controller.begin_submit().unwrap();
        let status = controller
            .complete_failure(&AnalysisError::Rejected("quota exhausted".to_string()));
        assert_eq!(
            status,
            StatusLine::AnalysisFailed("QUOTA EXHAUSTED".to_string())
        );
        assert_eq!(
            controller.phase(),
            &SessionPhase::Failed {
                reason: "QUOTA EXHAUSTED".to_string()
            }
        );
        assert!(controller.result().is_none());

        // Failed is resubmission-ready
        assert!(controller.begin_submit().is_ok());
    }

    #[test]
    fn replacing_video_releases_previous_preview_once() {
        let mut controller = SessionController::new();
        controller.select_video(VideoAsset::from_bytes("first.mp4", vec![0]));
        let first_watch = controller.video().unwrap().preview().watch();

        controller.select_video(VideoAsset::from_bytes("second.mp4", vec![1]));
        let second = controller.video().unwrap();

        assert!(first_watch.is_released());
        assert_eq!(first_watch.release_count(), 1);
        assert!(!second.preview().is_released());
        assert_eq!(second.file_name(), "second.mp4");
    }

    #[test]
    fn clear_video_releases_preview() {
        let mut controller = SessionController::new();
        controller.select_video(VideoAsset::from_bytes("a.mp4", vec![0]));
        let watch = controller.video().unwrap().preview().watch();

        controller.clear_video();
        assert!(controller.video().is_none());
        assert_eq!(watch.release_count(), 1);
    }
}
