//! Operator-facing status line
//!
//! One short status string reflects the current phase of the session
//! (idle, submitting, success, cache-hit, error-with-reason). The status is
//! derived from component outcomes and never authoritative on its own: the
//! session controller's phase is the source of truth.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status line shown to the operator.
///
/// Rendered strings keep the `PREFIX: DETAIL` convention of the console
/// front-end (OFFLINE/SYSTEM/BUSY/ERROR prefixes).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusLine {
    /// No operation in progress, nothing to report
    Idle,
    /// Prompt configuration could not be loaded at session start
    PromptLoadFailed,
    /// Model list could not be loaded at session start
    ModelLoadFailed,
    /// Rubric committed and acknowledged by the config store
    RubricUpdated,
    /// Rubric commit rejected; local draft retained
    RubricSaveFailed,
    /// Model selection push rejected; optimistic selection retained
    ModelUpdateFailed,
    /// Submit attempted without a selected video
    MissingSource,
    /// Analyze call in flight
    Analyzing,
    /// Analysis completed with a freshly computed result
    AnalysisSuccess,
    /// Analysis served from the backend cache
    CacheHit,
    /// Analyze call failed; carries the upper-cased reason
    AnalysisFailed(String),
}

impl Default for StatusLine {
    fn default() -> Self {
        StatusLine::Idle
    }
}

impl StatusLine {
    /// True for the OFFLINE states that persist until the operator restarts
    /// the session (no automatic retry exists).
    pub fn is_offline(&self) -> bool {
        matches!(self, StatusLine::PromptLoadFailed | StatusLine::ModelLoadFailed)
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusLine::Idle => write!(f, "Awaiting vision input..."),
            StatusLine::PromptLoadFailed => write!(f, "OFFLINE: PROMPT_LOAD_FAIL"),
            StatusLine::ModelLoadFailed => write!(f, "OFFLINE: MODEL_LOAD_FAIL"),
            StatusLine::RubricUpdated => write!(f, "SYSTEM: RUBRIC_UPDATED"),
            StatusLine::RubricSaveFailed => write!(f, "ERROR: RUBRIC_SAVE_FAIL"),
            StatusLine::ModelUpdateFailed => write!(f, "ERROR: MODEL_UPDATE_FAIL"),
            StatusLine::MissingSource => write!(f, "ERROR: MISSING_SOURCE_FILE"),
            StatusLine::Analyzing => write!(f, "BUSY: NEURAL_SYNC"),
            StatusLine::AnalysisSuccess => write!(f, "SYSTEM: ANALYSIS_SUCCESS"),
            StatusLine::CacheHit => write!(f, "SYSTEM: CACHE_HIT"),
            StatusLine::AnalysisFailed(reason) => write!(f, "ERROR: {}", reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_exact_operator_strings() {
        assert_eq!(StatusLine::MissingSource.to_string(), "ERROR: MISSING_SOURCE_FILE");
        assert_eq!(StatusLine::Analyzing.to_string(), "BUSY: NEURAL_SYNC");
        assert_eq!(StatusLine::CacheHit.to_string(), "SYSTEM: CACHE_HIT");
        assert_eq!(StatusLine::AnalysisSuccess.to_string(), "SYSTEM: ANALYSIS_SUCCESS");
        assert_eq!(StatusLine::PromptLoadFailed.to_string(), "OFFLINE: PROMPT_LOAD_FAIL");
        assert_eq!(
            StatusLine::AnalysisFailed("GEMINI UPLOAD TIMED OUT".to_string()).to_string(),
            "ERROR: GEMINI UPLOAD TIMED OUT"
        );
    }

    #[test]
    fn offline_states_are_flagged() {
        assert!(StatusLine::PromptLoadFailed.is_offline());
        assert!(StatusLine::ModelLoadFailed.is_offline());
        assert!(!StatusLine::RubricSaveFailed.is_offline());
    }
}
