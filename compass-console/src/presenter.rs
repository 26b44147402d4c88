//! Result presentation derivations
//!
//! Pure functions over the current result, provenance, and selected file.
//! No clock access: the caller passes the date. Sentence-splitting for the
//! headline is naive character-class based, not locale-aware.

use chrono::NaiveDate;
use compass_common::api::AnalysisResult;

pub const HEADLINE_ANALYZING: &str = "Analyzing neural stream...";
pub const HEADLINE_AWAITING: &str = "Awaiting vision input for analysis.";
pub const HEADLINE_COMPLETE: &str = "Evaluation complete.";

pub const NO_SOURCE_SENTINEL: &str = "NO_SOURCE_LOADED";
pub const AUTO_MODEL_SENTINEL: &str = "AUTO";
pub const NULL_HASH_SENTINEL: &str = "NULL";

/// Longest first sentence shown untruncated
const HEADLINE_MAX_CHARS: usize = 100;
/// Characters kept when truncating
const HEADLINE_KEPT_CHARS: usize = 97;
/// Hash characters shown in the session line
const HASH_FRAGMENT_CHARS: usize = 8;

/// Human-facing headline for the current session state.
///
/// In-progress phrase while analyzing; otherwise the first sentence of the
/// summary (text up to the first `.`, `!`, or `?`) with a terminating
/// period, truncated to 97 characters plus an ellipsis when it exceeds 100;
/// otherwise the awaiting phrase. A present result with a blank summary
/// yields a fixed completion phrase.
pub fn headline(analyzing: bool, analysis: Option<&AnalysisResult>) -> String {
    if analyzing {
        return HEADLINE_ANALYZING.to_string();
    }
    let analysis = match analysis {
        Some(analysis) => analysis,
        None => return HEADLINE_AWAITING.to_string(),
    };
    let summary = analysis.overall_summary.trim();
    if summary.is_empty() {
        return HEADLINE_COMPLETE.to_string();
    }

    let first_sentence: String = summary
        .chars()
        .take_while(|c| !matches!(c, '.' | '!' | '?'))
        .collect();

    let mut text = if first_sentence.chars().count() > HEADLINE_MAX_CHARS {
        let kept: String = first_sentence.chars().take(HEADLINE_KEPT_CHARS).collect();
        format!("{}...", kept)
    } else {
        first_sentence
    };
    text.push('.');
    text
}

/// Session metadata line:
/// `SESSION // <date> // <file> // <model> // <hash fragment>`.
///
/// The model falls back from result provenance to the current selection to
/// the auto sentinel; the hash fragment is the first 8 characters,
/// upper-cased, or the null sentinel.
pub fn session_line(
    date: NaiveDate,
    file_name: Option<&str>,
    result_model: Option<&str>,
    current_model: &str,
    video_hash: Option<&str>,
) -> String {
    let file = file_name.unwrap_or(NO_SOURCE_SENTINEL);

    let model = result_model
        .filter(|m| !m.is_empty())
        .unwrap_or(if current_model.is_empty() {
            AUTO_MODEL_SENTINEL
        } else {
            current_model
        });

    let hash = video_hash
        .filter(|h| !h.is_empty())
        .map(|h| {
            h.chars()
                .take(HASH_FRAGMENT_CHARS)
                .collect::<String>()
                .to_uppercase()
        })
        .unwrap_or_else(|| NULL_HASH_SENTINEL.to_string());

    format!(
        "SESSION // {} // {} // {} // {}",
        date.format("%m/%d/%Y"),
        file,
        model,
        hash
    )
}
