//! Export document serialization
//!
//! The current result set is offered to the operator as a downloadable JSON
//! document, produced client-side and never sent to the server. Without a
//! result there is no document at all (export is disabled, not empty).

use chrono::{DateTime, Utc};
use compass_common::api::AnalysisResult;
use compass_common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::session::SessionProvenance;

/// Exportable snapshot of one completed analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportDocument {
    pub exported_at: DateTime<Utc>,
    pub model: String,
    pub cached: bool,
    pub video_hash: String,
    pub analysis: AnalysisResult,
}

/// Build the export document, or `None` when no result is present.
///
/// Result and provenance are set together by the session controller, so
/// both must be present for a document to exist.
pub fn build_document(
    result: Option<&AnalysisResult>,
    provenance: Option<&SessionProvenance>,
    exported_at: DateTime<Utc>,
) -> Option<ExportDocument> {
    let result = result?;
    let provenance = provenance?;
    Some(ExportDocument {
        exported_at,
        model: provenance.model.clone(),
        cached: provenance.cached,
        video_hash: provenance.video_hash.clone(),
        analysis: result.clone(),
    })
}

/// File name for an export: `<prefix>-<timestamp millis>.json`.
pub fn export_file_name(prefix: &str, timestamp_millis: i64) -> String {
    format!("{}-{}.json", prefix, timestamp_millis)
}

/// Serialize the document as pretty JSON into the export directory.
pub fn write_document(document: &ExportDocument, dir: &Path, prefix: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let name = export_file_name(prefix, document.exported_at.timestamp_millis());
    let path = dir.join(name);
    let json = serde_json::to_string_pretty(document).map_err(Error::Json)?;
    std::fs::write(&path, json)?;
    info!(path = %path.display(), "Analysis exported");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use compass_common::api::RubricScore;

    fn sample_result() -> AnalysisResult {
        AnalysisResult {
            rubric: vec![RubricScore {
                label: "Communication".to_string(),
                score: 5,
                rationale: "Excellent.".to_string(),
            }],
            overall_summary: "Strong performance.".to_string(),
        }
    }

    fn sample_provenance() -> SessionProvenance {
        SessionProvenance {
            model: "gemini-2.5-flash".to_string(),
            cached: true,
            video_hash: "abcdef1234567890".to_string(),
        }
    }

    #[test]
    fn export_disabled_without_result() {
        let provenance = sample_provenance();
        assert!(build_document(None, Some(&provenance), Utc::now()).is_none());
        assert!(build_document(None, None, Utc::now()).is_none());
    }

    #[test]
    fn document_carries_provenance_and_analysis() {
        let result = sample_result();
        let provenance = sample_provenance();
        let doc = build_document(Some(&result), Some(&provenance), Utc::now()).unwrap();
        assert_eq!(doc.model, "gemini-2.5-flash");
        assert!(doc.cached);
        assert_eq!(doc.video_hash, "abcdef1234567890");
        assert_eq!(doc.analysis, result);
    }

    #[test]
    fn file_name_pattern() {
        assert_eq!(
            export_file_name("analysis", 1770000000123),
            "analysis-1770000000123.json"
        );
    }

    #[test]
    fn writes_pretty_json_to_export_dir() {
        let dir = tempfile::tempdir().unwrap();
        let result = sample_result();
        let provenance = sample_provenance();
        let doc = build_document(Some(&result), Some(&provenance), Utc::now()).unwrap();

        let path = write_document(&doc, dir.path(), "analysis").unwrap();
        assert!(path.file_name().unwrap().to_str().unwrap().starts_with("analysis-"));

        let content = std::fs::read_to_string(&path).unwrap();
        let reread: ExportDocument = serde_json::from_str(&content).unwrap();
        assert_eq!(reread.video_hash, doc.video_hash);
    }
}
