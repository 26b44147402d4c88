//! Shared HTTP API functionality
//!
//! Contains the wire types exchanged with the analysis backend. The service
//! clients in compass-console wrap these with reqwest plumbing; this module
//! stays free of HTTP framework dependencies.

pub mod types;

pub use types::{
    AnalysisResult, AnalyzeResponse, ErrorDetail, HealthStatus, ModelList, PromptConfig,
    RubricScore, SetModelRequest,
};
