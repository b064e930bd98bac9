//! Report wrapper around a validated analysis

use crate::processing::result::AnalysisResult;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A validated analysis together with generation metadata, ready for export.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub metadata: ReportMetadata,
    pub analysis: AnalysisResult,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub model: String,
    pub elapsed_ms: u64,
    pub tool_version: String,
}

impl AnalysisReport {
    pub fn new(analysis: AnalysisResult, model: &str, elapsed_ms: u64) -> Self {
        Self {
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                model: model.to_string(),
                elapsed_ms,
                tool_version: env!("CARGO_PKG_VERSION").to_string(),
            },
            analysis,
        }
    }
}
