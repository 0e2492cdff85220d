//! Report structure wrapping an analysis outcome with its provenance

use crate::processing::analyzer::AnalysisOutcome;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub metadata: ReportMetadata,
    #[serde(flatten)]
    pub outcome: AnalysisOutcome,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub version: String,
    pub resume_file: String,
    /// Job file path, or the sample posting's title
    pub job_source: String,
    pub job_title: String,
}

impl AnalysisReport {
    pub fn new(
        outcome: AnalysisOutcome,
        resume_file: impl Into<String>,
        job_source: impl Into<String>,
        job_title: impl Into<String>,
    ) -> Self {
        Self {
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                resume_file: resume_file.into(),
                job_source: job_source.into(),
                job_title: job_title.into(),
            },
            outcome,
        }
    }

    pub fn generated_at_display(&self) -> String {
        self.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
    }
}
