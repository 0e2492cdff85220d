//! Skill extraction, experience classification and capability scoring

pub mod analyzer;
pub mod experience;
pub mod scorer;
pub mod skills;
pub mod taxonomy;

pub use analyzer::{AnalysisOutcome, AnalysisRequest, AnalyzerSettings, CapabilityAnalyzer};
