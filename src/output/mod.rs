//! Report generation: templated narrative text and output formats

pub mod formatter;
pub mod narrative;
pub mod report;
pub mod templates;
pub mod variation;

pub use formatter::{OutputFormatter, ReportGenerator};
pub use narrative::CapabilityAssessment;
pub use report::AnalysisReport;
