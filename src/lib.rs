//! Capability analyzer library

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod llm;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{CapabilityError, Result};
pub use processing::{AnalysisOutcome, AnalysisRequest, AnalyzerSettings, CapabilityAnalyzer};
