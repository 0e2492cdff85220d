//! Error handling for the capability analyzer

use crate::input::text_extractor::ExtractionFailure;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CapabilityError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Document extraction error: {0}")]
    Extraction(#[from] ExtractionFailure),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("LLM service error: {0}")]
    LlmService(String),

    #[error("Malformed LLM response: {0}")]
    MalformedResponse(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, CapabilityError>;

