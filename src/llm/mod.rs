//! LLM integration module

pub mod analyzer;
pub mod client;
pub mod prompts;

pub use analyzer::LlmAnalyzer;
pub use client::{connect, LlmService};
