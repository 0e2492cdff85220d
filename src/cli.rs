//! CLI interface for the capability analyzer

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use unicode_segmentation::UnicodeSegmentation;

#[derive(Parser)]
#[command(name = "capability-analyzer")]
#[command(about = "Score how well a resume's skills and experience fit a job")]
#[command(long_about = "Extract skills and experience from a resume, score them against a job description, \
and explain the result with templated or LLM-generated text")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a resume against a job description
    Analyze {
        /// Path to resume file (PDF, DOCX, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (PDF, DOCX, TXT, MD)
        #[arg(short, long, conflicts_with = "sample", required_unless_present = "sample")]
        job: Option<PathBuf>,

        /// Use a built-in sample job by title instead of a job file
        #[arg(long)]
        sample: Option<String>,

        /// Job title used to determine the role's seniority
        #[arg(short, long)]
        title: Option<String>,

        /// Use the configured LLM service for extraction and text generation
        #[arg(short, long)]
        generative: bool,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        format: Option<String>,

        /// Show per-category skill details
        #[arg(short, long)]
        detailed: bool,

        /// Save output to file, or into a directory under a generated name
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Show what the deterministic extractors find in a document or title
    Inspect {
        /// Document to inspect
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Job title to classify
        #[arg(short, long)]
        title: Option<String>,
    },

    /// List built-in sample jobs
    Samples {
        /// Print the full description of each sample
        #[arg(short, long)]
        full: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file path
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

pub const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "docx", "txt", "md", "markdown"];

/// Truncate to at most `max_graphemes` user-perceived characters, preferring a word boundary
pub fn truncate_text(text: &str, max_graphemes: usize) -> String {
    let graphemes: Vec<&str> = text.graphemes(true).collect();
    if graphemes.len() <= max_graphemes {
        return text.to_string();
    }

    let truncated = graphemes[..max_graphemes].concat();
    let cut = truncated.rfind(' ').unwrap_or(truncated.len());
    format!("{}...", &truncated[..cut])
}
