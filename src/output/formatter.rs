//! Output formatters for console, JSON and Markdown reports

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::AnalysisReport;
use crate::processing::analyzer::GenerationMode;
use crate::processing::taxonomy::SkillCategory;
use colored::{Color, Colorize};
use std::collections::BTreeMap;
use std::path::Path;

/// Trait for formatting analysis reports
pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors and optional per-category detail
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

fn assessment_color(name: &str) -> Color {
    match name {
        "green" => Color::Green,
        "blue" => Color::Blue,
        "orange" => Color::Yellow,
        "red" => Color::Red,
        _ => Color::White,
    }
}

fn join_skills(skills: &[String]) -> String {
    skills.join(", ")
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_line(&self, label: &str, score: f64) -> String {
        let color = match score {
            s if s >= 85.0 => Color::Green,
            s if s >= 70.0 => Color::BrightGreen,
            s if s >= 50.0 => Color::Yellow,
            _ => Color::Red,
        };
        format!("{:<26} {}\n", label, self.colorize(&format!("{:.1}%", score), color))
    }

    fn format_category_map(&self, skills: &BTreeMap<SkillCategory, Vec<String>>, color: Color) -> String {
        let mut output = String::new();
        for (category, list) in skills {
            output.push_str(&format!(
                "  {:<22} {}\n",
                category.display_name(),
                self.colorize(&join_skills(list), color)
            ));
        }
        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let outcome = &report.outcome;
        let analysis = &outcome.analysis;
        let assessment = &outcome.assessment;
        let mut output = String::new();

        output.push_str(&self.format_header("📊 CAPABILITY ANALYSIS", 1));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            report.generated_at_display(),
            outcome.processing_time_ms
        ));
        output.push_str(&format!(
            "Resume: {} | Job: {} ({})\n",
            report.metadata.resume_file, report.metadata.job_title, report.metadata.job_source
        ));

        output.push_str(&self.format_header("Overall Assessment", 2));
        let level = format!("{} {}", assessment.icon, assessment.level);
        let level = if self.use_colors {
            level.color(assessment_color(&assessment.color)).bold().to_string()
        } else {
            level
        };
        output.push_str(&format!("{}\n{}\n\n", level, assessment.description));
        output.push_str(&self.format_score_line("🎯 Overall capability:", analysis.overall_capability));
        output.push_str(&self.format_score_line("🔧 Skill match:", analysis.skill_match));
        output.push_str(&self.format_score_line(
            "📈 Experience compatibility:",
            analysis.experience_compatibility,
        ));
        output.push_str(&format!(
            "Experience: {} candidate for a {} role\n",
            analysis.resume_experience_level.title(),
            analysis.job_level.title()
        ));

        output.push_str(&self.format_header("💬 Explanation", 2));
        output.push_str(&format!("{}\n", outcome.explanation));

        output.push_str(&self.format_header("✅ Strengths", 3));
        for strength in &assessment.strengths {
            output.push_str(&format!("  • {}\n", self.colorize(strength, Color::Green)));
        }

        output.push_str(&self.format_header("⚠️  Areas to Watch", 3));
        for weakness in &assessment.weaknesses {
            output.push_str(&format!("  • {}\n", self.colorize(weakness, Color::Yellow)));
        }

        output.push_str(&format!(
            "\n{} {}\n",
            self.colorize("Recommendation:", Color::Cyan),
            assessment.recommendation
        ));

        output.push_str(&self.format_header("🚀 Improvement Suggestions", 2));
        for (i, suggestion) in outcome.suggestions.iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", i + 1, suggestion));
        }

        if self.detailed {
            output.push_str(&self.format_header("🔍 Skill Details", 2));
            if !analysis.matching_skills.is_empty() {
                output.push_str("Matching skills:\n");
                output.push_str(&self.format_category_map(&analysis.matching_skills, Color::Green));
            }
            if !analysis.missing_skills.is_empty() {
                output.push_str("Missing skills:\n");
                output.push_str(&self.format_category_map(&analysis.missing_skills, Color::Red));
            }
            output.push_str("Resume skills:\n");
            for (category, found) in &analysis.resume_skills {
                output.push_str(&format!(
                    "  {:<22} {} (weight {})\n",
                    category.display_name(),
                    join_skills(&found.skills),
                    found.weight
                ));
            }
            output.push_str(&format!(
                "Weighted skill points: {:.1} of {:.1}\n",
                analysis.skill_breakdown.actual_achieved, analysis.skill_breakdown.total_possible
            ));
        }

        let mode = match outcome.mode {
            GenerationMode::Deterministic => "deterministic",
            GenerationMode::Generative => "generative",
        };
        output.push_str(&format!("\nMode: {}\n", mode));
        for degradation in &outcome.degradations {
            output.push_str(&self.colorize(
                &format!("  ↩ {} fell back to deterministic output: {}\n", degradation.component, degradation.reason),
                Color::BrightBlack,
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn category_table(output: &mut String, skills: &BTreeMap<SkillCategory, Vec<String>>) {
        output.push_str("| Category | Skills |\n");
        output.push_str("|----------|--------|\n");
        for (category, list) in skills {
            output.push_str(&format!("| {} | {} |\n", category.display_name(), join_skills(list)));
        }
        output.push('\n');
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let outcome = &report.outcome;
        let analysis = &outcome.analysis;
        let assessment = &outcome.assessment;
        let mut output = String::new();

        output.push_str("# 📊 Capability Analysis Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Processing Time:** {}ms\n",
                report.generated_at_display(),
                outcome.processing_time_ms
            ));
            output.push_str(&format!(
                "**Resume:** `{}` | **Job:** {} (`{}`)\n\n",
                report.metadata.resume_file, report.metadata.job_title, report.metadata.job_source
            ));
        }

        output.push_str(&format!("## {} {}\n\n", assessment.icon, assessment.level));
        output.push_str(&format!("{}\n\n", assessment.description));

        output.push_str("| Measure | Score |\n");
        output.push_str("|---------|-------|\n");
        output.push_str(&format!("| Overall capability | {:.1}% |\n", analysis.overall_capability));
        output.push_str(&format!("| Skill match | {:.1}% |\n", analysis.skill_match));
        output.push_str(&format!(
            "| Experience compatibility | {:.1}% |\n",
            analysis.experience_compatibility
        ));
        output.push_str(&format!(
            "| Experience | {} candidate / {} role |\n\n",
            analysis.resume_experience_level.title(),
            analysis.job_level.title()
        ));

        output.push_str("## Explanation\n\n");
        output.push_str(&format!("{}\n\n", outcome.explanation));

        output.push_str("### ✅ Strengths\n\n");
        for strength in &assessment.strengths {
            output.push_str(&format!("- {}\n", strength));
        }
        output.push_str("\n### ⚠️ Areas to Watch\n\n");
        for weakness in &assessment.weaknesses {
            output.push_str(&format!("- {}\n", weakness));
        }
        output.push_str(&format!("\n**Recommendation:** {}\n\n", assessment.recommendation));

        output.push_str("## 🚀 Improvement Suggestions\n\n");
        for (i, suggestion) in outcome.suggestions.iter().enumerate() {
            output.push_str(&format!("{}. {}\n", i + 1, suggestion));
        }
        output.push('\n');

        if !analysis.matching_skills.is_empty() {
            output.push_str("## Matching Skills\n\n");
            Self::category_table(&mut output, &analysis.matching_skills);
        }
        if !analysis.missing_skills.is_empty() {
            output.push_str("## Missing Skills\n\n");
            Self::category_table(&mut output, &analysis.missing_skills);
        }

        if !outcome.degradations.is_empty() {
            output.push_str("---\n\n");
            for degradation in &outcome.degradations {
                output.push_str(&format!(
                    "> ↩ {} fell back to deterministic output: {}\n",
                    degradation.component, degradation.reason
                ));
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
        }
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
        }
    }

    pub fn generate_report(&self, report: &AnalysisReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
    };
    format!("{}_capability{}.{}", base_name, timestamp_suffix, extension)
}
