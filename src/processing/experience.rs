//! Experience tier and job level classification

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse experience tier of a candidate (or of a role, inside an analysis)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Junior,
    Mid,
    Senior,
    Unknown,
}

impl ExperienceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Junior => "junior",
            ExperienceLevel::Mid => "mid",
            ExperienceLevel::Senior => "senior",
            ExperienceLevel::Unknown => "unknown",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ExperienceLevel::Junior => "Junior",
            ExperienceLevel::Mid => "Mid",
            ExperienceLevel::Senior => "Senior",
            ExperienceLevel::Unknown => "Unknown",
        }
    }

    /// Parse a one-word tier answer. Only junior, mid and senior are accepted.
    pub fn from_answer(answer: &str) -> Option<Self> {
        let word = answer
            .trim()
            .trim_end_matches(|c: char| c.is_ascii_punctuation())
            .trim_matches(|c: char| c == '"' || c == '\'' || c == '`')
            .to_lowercase();

        match word.as_str() {
            "junior" => Some(ExperienceLevel::Junior),
            "mid" => Some(ExperienceLevel::Mid),
            "senior" => Some(ExperienceLevel::Senior),
            _ => None,
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Seniority of a job posting. There is no unknown outcome; mid is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobLevel {
    Junior,
    Mid,
    Senior,
}

impl From<JobLevel> for ExperienceLevel {
    fn from(level: JobLevel) -> Self {
        match level {
            JobLevel::Junior => ExperienceLevel::Junior,
            JobLevel::Mid => ExperienceLevel::Mid,
            JobLevel::Senior => ExperienceLevel::Senior,
        }
    }
}

impl fmt::Display for JobLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ExperienceLevel::from(*self).fmt(f)
    }
}

const SENIOR_INDICATORS: &[&str] = &[
    "senior", "lead", "principal", "architect", "5+ years", "7+ years", "10+ years", "manager",
];
const MID_INDICATORS: &[&str] = &[
    "mid-level", "3+ years", "4+ years", "experienced", "professional", "specialist",
];
const JUNIOR_INDICATORS: &[&str] = &[
    "junior", "entry", "graduate", "0-2 years", "1+ years", "associate", "intern",
];

const SENIOR_TITLE_WORDS: &[&str] = &["senior", "lead", "principal", "architect", "staff", "manager"];
const JUNIOR_TITLE_WORDS: &[&str] = &["junior", "entry", "associate", "graduate", "intern"];

const YEARS_JUNIOR_MARKERS: &[&str] = &["0-1", "fresher", "junior", "entry"];

/// How experience tiers are detected from free text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceStrategy {
    /// Per-tier indicator phrases, checked senior → mid → junior
    #[default]
    Indicators,
    /// Explicit "N years" statements
    YearsPattern,
}

impl std::str::FromStr for ExperienceStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "indicators" => Ok(ExperienceStrategy::Indicators),
            "years_pattern" | "years-pattern" | "years" => Ok(ExperienceStrategy::YearsPattern),
            _ => Err(format!(
                "Invalid experience strategy: {}. Supported: indicators, years_pattern",
                s
            )),
        }
    }
}

pub struct ExperienceClassifier {
    strategy: ExperienceStrategy,
    senior_years: Regex,
    mid_years: Regex,
}

impl ExperienceClassifier {
    pub fn new(strategy: ExperienceStrategy) -> Self {
        let senior_years = Regex::new(r"\b(?:[5-9]|[1-9][0-9])\s*\+?\s*(?:years|yrs)")
            .expect("Invalid senior years regex");
        let mid_years = Regex::new(r"\b[2-4]\s*\+?\s*(?:years|yrs)")
            .expect("Invalid mid years regex");

        Self {
            strategy,
            senior_years,
            mid_years,
        }
    }

    pub fn strategy(&self) -> ExperienceStrategy {
        self.strategy
    }

    /// Detect the experience tier of `text` using the configured strategy
    pub fn detect_experience_level(&self, text: &str) -> ExperienceLevel {
        match self.strategy {
            ExperienceStrategy::Indicators => self.detect_by_indicators(text),
            ExperienceStrategy::YearsPattern => self.detect_by_years(text),
        }
    }

    /// First tier (senior, then mid, then junior) with any indicator present wins,
    /// so "lead ... intern" is senior.
    pub fn detect_by_indicators(&self, text: &str) -> ExperienceLevel {
        if text.trim().is_empty() {
            return ExperienceLevel::Unknown;
        }

        let lowered = text.to_lowercase();
        let tiers = [
            (ExperienceLevel::Senior, SENIOR_INDICATORS),
            (ExperienceLevel::Mid, MID_INDICATORS),
            (ExperienceLevel::Junior, JUNIOR_INDICATORS),
        ];

        tiers
            .iter()
            .find(|(_, indicators)| indicators.iter().any(|i| lowered.contains(i)))
            .map(|(level, _)| *level)
            .unwrap_or(ExperienceLevel::Unknown)
    }

    pub fn detect_by_years(&self, text: &str) -> ExperienceLevel {
        if text.trim().is_empty() {
            return ExperienceLevel::Unknown;
        }

        let lowered = text.to_lowercase();
        if self.senior_years.is_match(&lowered) {
            ExperienceLevel::Senior
        } else if self.mid_years.is_match(&lowered) {
            ExperienceLevel::Mid
        } else if YEARS_JUNIOR_MARKERS.iter().any(|m| lowered.contains(m)) {
            ExperienceLevel::Junior
        } else {
            ExperienceLevel::Unknown
        }
    }
}

impl Default for ExperienceClassifier {
    fn default() -> Self {
        Self::new(ExperienceStrategy::default())
    }
}

/// Derive the seniority of a role from its title alone
pub fn detect_job_level(title: &str) -> JobLevel {
    let lowered = title.to_lowercase();

    if SENIOR_TITLE_WORDS.iter().any(|w| lowered.contains(w)) {
        JobLevel::Senior
    } else if JUNIOR_TITLE_WORDS.iter().any(|w| lowered.contains(w)) {
        JobLevel::Junior
    } else {
        JobLevel::Mid
    }
}
