//! Deterministic natural-language content generated from a capability analysis.
//!
//! Every phrase is chosen from a fixed pool with [`variation::select`], keyed on
//! values of the analysis, so identical analyses always read identically.

use crate::output::templates::{self, render, ScoreBucket, SuggestionTier};
use crate::output::variation::{self, format_score};
use crate::processing::scorer::CapabilityAnalysis;
use serde::{Deserialize, Serialize};

/// Presentation-ready summary derived from a [`CapabilityAnalysis`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityAssessment {
    pub level: String,
    pub description: String,
    pub color: String,
    pub icon: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendation: String,
}

pub const MAX_SUGGESTIONS: usize = 6;

/// One-paragraph explanation of the overall score
pub fn generate_explanation(analysis: &CapabilityAnalysis) -> String {
    let score = format_score(analysis.overall_capability);
    let skill_match = format_score(analysis.skill_match);
    let experience = format_score(analysis.experience_compatibility);
    let matching = analysis.matching_count().to_string();
    let missing = analysis.missing_count().to_string();

    let pool = templates::explanations(ScoreBucket::from_score(analysis.overall_capability));
    let template = variation::select(pool, &format!("{}{}", score, skill_match));

    render(
        template,
        &[
            ("score", score.as_str()),
            ("skill_match", skill_match.as_str()),
            ("experience", experience.as_str()),
            ("matching", matching.as_str()),
            ("missing", missing.as_str()),
        ],
    )
}

pub fn get_capability_assessment(analysis: &CapabilityAnalysis) -> CapabilityAssessment {
    let key = format!(
        "{}{}",
        format_score(analysis.overall_capability),
        format_score(analysis.experience_compatibility)
    );
    let pool = templates::assessments(ScoreBucket::from_score(analysis.overall_capability));
    let (level, description, color, icon) = *variation::select(pool, &key);

    CapabilityAssessment {
        level: level.to_string(),
        description: description.to_string(),
        color: color.to_string(),
        icon: icon.to_string(),
        strengths: strengths(analysis),
        weaknesses: weaknesses(analysis),
        recommendation: get_personalized_recommendation(analysis),
    }
}

pub fn get_personalized_recommendation(analysis: &CapabilityAnalysis) -> String {
    let key = format!(
        "rec{}{}",
        format_score(analysis.overall_capability),
        format_score(analysis.skill_match)
    );
    let pool = templates::recommendations(ScoreBucket::from_score(analysis.overall_capability));
    variation::select(pool, &key).to_string()
}

fn strengths(analysis: &CapabilityAnalysis) -> Vec<String> {
    let mut found = Vec::new();

    if analysis.skill_match >= 80.0 {
        let key = format!("skill{}", format_score(analysis.skill_match));
        found.push(variation::select(templates::HIGH_SKILL_STRENGTHS, &key).to_string());
    }
    if analysis.experience_compatibility >= 80.0 {
        let key = format!("exp{}", format_score(analysis.experience_compatibility));
        found.push(variation::select(templates::HIGH_EXPERIENCE_STRENGTHS, &key).to_string());
    }
    if analysis.matching_skills.len() >= 4 {
        let key = format!("broad{}", analysis.matching_skills.len());
        found.push(variation::select(templates::BROAD_SKILL_STRENGTHS, &key).to_string());
    }
    if analysis.resume_experience_level == analysis.job_level {
        found.push(variation::select(templates::LEVEL_MATCH_STRENGTHS, "levelmatch").to_string());
    }

    if found.is_empty() {
        found.push(templates::STRENGTHS_FALLBACK.to_string());
    }
    found
}

fn weaknesses(analysis: &CapabilityAnalysis) -> Vec<String> {
    let mut found = Vec::new();

    if analysis.skill_match < 60.0 {
        let key = format!("skillgap{}", format_score(analysis.skill_match));
        found.push(variation::select(templates::SKILL_GAP_WEAKNESSES, &key).to_string());
    }
    if analysis.experience_compatibility < 60.0 {
        let key = format!("expgap{}", format_score(analysis.experience_compatibility));
        found.push(variation::select(templates::EXPERIENCE_GAP_WEAKNESSES, &key).to_string());
    }
    if analysis.missing_count() > 6 {
        found.push(variation::select(templates::MULTIPLE_GAP_WEAKNESSES, "multigap").to_string());
    }

    if found.is_empty() {
        found.push(templates::WEAKNESSES_FALLBACK.to_string());
    }
    found
}

/// Ordered, at most six, actionable suggestions
pub fn get_improvement_suggestions(analysis: &CapabilityAnalysis) -> Vec<String> {
    let mut suggestions = Vec::new();
    let capability = format_score(analysis.overall_capability);

    let tier_pool = templates::capability_suggestions(SuggestionTier::from_score(analysis.overall_capability));
    let (first, second) =
        variation::select_pair(tier_pool, &format!("cap{}", capability), &format!("cap2{}", capability));
    suggestions.push(first.to_string());
    suggestions.push(second.to_string());

    for category in templates::PRIORITY_CATEGORIES {
        let Some(missing) = analysis.missing_skills.get(&category) else {
            continue;
        };
        let pool = templates::category_suggestions(category);
        if missing.is_empty() || pool.is_empty() {
            continue;
        }

        let top: Vec<&str> = missing.iter().take(2).map(String::as_str).collect();
        let template = variation::select(pool, &format!("skill{}", category.id()));
        suggestions.push(render(template, &[("skills", top.join(", ").as_str())]));
    }

    if analysis.experience_compatibility < 70.0 {
        let template = variation::select(templates::EXPERIENCE_SUGGESTIONS, "exp");
        suggestions.push(render(
            template,
            &[
                ("from", analysis.resume_experience_level.title()),
                ("to", analysis.job_level.title()),
            ],
        ));
    }

    let (first, second) = variation::select_pair(templates::LEARNING_SUGGESTIONS, "learn1", "learn2");
    suggestions.push(first.to_string());
    suggestions.push(second.to_string());

    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}
