//! Weighted capability scoring of extracted resume skills against a job

use crate::processing::experience::{detect_job_level, ExperienceLevel, JobLevel};
use crate::processing::skills::{total_skill_count, ExtractedSkills};
use crate::processing::taxonomy::SkillCategory;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Share of the overall capability coming from skill match
pub const SKILL_WEIGHT: f64 = 0.7;
/// Share of the overall capability coming from experience compatibility
pub const EXPERIENCE_WEIGHT: f64 = 0.3;

/// Raw weighted totals behind the skill match percentage
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillBreakdown {
    pub total_possible: f64,
    pub actual_achieved: f64,
}

/// Scores produced by [`calculate_capability_score`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapabilityScores {
    pub overall_capability: f64,
    pub skill_match: f64,
    pub experience_compatibility: f64,
    pub job_level: JobLevel,
    pub skill_breakdown: SkillBreakdown,
}

/// Result of one resume/job comparison. Built once and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapabilityAnalysis {
    pub overall_capability: f64,
    pub skill_match: f64,
    pub experience_compatibility: f64,
    pub resume_experience_level: ExperienceLevel,
    /// Tier of the role; only `Unknown` in the empty analysis
    pub job_level: ExperienceLevel,
    pub matching_skills: BTreeMap<SkillCategory, Vec<String>>,
    pub missing_skills: BTreeMap<SkillCategory, Vec<String>>,
    pub resume_skills: ExtractedSkills,
    pub job_skills: ExtractedSkills,
    pub skill_breakdown: SkillBreakdown,
}

impl CapabilityAnalysis {
    /// Canonical result for a request missing resume text or job description
    pub fn empty() -> Self {
        Self {
            overall_capability: 0.0,
            skill_match: 0.0,
            experience_compatibility: 0.0,
            resume_experience_level: ExperienceLevel::Unknown,
            job_level: ExperienceLevel::Unknown,
            matching_skills: BTreeMap::new(),
            missing_skills: BTreeMap::new(),
            resume_skills: ExtractedSkills::new(),
            job_skills: ExtractedSkills::new(),
            skill_breakdown: SkillBreakdown::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::empty()
    }

    pub fn matching_count(&self) -> usize {
        total_skill_count(&self.matching_skills)
    }

    pub fn missing_count(&self) -> usize {
        total_skill_count(&self.missing_skills)
    }
}

/// Round to one decimal place
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Fixed compatibility matrix: rows are job levels, columns candidate levels.
/// Mismatch is penalized in both directions, asymmetrically.
pub fn experience_compatibility(job_level: ExperienceLevel, candidate: ExperienceLevel) -> f64 {
    use ExperienceLevel::*;

    match (job_level, candidate) {
        (Senior, Senior) => 100.0,
        (Senior, Mid) => 70.0,
        (Senior, Junior) => 40.0,
        (Senior, Unknown) => 50.0,
        (Mid, Senior) => 60.0,
        (Mid, Mid) => 100.0,
        (Mid, Junior) => 80.0,
        (Mid, Unknown) => 70.0,
        (Junior, Senior) => 30.0,
        (Junior, Mid) => 60.0,
        (Junior, Junior) => 100.0,
        (Junior, Unknown) => 80.0,
        (Unknown, Senior) => 40.0,
        (Unknown, Mid) => 60.0,
        (Unknown, Junior) => 80.0,
        (Unknown, Unknown) => 50.0,
    }
}

/// Weighted skill match plus experience compatibility.
///
/// Every job keyword contributes its category weight to the possible total;
/// each one also present in the resume's list for the same category
/// contributes the weight once to the achieved total.
pub fn calculate_capability_score(
    resume_skills: &ExtractedSkills,
    job_skills: &ExtractedSkills,
    resume_experience: ExperienceLevel,
    job_title: &str,
) -> CapabilityScores {
    let mut breakdown = SkillBreakdown::default();

    for (category, job_category) in job_skills {
        let weight = job_category.weight;
        breakdown.total_possible += job_category.skills.len() as f64 * weight;

        let resume_list = resume_skills.get(category).map(|c| c.skills.as_slice()).unwrap_or(&[]);
        for skill in &job_category.skills {
            if resume_list.contains(skill) {
                breakdown.actual_achieved += weight;
            }
        }
    }

    let skill_match = if breakdown.total_possible > 0.0 {
        round1(breakdown.actual_achieved / breakdown.total_possible * 100.0)
    } else {
        0.0
    };

    let job_level = detect_job_level(job_title);
    let experience = experience_compatibility(job_level.into(), resume_experience);
    let overall = round1(skill_match * SKILL_WEIGHT + experience * EXPERIENCE_WEIGHT);

    CapabilityScores {
        overall_capability: overall,
        skill_match,
        experience_compatibility: experience,
        job_level,
        skill_breakdown: breakdown,
    }
}

/// Split each job category's keywords into those the resume has and those it lacks.
/// Categories with an empty side are left out of that side's map.
pub fn partition_skills(
    resume_skills: &ExtractedSkills,
    job_skills: &ExtractedSkills,
) -> (BTreeMap<SkillCategory, Vec<String>>, BTreeMap<SkillCategory, Vec<String>>) {
    let mut matching = BTreeMap::new();
    let mut missing = BTreeMap::new();

    for (category, job_category) in job_skills {
        let resume_list = resume_skills.get(category).map(|c| c.skills.as_slice()).unwrap_or(&[]);
        let (have, lack): (Vec<String>, Vec<String>) = job_category
            .skills
            .iter()
            .cloned()
            .partition(|skill| resume_list.contains(skill));

        if !have.is_empty() {
            matching.insert(*category, have);
        }
        if !lack.is_empty() {
            missing.insert(*category, lack);
        }
    }

    (matching, missing)
}

/// Assemble the full analysis from already extracted inputs
pub fn build_analysis(
    resume_skills: ExtractedSkills,
    job_skills: ExtractedSkills,
    resume_experience: ExperienceLevel,
    job_title: &str,
) -> CapabilityAnalysis {
    let scores = calculate_capability_score(&resume_skills, &job_skills, resume_experience, job_title);
    let (matching_skills, missing_skills) = partition_skills(&resume_skills, &job_skills);

    CapabilityAnalysis {
        overall_capability: scores.overall_capability,
        skill_match: scores.skill_match,
        experience_compatibility: scores.experience_compatibility,
        resume_experience_level: resume_experience,
        job_level: scores.job_level.into(),
        matching_skills,
        missing_skills,
        resume_skills,
        job_skills,
        skill_breakdown: scores.skill_breakdown,
    }
}
