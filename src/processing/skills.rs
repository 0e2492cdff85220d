//! Keyword-based skill extraction against the skill taxonomy

use crate::error::{CapabilityError, Result};
use crate::processing::taxonomy::{SkillCategory, SkillTaxonomy};
use aho_corasick::{AhoCorasick, MatchKind};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

/// Skills found for one category, with the category weight carried for scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySkills {
    pub skills: Vec<String>,
    pub weight: f64,
}

/// Category → matched keywords. Categories without a match are never present.
pub type ExtractedSkills = BTreeMap<SkillCategory, CategorySkills>;

/// Total number of keywords across all categories of a skill mapping
pub fn total_skill_count(skills: &BTreeMap<SkillCategory, Vec<String>>) -> usize {
    skills.values().map(Vec::len).sum()
}

/// Literal substring matcher over the taxonomy keywords.
///
/// Matching is plain case-insensitive containment with no word boundaries,
/// so "r" matches almost any text and "java" also matches "javascript".
pub struct SkillExtractor {
    taxonomy: Arc<SkillTaxonomy>,
    matcher: AhoCorasick,
    // pattern id → (category, keyword index within the category)
    patterns: Vec<(SkillCategory, usize)>,
}

impl SkillExtractor {
    pub fn new(taxonomy: Arc<SkillTaxonomy>) -> Result<Self> {
        let mut keywords = Vec::new();
        let mut patterns = Vec::new();

        for definition in taxonomy.categories() {
            for (index, keyword) in definition.keywords.iter().enumerate() {
                keywords.push(keyword.clone());
                patterns.push((definition.category, index));
            }
        }

        // Overlapping search needs standard semantics; every occurrence of every
        // keyword is reported, which matches per-keyword containment.
        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::Standard)
            .build(&keywords)
            .map_err(|e| CapabilityError::InvalidInput(format!("Failed to build skill matcher: {}", e)))?;

        Ok(Self {
            taxonomy,
            matcher,
            patterns,
        })
    }

    /// Extract the taxonomy keywords present in `text`, grouped by category.
    pub fn extract_skills(&self, text: &str) -> ExtractedSkills {
        let mut found = ExtractedSkills::new();
        if text.trim().is_empty() {
            return found;
        }

        let lowered = text.to_lowercase();
        let hits: HashSet<(SkillCategory, usize)> = self
            .matcher
            .find_overlapping_iter(&lowered)
            .map(|m| self.patterns[m.pattern().as_usize()])
            .collect();

        for definition in self.taxonomy.categories() {
            let skills: Vec<String> = definition
                .keywords
                .iter()
                .enumerate()
                .filter(|(index, _)| hits.contains(&(definition.category, *index)))
                .map(|(_, keyword)| keyword.clone())
                .collect();

            if !skills.is_empty() {
                found.insert(
                    definition.category,
                    CategorySkills {
                        skills,
                        weight: definition.weight,
                    },
                );
            }
        }

        found
    }

    pub fn taxonomy(&self) -> &SkillTaxonomy {
        &self.taxonomy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> SkillExtractor {
        SkillExtractor::new(Arc::new(SkillTaxonomy::standard())).unwrap()
    }

    #[test]
    fn test_empty_text_yields_empty_mapping() {
        let extractor = extractor();
        assert!(extractor.extract_skills("").is_empty());
        assert!(extractor.extract_skills("   \n\t").is_empty());
    }

    #[test]
    fn test_skills_grouped_in_taxonomy_order() {
        let extractor = extractor();
        let found = extractor.extract_skills("Worked with SQL and Python, deployed on Docker and AWS.");

        let core = &found[&SkillCategory::CoreTechnical];
        assert_eq!(core.weight, 1.5);
        // taxonomy order, not text order
        assert!(core.skills.iter().position(|s| s == "python") < core.skills.iter().position(|s| s == "sql"));

        let cloud = &found[&SkillCategory::CloudDevops];
        assert_eq!(cloud.skills, vec!["aws".to_string(), "docker".to_string()]);
    }

    #[test]
    fn test_no_category_maps_to_empty_list() {
        let extractor = extractor();
        let found = extractor.extract_skills("Led agile teams using Git and Jira");
        assert!(!found.is_empty());
        for category in found.values() {
            assert!(!category.skills.is_empty());
        }
        assert!(!found.contains_key(&SkillCategory::Databases));
    }

    #[test]
    fn test_substring_matching_has_no_word_boundaries() {
        let extractor = extractor();
        let found = extractor.extract_skills("JavaScript");
        let core = &found[&SkillCategory::CoreTechnical];
        assert!(core.skills.contains(&"java".to_string()));
        assert!(core.skills.contains(&"javascript".to_string()));
        assert!(core.skills.contains(&"r".to_string()));
    }

    #[test]
    fn test_multi_word_and_punctuated_keywords() {
        let extractor = extractor();
        let found = extractor.extract_skills("Built CI/CD pipelines, REST API design, Machine Learning in C++");
        assert!(found[&SkillCategory::CloudDevops].skills.contains(&"ci/cd".to_string()));
        assert!(found[&SkillCategory::ToolsMethodologies].skills.contains(&"rest api".to_string()));
        let core = &found[&SkillCategory::CoreTechnical].skills;
        assert!(core.contains(&"machine learning".to_string()));
        assert!(core.contains(&"c++".to_string()));
    }

    #[test]
    fn test_total_skill_count() {
        let mut skills = BTreeMap::new();
        skills.insert(SkillCategory::CoreTechnical, vec!["python".to_string(), "sql".to_string()]);
        skills.insert(SkillCategory::Databases, vec!["redis".to_string()]);
        assert_eq!(total_skill_count(&skills), 3);
    }
}
