//! Skill taxonomy: the fixed set of weighted skill categories

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Skill category identifier.
///
/// Variant order is taxonomy order, so maps keyed by `SkillCategory`
/// iterate in the same order the taxonomy lists its categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    CoreTechnical,
    Frameworks,
    CloudDevops,
    Databases,
    ToolsMethodologies,
    SoftSkills,
}

impl SkillCategory {
    pub const ALL: [SkillCategory; 6] = [
        SkillCategory::CoreTechnical,
        SkillCategory::Frameworks,
        SkillCategory::CloudDevops,
        SkillCategory::Databases,
        SkillCategory::ToolsMethodologies,
        SkillCategory::SoftSkills,
    ];

    /// Identifier used in configuration files and LLM payloads
    pub fn id(&self) -> &'static str {
        match self {
            SkillCategory::CoreTechnical => "core_technical",
            SkillCategory::Frameworks => "frameworks",
            SkillCategory::CloudDevops => "cloud_devops",
            SkillCategory::Databases => "databases",
            SkillCategory::ToolsMethodologies => "tools_methodologies",
            SkillCategory::SoftSkills => "soft_skills",
        }
    }

    /// Human readable name, e.g. "Cloud Devops"
    pub fn display_name(&self) -> String {
        self.id()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for SkillCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SkillCategory::ALL
            .iter()
            .copied()
            .find(|category| category.id() == s)
            .ok_or_else(|| format!("Unknown skill category: {}", s))
    }
}

/// One weighted category with its recognized keyword phrases
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryDefinition {
    pub category: SkillCategory,
    pub weight: f64,
    pub keywords: Vec<String>,
}

/// Immutable category → (weight, keywords) table shared by all matching logic
#[derive(Debug, Clone)]
pub struct SkillTaxonomy {
    categories: Vec<CategoryDefinition>,
}

impl SkillTaxonomy {
    /// The standard six-category taxonomy
    pub fn standard() -> Self {
        let table: [(SkillCategory, f64, &[&str]); 6] = [
            (
                SkillCategory::CoreTechnical,
                1.5,
                &["python", "java", "javascript", "sql", "machine learning", "data analysis", "c++", "r"],
            ),
            (
                SkillCategory::Frameworks,
                1.3,
                &[
                    "django", "flask", "react", "angular", "vue", "spring", "tensorflow", "pytorch",
                    "node.js", "express",
                ],
            ),
            (
                SkillCategory::CloudDevops,
                1.4,
                &["aws", "azure", "gcp", "docker", "kubernetes", "ci/cd", "jenkins", "terraform"],
            ),
            (
                SkillCategory::Databases,
                1.2,
                &["mysql", "postgresql", "mongodb", "redis", "oracle", "sqlite", "dynamodb"],
            ),
            (
                SkillCategory::ToolsMethodologies,
                1.1,
                &["git", "agile", "scrum", "jira", "linux", "rest api", "microservices", "devops"],
            ),
            (
                SkillCategory::SoftSkills,
                0.9,
                &[
                    "leadership", "communication", "teamwork", "problem solving",
                    "project management", "collaboration",
                ],
            ),
        ];

        let categories = table
            .iter()
            .map(|(category, weight, keywords)| CategoryDefinition {
                category: *category,
                weight: *weight,
                keywords: keywords.iter().map(|k| k.to_string()).collect(),
            })
            .collect();

        Self { categories }
    }

    /// Standard taxonomy with additional keywords appended per category
    pub fn with_extra_keywords(extra: &BTreeMap<SkillCategory, Vec<String>>) -> Self {
        let mut taxonomy = Self::standard();

        for definition in &mut taxonomy.categories {
            if let Some(additions) = extra.get(&definition.category) {
                for keyword in additions {
                    let keyword = keyword.trim().to_lowercase();
                    if !keyword.is_empty() && !definition.keywords.contains(&keyword) {
                        definition.keywords.push(keyword);
                    }
                }
            }
        }

        taxonomy
    }

    pub fn categories(&self) -> &[CategoryDefinition] {
        &self.categories
    }

    pub fn get(&self, category: SkillCategory) -> Option<&CategoryDefinition> {
        self.categories.iter().find(|d| d.category == category)
    }

    pub fn weight(&self, category: SkillCategory) -> f64 {
        self.get(category).map(|d| d.weight).unwrap_or(1.0)
    }

    /// Total number of keyword phrases across all categories
    pub fn keyword_count(&self) -> usize {
        self.categories.iter().map(|d| d.keywords.len()).sum()
    }
}

impl Default for SkillTaxonomy {
    fn default() -> Self {
        Self::standard()
    }
}
