//! Generative counterparts of the deterministic analysis steps.
//!
//! Every call returns a `Result`; the engine decides how to fall back.
//! Structured answers are validated strictly and any deviation is a
//! [`CapabilityError::MalformedResponse`].

use crate::error::{CapabilityError, Result};
use crate::llm::client::LlmService;
use crate::llm::prompts::PromptTemplates;
use crate::processing::experience::ExperienceLevel;
use crate::processing::scorer::CapabilityAnalysis;
use crate::processing::skills::{CategorySkills, ExtractedSkills};
use crate::processing::taxonomy::{SkillCategory, SkillTaxonomy};
use std::sync::Arc;

pub struct LlmAnalyzer {
    service: Arc<dyn LlmService>,
    model: String,
    taxonomy: Arc<SkillTaxonomy>,
    prompt_templates: PromptTemplates,
}

impl LlmAnalyzer {
    pub fn new(service: Arc<dyn LlmService>, model: impl Into<String>, taxonomy: Arc<SkillTaxonomy>) -> Self {
        Self {
            service,
            model: model.into(),
            taxonomy,
            prompt_templates: PromptTemplates::default(),
        }
    }

    pub fn service_name(&self) -> &str {
        self.service.name()
    }

    pub async fn extract_skills(&self, text: &str) -> Result<ExtractedSkills> {
        let prompt = self.prompt_templates.render_skill_extraction(text);
        let raw = self.service.generate(&prompt, &self.model).await?;
        parse_skill_response(&raw, &self.taxonomy)
    }

    /// Unrecognised answers resolve to [`ExperienceLevel::Unknown`]
    pub async fn detect_experience(&self, text: &str) -> Result<ExperienceLevel> {
        let prompt = self.prompt_templates.render_experience_level(text);
        let raw = self.service.generate(&prompt, &self.model).await?;

        match ExperienceLevel::from_answer(&raw) {
            Some(level) => Ok(level),
            None => {
                log::debug!("Unrecognised experience answer: {:?}", raw.trim());
                Ok(ExperienceLevel::Unknown)
            }
        }
    }

    pub async fn generate_explanation(&self, analysis: &CapabilityAnalysis) -> Result<String> {
        let analysis_json = serde_json::to_string_pretty(analysis)?;
        let prompt = self.prompt_templates.render_explanation(&analysis_json);
        let raw = self.service.generate(&prompt, &self.model).await?;

        let explanation = raw.trim();
        if explanation.is_empty() {
            return Err(CapabilityError::MalformedResponse("empty explanation".to_string()));
        }
        Ok(explanation.to_string())
    }

    pub async fn generate_suggestions(&self, analysis: &CapabilityAnalysis, max: usize) -> Result<Vec<String>> {
        let analysis_json = serde_json::to_string_pretty(analysis)?;
        let prompt = self.prompt_templates.render_suggestions(&analysis_json, max);
        let raw = self.service.generate(&prompt, &self.model).await?;

        let suggestions = parse_suggestions(&raw, max);
        if suggestions.is_empty() {
            return Err(CapabilityError::MalformedResponse("no suggestions in response".to_string()));
        }
        Ok(suggestions)
    }
}

/// Remove a surrounding Markdown code fence, with or without a language tag
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Validate a category → skills JSON object against the taxonomy
pub fn parse_skill_response(raw: &str, taxonomy: &SkillTaxonomy) -> Result<ExtractedSkills> {
    let value: serde_json::Value = serde_json::from_str(strip_code_fence(raw))
        .map_err(|e| CapabilityError::MalformedResponse(format!("skill response is not JSON: {}", e)))?;

    let object = value
        .as_object()
        .ok_or_else(|| CapabilityError::MalformedResponse("skill response is not a JSON object".to_string()))?;

    let mut skills = ExtractedSkills::new();

    for (key, entry) in object {
        let category: SkillCategory = key
            .parse()
            .map_err(|e: String| CapabilityError::MalformedResponse(e))?;

        let items = entry.as_array().ok_or_else(|| {
            CapabilityError::MalformedResponse(format!("skills for '{}' are not an array", key))
        })?;

        let mut names: Vec<String> = Vec::new();
        for item in items {
            let name = item.as_str().ok_or_else(|| {
                CapabilityError::MalformedResponse(format!("non-string skill under '{}'", key))
            })?;
            let name = name.trim().to_lowercase();
            if !name.is_empty() && !names.contains(&name) {
                names.push(name);
            }
        }

        if !names.is_empty() {
            skills.insert(
                category,
                CategorySkills {
                    skills: names,
                    weight: taxonomy.weight(category),
                },
            );
        }
    }

    Ok(skills)
}

fn strip_list_marker(line: &str) -> Option<&str> {
    for bullet in ["- ", "* ", "• "] {
        if let Some(rest) = line.strip_prefix(bullet) {
            return Some(rest);
        }
    }

    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        let rest = &line[digits..];
        if let Some(rest) = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
            return Some(rest);
        }
    }
    None
}

/// Parse numbered or bulleted suggestions; unmarked lines continue the previous item
pub fn parse_suggestions(raw: &str, max: usize) -> Vec<String> {
    let mut suggestions: Vec<String> = Vec::new();
    let mut current: Option<String> = None;

    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(item) = strip_list_marker(line) {
            if let Some(done) = current.take() {
                suggestions.push(done);
            }
            current = Some(item.trim().to_string());
        } else if let Some(ref mut item) = current {
            if !item.is_empty() {
                item.push(' ');
            }
            item.push_str(line);
        } else {
            current = Some(line.to_string());
        }
    }

    if let Some(done) = current {
        suggestions.push(done);
    }

    suggestions.retain(|s| !s.is_empty());
    suggestions.truncate(max);
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct CannedLlm(String);

    #[async_trait]
    impl LlmService for CannedLlm {
        async fn generate(&self, _prompt: &str, _model: &str) -> Result<String> {
            Ok(self.0.clone())
        }

        fn name(&self) -> &str {
            "canned"
        }
    }

    fn analyzer(answer: &str) -> LlmAnalyzer {
        LlmAnalyzer::new(
            Arc::new(CannedLlm(answer.to_string())),
            "test-model",
            Arc::new(SkillTaxonomy::standard()),
        )
    }

    #[test]
    fn test_parse_skill_response_normalises() {
        let taxonomy = SkillTaxonomy::standard();
        let raw = "```json\n{\"core_technical\": [\" Python \", \"python\", \"SQL\"], \"databases\": []}\n```";
        let skills = parse_skill_response(raw, &taxonomy).unwrap();

        assert_eq!(skills.len(), 1);
        let core = &skills[&SkillCategory::CoreTechnical];
        assert_eq!(core.skills, vec!["python".to_string(), "sql".to_string()]);
        assert_eq!(core.weight, 1.5);
    }

    #[test]
    fn test_parse_skill_response_rejects_bad_shapes() {
        let taxonomy = SkillTaxonomy::standard();
        for raw in [
            "not json",
            "[\"python\"]",
            "{\"languages\": [\"python\"]}",
            "{\"core_technical\": \"python\"}",
            "{\"core_technical\": [1, 2]}",
        ] {
            assert!(
                matches!(parse_skill_response(raw, &taxonomy), Err(CapabilityError::MalformedResponse(_))),
                "accepted {}",
                raw
            );
        }
    }

    #[test]
    fn test_parse_suggestions() {
        let raw = "Here are some ideas:\n1. Learn docker\n   by containerising a project\n2) Practise SQL\n- Write about it\n\n";
        let parsed = parse_suggestions(raw, 6);
        assert_eq!(
            parsed,
            vec![
                "Here are some ideas:".to_string(),
                "Learn docker by containerising a project".to_string(),
                "Practise SQL".to_string(),
                "Write about it".to_string(),
            ]
        );
        assert_eq!(parse_suggestions(raw, 2).len(), 2);
        assert!(parse_suggestions("  \n", 6).is_empty());
    }

    #[tokio::test]
    async fn test_experience_answers() {
        assert_eq!(analyzer(" Senior.\n").detect_experience("x").await.unwrap(), ExperienceLevel::Senior);
        assert_eq!(analyzer("MID").detect_experience("x").await.unwrap(), ExperienceLevel::Mid);
        assert_eq!(
            analyzer("probably senior").detect_experience("x").await.unwrap(),
            ExperienceLevel::Unknown
        );
    }

    #[tokio::test]
    async fn test_blank_explanation_is_malformed() {
        let result = analyzer("   ").generate_explanation(&CapabilityAnalysis::empty()).await;
        assert!(matches!(result, Err(CapabilityError::MalformedResponse(_))));

        let text = analyzer(" A solid fit. ").generate_explanation(&CapabilityAnalysis::empty()).await;
        assert_eq!(text.unwrap(), "A solid fit.");
    }
}
