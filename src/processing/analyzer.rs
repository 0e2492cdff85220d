//! Analysis engine combining skill extraction, experience classification,
//! scoring and text generation, with optional LLM delegation.

use crate::llm::analyzer::LlmAnalyzer;
use crate::llm::client::LlmService;
use crate::output::narrative::{self, CapabilityAssessment, MAX_SUGGESTIONS};
use crate::processing::experience::{ExperienceClassifier, ExperienceStrategy};
use crate::processing::scorer::{build_analysis, CapabilityAnalysis};
use crate::processing::skills::{ExtractedSkills, SkillExtractor};
use crate::processing::taxonomy::SkillTaxonomy;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

/// Everything the engine needs besides the optional LLM handle
#[derive(Debug, Clone)]
pub struct AnalyzerSettings {
    pub taxonomy: Arc<SkillTaxonomy>,
    pub experience_strategy: ExperienceStrategy,
    pub model: String,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            taxonomy: Arc::new(SkillTaxonomy::standard()),
            experience_strategy: ExperienceStrategy::default(),
            model: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub resume_text: String,
    pub job_description: String,
    pub job_title: String,
    pub use_generative_mode: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    Deterministic,
    Generative,
}

/// The part of an analysis that fell back to deterministic behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    LlmUnavailable,
    ResumeSkills,
    JobSkills,
    Experience,
    Explanation,
    Suggestions,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Component::LlmUnavailable => "LLM service",
            Component::ResumeSkills => "resume skills",
            Component::JobSkills => "job skills",
            Component::Experience => "experience level",
            Component::Explanation => "explanation",
            Component::Suggestions => "suggestions",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Degradation {
    pub component: Component,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisOutcome {
    pub analysis: CapabilityAnalysis,
    pub assessment: CapabilityAssessment,
    pub explanation: String,
    pub suggestions: Vec<String>,
    pub mode: GenerationMode,
    pub degradations: Vec<Degradation>,
    pub processing_time_ms: u64,
}

impl AnalysisOutcome {
    pub fn is_degraded(&self) -> bool {
        !self.degradations.is_empty()
    }
}

/// Stateless capability analysis over shared, read-only settings
pub struct CapabilityAnalyzer {
    extractor: SkillExtractor,
    classifier: ExperienceClassifier,
    llm: Option<LlmAnalyzer>,
}

impl CapabilityAnalyzer {
    pub fn new(settings: AnalyzerSettings, service: Option<Arc<dyn LlmService>>) -> Result<Self> {
        let extractor = SkillExtractor::new(settings.taxonomy.clone())?;
        let classifier = ExperienceClassifier::new(settings.experience_strategy);
        let llm = service.map(|service| LlmAnalyzer::new(service, settings.model, settings.taxonomy));

        Ok(Self {
            extractor,
            classifier,
            llm,
        })
    }

    pub fn has_llm(&self) -> bool {
        self.llm.is_some()
    }

    pub fn extractor(&self) -> &SkillExtractor {
        &self.extractor
    }

    pub fn classifier(&self) -> &ExperienceClassifier {
        &self.classifier
    }

    /// Deterministic analysis: the canonical empty analysis when either text is blank
    pub fn analyze_capability(&self, resume_text: &str, job_description: &str, job_title: &str) -> CapabilityAnalysis {
        if resume_text.trim().is_empty() || job_description.trim().is_empty() {
            return CapabilityAnalysis::empty();
        }

        let resume_skills = self.extractor.extract_skills(resume_text);
        let job_skills = self.extractor.extract_skills(job_description);
        let experience = self.classifier.detect_experience_level(resume_text);

        build_analysis(resume_skills, job_skills, experience, job_title)
    }

    /// Run a full analysis, delegating to the LLM service when requested and available
    pub async fn analyze(&self, request: &AnalysisRequest) -> AnalysisOutcome {
        let start_time = Instant::now();
        let mut degradations = Vec::new();

        let llm = match (request.use_generative_mode, &self.llm) {
            (true, Some(llm)) => Some(llm),
            (true, None) => {
                degrade(
                    &mut degradations,
                    Component::LlmUnavailable,
                    "no LLM service is configured; using deterministic analysis".to_string(),
                );
                None
            }
            (false, _) => None,
        };

        let blank_input = request.resume_text.trim().is_empty() || request.job_description.trim().is_empty();

        let (analysis, mode) = match llm {
            Some(llm) if !blank_input => {
                let analysis = self.analyze_generative(llm, request, &mut degradations).await;
                (analysis, GenerationMode::Generative)
            }
            _ => (
                self.analyze_capability(&request.resume_text, &request.job_description, &request.job_title),
                GenerationMode::Deterministic,
            ),
        };

        let assessment = narrative::get_capability_assessment(&analysis);

        let (explanation, suggestions) = match llm {
            Some(llm) if !blank_input => {
                let explanation = match llm.generate_explanation(&analysis).await {
                    Ok(text) => text,
                    Err(e) => {
                        degrade(&mut degradations, Component::Explanation, e.to_string());
                        narrative::generate_explanation(&analysis)
                    }
                };
                let suggestions = match llm.generate_suggestions(&analysis, MAX_SUGGESTIONS).await {
                    Ok(list) => list,
                    Err(e) => {
                        degrade(&mut degradations, Component::Suggestions, e.to_string());
                        narrative::get_improvement_suggestions(&analysis)
                    }
                };
                (explanation, suggestions)
            }
            _ => (
                narrative::generate_explanation(&analysis),
                narrative::get_improvement_suggestions(&analysis),
            ),
        };

        AnalysisOutcome {
            analysis,
            assessment,
            explanation,
            suggestions,
            mode,
            degradations,
            processing_time_ms: start_time.elapsed().as_millis() as u64,
        }
    }

    async fn analyze_generative(
        &self,
        llm: &LlmAnalyzer,
        request: &AnalysisRequest,
        degradations: &mut Vec<Degradation>,
    ) -> CapabilityAnalysis {
        log::debug!("Delegating extraction to LLM service '{}'", llm.service_name());

        let resume_skills = self
            .skills_or_fallback(llm, &request.resume_text, Component::ResumeSkills, degradations)
            .await;
        let job_skills = self
            .skills_or_fallback(llm, &request.job_description, Component::JobSkills, degradations)
            .await;

        let experience = match llm.detect_experience(&request.resume_text).await {
            Ok(level) => level,
            Err(e) => {
                degrade(degradations, Component::Experience, e.to_string());
                self.classifier.detect_experience_level(&request.resume_text)
            }
        };

        build_analysis(resume_skills, job_skills, experience, &request.job_title)
    }

    async fn skills_or_fallback(
        &self,
        llm: &LlmAnalyzer,
        text: &str,
        component: Component,
        degradations: &mut Vec<Degradation>,
    ) -> ExtractedSkills {
        match llm.extract_skills(text).await {
            Ok(skills) => skills,
            Err(e) => {
                degrade(degradations, component, e.to_string());
                self.extractor.extract_skills(text)
            }
        }
    }
}

fn degrade(degradations: &mut Vec<Degradation>, component: Component, reason: String) {
    // a missing service was already announced when connecting
    if component == Component::LlmUnavailable {
        log::info!("Using deterministic analysis: {}", reason);
    } else {
        log::warn!("Falling back for {}: {}", component, reason);
    }
    degradations.push(Degradation { component, reason });
}
