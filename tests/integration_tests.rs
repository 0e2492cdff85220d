//! Integration tests for the capability analyzer

use async_trait::async_trait;
use capability_analyzer::error::{CapabilityError, Result};
use capability_analyzer::input::manager::InputManager;
use capability_analyzer::input::ExtractionFailure;
use capability_analyzer::llm::LlmService;
use capability_analyzer::output::narrative;
use capability_analyzer::processing::analyzer::{Component, GenerationMode};
use capability_analyzer::processing::experience::{ExperienceClassifier, ExperienceLevel, ExperienceStrategy};
use capability_analyzer::processing::scorer::{calculate_capability_score, CapabilityAnalysis};
use capability_analyzer::processing::skills::{CategorySkills, ExtractedSkills};
use capability_analyzer::processing::taxonomy::SkillCategory;
use capability_analyzer::{AnalysisRequest, AnalyzerSettings, CapabilityAnalyzer};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Answers each prompt kind with a fixed, well-formed response
struct ScriptedLlm {
    calls: AtomicUsize,
}

#[async_trait]
impl LlmService for ScriptedLlm {
    async fn generate(&self, prompt: &str, _model: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let answer = if prompt.contains("Extract the professional skills") {
            "```json\n{\"core_technical\": [\"Python\", \"Rust\"], \"cloud_devops\": [\"docker\"]}\n```"
        } else if prompt.contains("Classify the seniority") {
            "Senior"
        } else if prompt.contains("explaining the overall capability score") {
            "You are a strong fit for this role."
        } else {
            "1. Deepen your Rust experience\n2. Publish a Docker image\n3. Mentor a junior colleague"
        };
        Ok(answer.to_string())
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Fails every request, as an unreachable provider would
struct FailingLlm {
    calls: AtomicUsize,
}

#[async_trait]
impl LlmService for FailingLlm {
    async fn generate(&self, _prompt: &str, _model: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(CapabilityError::LlmService("connection refused".to_string()))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Replies with prose where structured output is expected
struct ChattyLlm;

#[async_trait]
impl LlmService for ChattyLlm {
    async fn generate(&self, _prompt: &str, _model: &str) -> Result<String> {
        Ok("Sure! Here is what I found: python, docker.".to_string())
    }

    fn name(&self) -> &str {
        "chatty"
    }
}

/// Answers everything except the seniority question, which errors
struct NoSeniorityLlm;

#[async_trait]
impl LlmService for NoSeniorityLlm {
    async fn generate(&self, prompt: &str, _model: &str) -> Result<String> {
        if prompt.contains("Classify the seniority") {
            return Err(CapabilityError::LlmService("request timed out".to_string()));
        }
        let answer = if prompt.contains("Extract the professional skills") {
            r#"{"core_technical": ["python"]}"#
        } else if prompt.contains("explaining the overall capability score") {
            "A close match."
        } else {
            "1. Keep shipping Python services"
        };
        Ok(answer.to_string())
    }

    fn name(&self) -> &str {
        "no-seniority"
    }
}

fn deterministic_analyzer() -> CapabilityAnalyzer {
    CapabilityAnalyzer::new(AnalyzerSettings::default(), None).unwrap()
}

fn analyzer_with(service: Arc<dyn LlmService>) -> CapabilityAnalyzer {
    CapabilityAnalyzer::new(AnalyzerSettings::default(), Some(service)).unwrap()
}

fn request(resume: &str, job: &str, title: &str, generative: bool) -> AnalysisRequest {
    AnalysisRequest {
        resume_text: resume.to_string(),
        job_description: job.to_string(),
        job_title: title.to_string(),
        use_generative_mode: generative,
    }
}

fn skills(entries: &[(SkillCategory, f64, &[&str])]) -> ExtractedSkills {
    entries
        .iter()
        .map(|(category, weight, list)| {
            (
                *category,
                CategorySkills {
                    skills: list.iter().map(|s| s.to_string()).collect(),
                    weight: *weight,
                },
            )
        })
        .collect()
}

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();
    let text = manager
        .extract_text(Path::new("tests/fixtures/sample_resume.txt"))
        .await
        .unwrap();

    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();
    let text = manager
        .extract_text(Path::new("tests/fixtures/sample_resume.md"))
        .await
        .unwrap();

    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));

    let level = ExperienceClassifier::default().detect_experience_level(&text);
    assert_eq!(level, ExperienceLevel::Junior);
}

#[tokio::test]
async fn test_text_extraction_from_pdf() {
    let mut manager = InputManager::new();
    let text = manager
        .extract_text(Path::new("tests/fixtures/sample_resume.pdf"))
        .await
        .unwrap();

    let level = ExperienceClassifier::default().detect_experience_level(&text);
    assert_eq!(level, ExperienceLevel::Senior);
    let skills = deterministic_analyzer().extractor().extract_skills(&text);
    assert!(skills[&SkillCategory::CoreTechnical].skills.contains(&"python".to_string()));
    assert!(skills[&SkillCategory::CloudDevops].skills.contains(&"aws".to_string()));
}

#[tokio::test]
async fn test_scanned_pdf_reports_extraction_failure() {
    let mut manager = InputManager::new();
    let result = manager.extract_text(Path::new("tests/fixtures/scanned.pdf")).await;
    match result {
        Err(CapabilityError::Extraction(failure)) => {
            assert_eq!(failure, ExtractionFailure::ImageBasedPdf);
            assert!(!failure.hint().is_empty());
        }
        other => panic!("expected an extraction failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new();
    let result = manager
        .extract_text(Path::new("tests/fixtures/unsupported.xyz"))
        .await;
    assert!(matches!(result, Err(CapabilityError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_fixture_resume_against_fixture_job() {
    let mut manager = InputManager::new();
    let resume = manager
        .extract_text(Path::new("tests/fixtures/sample_resume.txt"))
        .await
        .unwrap();
    let job = manager
        .extract_text(Path::new("tests/fixtures/job_description.txt"))
        .await
        .unwrap();

    let outcome = deterministic_analyzer()
        .analyze(&request(&resume, &job, "Senior Backend Engineer", false))
        .await;
    let analysis = &outcome.analysis;

    assert_eq!(analysis.resume_experience_level, ExperienceLevel::Senior);
    assert_eq!(analysis.job_level, ExperienceLevel::Senior);
    assert_eq!(analysis.experience_compatibility, 100.0);
    assert_eq!(analysis.skill_match, 81.0);
    assert_eq!(analysis.overall_capability, 86.7);
    assert_eq!(analysis.missing_skills[&SkillCategory::CloudDevops], vec!["terraform".to_string()]);
    assert_eq!(analysis.missing_skills[&SkillCategory::SoftSkills], vec!["communication".to_string()]);
    assert_eq!(outcome.mode, GenerationMode::Deterministic);
    assert!(outcome.suggestions.len() <= narrative::MAX_SUGGESTIONS);
}

#[test]
fn test_data_analyst_scenario() {
    let analysis = deterministic_analyzer().analyze_capability(
        "Experienced Python developer with SQL skills, 3+ years",
        "Looking for python and sql",
        "Data Analyst",
    );

    assert_eq!(analysis.skill_match, 100.0);
    assert_eq!(analysis.resume_experience_level, ExperienceLevel::Mid);
    assert_eq!(analysis.job_level, ExperienceLevel::Mid);
    assert_eq!(analysis.experience_compatibility, 100.0);
    assert_eq!(analysis.overall_capability, 100.0);
}

#[test]
fn test_partial_skill_match_scenario() {
    let resume = skills(&[(SkillCategory::CoreTechnical, 1.5, &["python"])]);
    let job = skills(&[
        (SkillCategory::CoreTechnical, 1.5, &["python", "sql"]),
        (SkillCategory::CloudDevops, 1.4, &["docker"]),
    ]);

    let scores = calculate_capability_score(&resume, &job, ExperienceLevel::Mid, "Engineer");
    assert!((scores.skill_breakdown.actual_achieved - 1.5).abs() < 1e-9);
    assert!((scores.skill_breakdown.total_possible - 4.4).abs() < 1e-9);
    assert_eq!(scores.skill_match, 34.1);
    assert_eq!(scores.experience_compatibility, 100.0);
    assert_eq!(scores.overall_capability, 53.9);
}

#[test]
fn test_indicator_precedence_and_strategies() {
    let indicators = ExperienceClassifier::new(ExperienceStrategy::Indicators);
    assert_eq!(
        indicators.detect_experience_level("Team lead, started as an intern"),
        ExperienceLevel::Senior
    );

    let years = ExperienceClassifier::new(ExperienceStrategy::YearsPattern);
    assert_eq!(years.detect_experience_level("12 years building systems"), ExperienceLevel::Senior);
    assert_eq!(years.detect_experience_level(""), ExperienceLevel::Unknown);
}

#[tokio::test]
async fn test_blank_input_short_circuits_before_llm() {
    let service = Arc::new(ScriptedLlm {
        calls: AtomicUsize::new(0),
    });
    let analyzer = analyzer_with(service.clone());

    let outcome = analyzer.analyze(&request("   ", "python", "Engineer", true)).await;
    assert_eq!(outcome.analysis, CapabilityAnalysis::empty());
    assert_eq!(outcome.mode, GenerationMode::Deterministic);
    assert!(outcome.degradations.is_empty());

    let outcome = analyzer.analyze(&request("python", "", "Engineer", true)).await;
    assert!(outcome.analysis.is_empty());
    assert_eq!(service.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_generative_mode_uses_service() {
    let service = Arc::new(ScriptedLlm {
        calls: AtomicUsize::new(0),
    });
    let analyzer = analyzer_with(service.clone());

    let outcome = analyzer
        .analyze(&request(
            "Rust and Python engineer",
            "We need Rust, Python and Docker",
            "Senior Engineer",
            true,
        ))
        .await;

    assert_eq!(outcome.mode, GenerationMode::Generative);
    assert!(outcome.degradations.is_empty(), "{:?}", outcome.degradations);
    // resume skills, job skills, experience, explanation, suggestions
    assert_eq!(service.calls.load(Ordering::SeqCst), 5);

    let analysis = &outcome.analysis;
    assert_eq!(analysis.resume_experience_level, ExperienceLevel::Senior);
    assert_eq!(
        analysis.resume_skills[&SkillCategory::CoreTechnical].skills,
        vec!["python".to_string(), "rust".to_string()]
    );
    assert_eq!(analysis.resume_skills[&SkillCategory::CoreTechnical].weight, 1.5);
    assert_eq!(analysis.skill_match, 100.0);

    assert_eq!(outcome.explanation, "You are a strong fit for this role.");
    assert_eq!(outcome.suggestions.len(), 3);
    assert_eq!(outcome.suggestions[0], "Deepen your Rust experience");
    assert_eq!(outcome.assessment, narrative::get_capability_assessment(analysis));
}

#[tokio::test]
async fn test_generative_mode_falls_back_piece_by_piece() {
    let service = Arc::new(FailingLlm {
        calls: AtomicUsize::new(0),
    });
    let analyzer = analyzer_with(service.clone());
    let resume = "Senior developer: python, docker, aws";
    let job = "python, kubernetes";

    let outcome = analyzer.analyze(&request(resume, job, "Senior Engineer", true)).await;

    let components: Vec<Component> = outcome.degradations.iter().map(|d| d.component).collect();
    assert_eq!(
        components,
        vec![
            Component::ResumeSkills,
            Component::JobSkills,
            Component::Experience,
            Component::Explanation,
            Component::Suggestions,
        ]
    );
    assert!(outcome.degradations[0].reason.contains("connection refused"));

    let baseline = deterministic_analyzer().analyze_capability(resume, job, "Senior Engineer");
    assert_eq!(outcome.analysis.resume_skills, baseline.resume_skills);
    assert_eq!(outcome.analysis.job_skills, baseline.job_skills);
    assert_eq!(outcome.analysis.resume_experience_level, baseline.resume_experience_level);
    assert_eq!(outcome.analysis.resume_experience_level, ExperienceLevel::Senior);
    assert_eq!(outcome.analysis, baseline);

    assert_eq!(outcome.explanation, narrative::generate_explanation(&outcome.analysis));
    assert_eq!(outcome.suggestions, narrative::get_improvement_suggestions(&outcome.analysis));
}

#[tokio::test]
async fn test_failed_seniority_call_uses_classifier() {
    let analyzer = analyzer_with(Arc::new(NoSeniorityLlm));
    assert!(analyzer.has_llm());

    let outcome = analyzer
        .analyze(&request("Senior engineer, python", "python", "Senior Engineer", true))
        .await;

    let components: Vec<Component> = outcome.degradations.iter().map(|d| d.component).collect();
    assert_eq!(components, vec![Component::Experience]);
    assert!(outcome.degradations[0].reason.contains("timed out"));

    let analysis = &outcome.analysis;
    assert_eq!(analysis.resume_experience_level, ExperienceLevel::Senior);
    assert_eq!(analysis.experience_compatibility, 100.0);
    assert_eq!(analysis.skill_match, 100.0);
    assert_eq!(analysis.overall_capability, 100.0);
    assert_eq!(outcome.explanation, "A close match.");
}

#[tokio::test]
async fn test_malformed_structured_response_degrades() {
    let analyzer = analyzer_with(Arc::new(ChattyLlm));
    let outcome = analyzer
        .analyze(&request("python developer", "python and docker", "Engineer", true))
        .await;

    let components: Vec<Component> = outcome.degradations.iter().map(|d| d.component).collect();
    assert!(components.contains(&Component::ResumeSkills));
    assert!(components.contains(&Component::JobSkills));
    assert!(!components.contains(&Component::Explanation));
    // free-form text is accepted as-is
    assert_eq!(outcome.explanation, "Sure! Here is what I found: python, docker.");
    assert_eq!(outcome.analysis.resume_experience_level, ExperienceLevel::Unknown);
}

#[tokio::test]
async fn test_generative_request_without_service_is_deterministic() {
    let analyzer = deterministic_analyzer();
    let req = request("python developer", "python", "Engineer", true);

    let outcome = analyzer.analyze(&req).await;
    assert_eq!(outcome.mode, GenerationMode::Deterministic);
    assert_eq!(outcome.degradations.len(), 1);
    assert_eq!(outcome.degradations[0].component, Component::LlmUnavailable);

    let plain = analyzer
        .analyze(&AnalysisRequest {
            use_generative_mode: false,
            ..req
        })
        .await;
    assert_eq!(plain.analysis, outcome.analysis);
    assert_eq!(plain.explanation, outcome.explanation);
    assert!(plain.degradations.is_empty());
}

#[tokio::test]
async fn test_outcomes_are_deterministic_across_analyzers() {
    let req = request(
        "Lead engineer with java, spring, kubernetes and leadership",
        "java spring aws postgresql communication",
        "Principal Engineer",
        false,
    );

    let first = deterministic_analyzer().analyze(&req).await;
    let second = deterministic_analyzer().analyze(&req).await;

    assert_eq!(first.analysis, second.analysis);
    assert_eq!(first.explanation, second.explanation);
    assert_eq!(first.assessment, second.assessment);
    assert_eq!(first.suggestions, second.suggestions);
}
