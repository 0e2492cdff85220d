//! Configuration management for the capability analyzer

use crate::error::{CapabilityError, Result};
use crate::processing::analyzer::AnalyzerSettings;
use crate::processing::experience::ExperienceStrategy;
use crate::processing::taxonomy::{SkillCategory, SkillTaxonomy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub llm: LlmConfig,
    pub analysis: AnalysisConfig,
    pub taxonomy: TaxonomyConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub provider: LlmProvider,
    pub model: String,
    /// Environment variable holding the API key; provider default when unset
    pub api_key_env: Option<String>,
    /// Override of the provider endpoint, e.g. a local OpenAI-compatible server
    pub base_url: Option<String>,
    pub timeout_secs: u64,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    OpenAi,
    Gemini,
}

impl LlmProvider {
    pub fn default_api_key_env(&self) -> &'static str {
        match self {
            LlmProvider::OpenAi => "OPENAI_API_KEY",
            LlmProvider::Gemini => "GEMINI_API_KEY",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            LlmProvider::OpenAi => "https://api.openai.com/v1",
            LlmProvider::Gemini => "https://generativelanguage.googleapis.com/v1beta",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub experience_strategy: ExperienceStrategy,
    /// Use the LLM service when no mode is requested explicitly
    pub generative_by_default: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaxonomyConfig {
    /// Category id → additional keywords, e.g. `core_technical = ["rust", "go"]`
    #[serde(default)]
    pub extra_keywords: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::OpenAi,
            model: "gpt-4o-mini".to_string(),
            api_key_env: None,
            base_url: None,
            timeout_secs: 60,
            temperature: 0.4,
            max_output_tokens: 800,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
        }
    }
}

impl LlmConfig {
    pub fn api_key_env(&self) -> &str {
        self.api_key_env
            .as_deref()
            .unwrap_or_else(|| self.provider.default_api_key_env())
    }

    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.provider.default_base_url())
            .trim_end_matches('/')
    }
}

impl TaxonomyConfig {
    /// Build the skill taxonomy, rejecting unknown category ids
    pub fn build(&self) -> Result<SkillTaxonomy> {
        let mut extra = BTreeMap::new();

        for (id, keywords) in &self.extra_keywords {
            let category: SkillCategory = id
                .parse()
                .map_err(|e: String| CapabilityError::Configuration(e))?;
            extra.insert(category, keywords.clone());
        }

        Ok(SkillTaxonomy::with_extra_keywords(&extra))
    }
}

impl Config {
    /// Load from `path`, writing defaults there on first run
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| CapabilityError::Configuration(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| CapabilityError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Analyzer settings derived from this configuration
    pub fn settings(&self) -> Result<AnalyzerSettings> {
        Ok(AnalyzerSettings {
            taxonomy: Arc::new(self.taxonomy.build()?),
            experience_strategy: self.analysis.experience_strategy,
            model: self.llm.model.clone(),
        })
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("capability-analyzer")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.llm.provider, LlmProvider::OpenAi);
        assert_eq!(config.llm.api_key_env(), "OPENAI_API_KEY");
        assert_eq!(config.llm.base_url(), "https://api.openai.com/v1");
        assert_eq!(config.analysis.experience_strategy, ExperienceStrategy::Indicators);
        assert!(!config.analysis.generative_by_default);
        assert_eq!(config.output.format, OutputFormat::Console);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.llm.provider = LlmProvider::Gemini;
        config.llm.base_url = Some("http://localhost:8080/".to_string());
        config.analysis.experience_strategy = ExperienceStrategy::YearsPattern;
        config
            .taxonomy
            .extra_keywords
            .insert("core_technical".to_string(), vec!["rust".to_string()]);
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.llm.provider, LlmProvider::Gemini);
        assert_eq!(loaded.llm.api_key_env(), "GEMINI_API_KEY");
        assert_eq!(loaded.llm.base_url(), "http://localhost:8080");
        assert_eq!(loaded.analysis.experience_strategy, ExperienceStrategy::YearsPattern);
        assert_eq!(loaded.taxonomy.extra_keywords["core_technical"], vec!["rust".to_string()]);
    }

    #[test]
    fn test_missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert!(!path.exists());

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.llm.model, Config::default().llm.model);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[llm]\nprovider = \"gemini\"\n\n[analysis]\nexperience_strategy = \"years_pattern\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.llm.provider, LlmProvider::Gemini);
        assert_eq!(config.llm.timeout_secs, 60);
        assert_eq!(config.analysis.experience_strategy, ExperienceStrategy::YearsPattern);
        assert!(config.output.color_output);
    }

    #[test]
    fn test_invalid_toml_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "this is = = not toml").unwrap();

        match Config::load_from(&path) {
            Err(CapabilityError::Configuration(msg)) => assert!(msg.contains("Failed to parse config")),
            other => panic!("expected configuration error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_settings_carry_strategy_and_model() {
        let mut config = Config::default();
        config.analysis.experience_strategy = ExperienceStrategy::YearsPattern;
        config.llm.model = "gemini-1.5-flash".to_string();

        let settings = config.settings().unwrap();
        assert_eq!(settings.experience_strategy, ExperienceStrategy::YearsPattern);
        assert_eq!(settings.model, "gemini-1.5-flash");
        assert_eq!(settings.taxonomy.categories().len(), 6);
    }

    #[test]
    fn test_taxonomy_build_rejects_unknown_category() {
        let mut taxonomy = TaxonomyConfig::default();
        taxonomy
            .extra_keywords
            .insert("languages".to_string(), vec!["rust".to_string()]);
        assert!(matches!(taxonomy.build(), Err(CapabilityError::Configuration(_))));

        let mut taxonomy = TaxonomyConfig::default();
        taxonomy
            .extra_keywords
            .insert("databases".to_string(), vec!["Cassandra".to_string()]);
        let built = taxonomy.build().unwrap();
        assert!(built
            .get(SkillCategory::Databases)
            .unwrap()
            .keywords
            .contains(&"cassandra".to_string()));
    }
}
