//! Remote text-generation services

use crate::config::{LlmConfig, LlmProvider};
use crate::error::{CapabilityError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// A service that turns a prompt into free-form text
#[async_trait]
pub trait LlmService: Send + Sync {
    async fn generate(&self, prompt: &str, model: &str) -> Result<String>;

    fn name(&self) -> &str;
}

/// Build the configured provider if its API key is present in the environment.
///
/// Returns `Ok(None)` when the key is missing or blank so callers run
/// deterministically for the rest of the session.
pub fn connect(config: &LlmConfig) -> Result<Option<Arc<dyn LlmService>>> {
    let key_var = config.api_key_env();
    let api_key = match std::env::var(key_var) {
        Ok(key) if !key.trim().is_empty() => key.trim().to_string(),
        _ => {
            log::info!(
                "{} is not set; generative mode is unavailable and analysis runs deterministically",
                key_var
            );
            return Ok(None);
        }
    };

    let service: Arc<dyn LlmService> = match config.provider {
        LlmProvider::OpenAi => Arc::new(OpenAiClient::new(api_key, config)?),
        LlmProvider::Gemini => Arc::new(GeminiClient::new(api_key, config)?),
    };
    log::debug!("Connected LLM provider '{}' at {}", service.name(), config.base_url());
    Ok(Some(service))
}

/// Turn a non-success status into an error carrying the start of the body
async fn check_status(service: &str, resp: reqwest::Response) -> Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    let excerpt: String = body.chars().take(200).collect();
    Err(CapabilityError::LlmService(format!("{} returned {}: {}", service, status, excerpt.trim())))
}

/// Transport errors echo the request URL, so strip it before wrapping
fn transport_error(e: reqwest::Error) -> CapabilityError {
    CapabilityError::Http(e.without_url())
}

fn http_client(config: &LlmConfig) -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?)
}

#[derive(Debug, Serialize, Deserialize, Clone)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatCompletionChoice>,
}

/// OpenAI-compatible chat-completions endpoint
pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAiClient {
    pub fn new(api_key: String, config: &LlmConfig) -> Result<Self> {
        Ok(Self {
            client: http_client(config)?,
            api_key,
            base_url: config.base_url().to_string(),
            temperature: config.temperature,
            max_tokens: config.max_output_tokens,
        })
    }
}

#[async_trait]
impl LlmService for OpenAiClient {
    async fn generate(&self, prompt: &str, model: &str) -> Result<String> {
        let request = ChatCompletionRequest {
            model,
            messages: vec![ChatMessage {
                role: "user".into(),
                content: prompt.into(),
            }],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;
        let resp = check_status(self.name(), resp).await?;

        let api_response: ChatCompletionResponse = resp.json().await.map_err(transport_error)?;
        api_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| CapabilityError::MalformedResponse("response contained no choices".to_string()))
    }

    fn name(&self) -> &str {
        "openai"
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<GeminiContent>,
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

/// Google Gemini `generateContent` endpoint
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    temperature: f32,
    max_output_tokens: u32,
}

impl GeminiClient {
    pub fn new(api_key: String, config: &LlmConfig) -> Result<Self> {
        Ok(Self {
            client: http_client(config)?,
            api_key,
            base_url: config.base_url().to_string(),
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
        })
    }
}

#[async_trait]
impl LlmService for GeminiClient {
    async fn generate(&self, prompt: &str, model: &str) -> Result<String> {
        let request = GenerateContentRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: prompt.to_string() }],
            }],
            generation_config: GeminiGenerationConfig {
                temperature: self.temperature,
                max_output_tokens: self.max_output_tokens,
            },
        };

        let resp = self
            .client
            .post(format!("{}/models/{}:generateContent", self.base_url, model))
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;
        let resp = check_status(self.name(), resp).await?;

        let api_response: GenerateContentResponse = resp.json().await.map_err(transport_error)?;
        let text: String = api_response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| content.parts.into_iter().map(|p| p.text).collect())
            .ok_or_else(|| CapabilityError::MalformedResponse("response contained no candidates".to_string()))?;

        Ok(text)
    }

    fn name(&self) -> &str {
        "gemini"
    }
}
