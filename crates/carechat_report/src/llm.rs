//! LLM-backed summarizer.
//!
//! Supports OpenAI, Anthropic and a local Ollama server, selected via
//! environment variables.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ReportError, ReportResult};
use crate::summarizer::Summarizer;

const MAX_RETRIES: u32 = 3;
const MAX_TOKENS: u32 = 2048;

const SYSTEM_PROMPT: &str = "You are a clinical documentation assistant. \
Summarize therapy and support conversations accurately and neutrally.";

/// LLM provider type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LlmProvider {
    OpenAI,
    Anthropic,
    /// Local Ollama server at the given base URL
    Ollama { host: String },
}

impl LlmProvider {
    fn label(&self) -> &'static str {
        match self {
            Self::OpenAI => "OpenAI",
            Self::Anthropic => "Anthropic",
            Self::Ollama { .. } => "Ollama",
        }
    }
}

/// Summarizer that calls a hosted or local language model
pub struct LlmSummarizer {
    provider: LlmProvider,
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl LlmSummarizer {
    /// Create a summarizer with explicit configuration
    pub fn new(provider: LlmProvider, api_key: String, model: Option<String>) -> Self {
        let default_model = match provider {
            LlmProvider::OpenAI => "gpt-4o-mini".to_string(),
            LlmProvider::Anthropic => "claude-3-5-haiku-latest".to_string(),
            LlmProvider::Ollama { .. } => "llama3.1".to_string(),
        };

        Self {
            provider,
            api_key,
            model: model.unwrap_or(default_model),
            client: reqwest::Client::new(),
        }
    }

    /// Create a summarizer from environment variables
    ///
    /// Checks in order:
    /// 1. OPENAI_API_KEY
    /// 2. ANTHROPIC_API_KEY
    /// 3. OLLAMA_HOST
    ///
    /// `CARECHAT_LLM_MODEL` overrides the provider's default model.
    pub fn from_env() -> ReportResult<Self> {
        let custom_model = std::env::var("CARECHAT_LLM_MODEL")
            .ok()
            .filter(|m| !m.is_empty());

        if let Ok(api_key) = std::env::var("OPENAI_API_KEY") {
            if !api_key.is_empty() {
                return Ok(Self::new(LlmProvider::OpenAI, api_key, custom_model));
            }
        }

        if let Ok(api_key) = std::env::var("ANTHROPIC_API_KEY") {
            if !api_key.is_empty() {
                return Ok(Self::new(LlmProvider::Anthropic, api_key, custom_model));
            }
        }

        if let Ok(host) = std::env::var("OLLAMA_HOST") {
            if !host.is_empty() {
                let host = host.trim_end_matches('/').to_string();
                return Ok(Self::new(LlmProvider::Ollama { host }, String::new(), custom_model));
            }
        }

        Err(ReportError::Config(
            "No summarization model configured. Set OPENAI_API_KEY, ANTHROPIC_API_KEY or OLLAMA_HOST"
                .to_string(),
        ))
    }

    pub fn provider(&self) -> &LlmProvider {
        &self.provider
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn request(&self, prompt: &str) -> reqwest::RequestBuilder {
        match &self.provider {
            LlmProvider::OpenAI => self
                .client
                .post("https://api.openai.com/v1/chat/completions")
                .header("Authorization", format!("Bearer {}", self.api_key))
                .json(&OpenAIRequest {
                    model: self.model.clone(),
                    messages: vec![
                        OpenAIMessage {
                            role: "system".to_string(),
                            content: SYSTEM_PROMPT.to_string(),
                        },
                        OpenAIMessage {
                            role: "user".to_string(),
                            content: prompt.to_string(),
                        },
                    ],
                    max_completion_tokens: Some(MAX_TOKENS),
                }),
            LlmProvider::Anthropic => self
                .client
                .post("https://api.anthropic.com/v1/messages")
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", "2023-06-01")
                .json(&AnthropicRequest {
                    model: self.model.clone(),
                    max_tokens: MAX_TOKENS,
                    system: Some(SYSTEM_PROMPT.to_string()),
                    messages: vec![AnthropicMessage {
                        role: "user".to_string(),
                        content: prompt.to_string(),
                    }],
                }),
            LlmProvider::Ollama { host } => self
                .client
                .post(format!("{}/api/generate", host))
                .json(&OllamaRequest {
                    model: self.model.clone(),
                    system: SYSTEM_PROMPT.to_string(),
                    prompt: prompt.to_string(),
                    stream: false,
                }),
        }
    }

    async fn parse(&self, response: reqwest::Response) -> ReportResult<String> {
        let parse_error =
            |e: reqwest::Error| ReportError::Collaborator(format!("Failed to parse response: {}", e));

        let content = match self.provider {
            LlmProvider::OpenAI => {
                let result: OpenAIResponse = response.json().await.map_err(parse_error)?;
                result.choices.into_iter().next().map(|c| c.message.content)
            }
            LlmProvider::Anthropic => {
                let result: AnthropicResponse = response.json().await.map_err(parse_error)?;
                result.content.into_iter().next().map(|c| c.text)
            }
            LlmProvider::Ollama { .. } => {
                let result: OllamaResponse = response.json().await.map_err(parse_error)?;
                Some(result.response)
            }
        };

        content.ok_or_else(|| {
            ReportError::Collaborator(format!("No response from {}", self.provider.label()))
        })
    }
}

#[async_trait]
impl Summarizer for LlmSummarizer {
    fn model_name(&self) -> String {
        self.model.clone()
    }

    async fn summarize(&self, prompt: &str) -> ReportResult<String> {
        let label = self.provider.label();
        let mut last_error = None;

        // Retry transient errors (5xx, rate limits, network issues)
        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 2s, 4s
                let delay = Duration::from_secs(1 << attempt);
                debug!("Retrying {} request in {:?}", label, delay);
                tokio::time::sleep(delay).await;
            }

            let response = match self.request(prompt).send().await {
                Ok(resp) => resp,
                Err(e) => {
                    warn!("{} request failed: {}", label, e);
                    last_error = Some(ReportError::Collaborator(format!("Network error: {}", e)));
                    continue;
                }
            };

            let status = response.status();

            if status.is_server_error() || status.as_u16() == 429 {
                let body = response.text().await.unwrap_or_default();
                last_error = Some(ReportError::Collaborator(format!(
                    "{} API error {} (attempt {}/{}): {}",
                    label,
                    status,
                    attempt + 1,
                    MAX_RETRIES,
                    body
                )));
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(ReportError::Collaborator(format!(
                    "{} API error {}: {}",
                    label, status, body
                )));
            }

            return self.parse(response).await;
        }

        Err(last_error
            .unwrap_or_else(|| ReportError::Collaborator("Max retries exceeded".to_string())))
    }
}

impl std::fmt::Debug for LlmSummarizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmSummarizer")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .finish()
    }
}

// OpenAI API types
#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_completion_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct OpenAIMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIResponseMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponseMessage {
    content: String,
}

// Anthropic API types
#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<AnthropicMessage>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicContent>,
}

#[derive(Debug, Deserialize)]
struct AnthropicContent {
    text: String,
}

// Ollama API types
#[derive(Debug, Serialize)]
struct OllamaRequest {
    model: String,
    system: String,
    prompt: String,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_detection() {
        std::env::remove_var("OPENAI_API_KEY");
        std::env::remove_var("ANTHROPIC_API_KEY");
        std::env::remove_var("OLLAMA_HOST");
        std::env::remove_var("CARECHAT_LLM_MODEL");

        assert!(matches!(
            LlmSummarizer::from_env(),
            Err(ReportError::Config(_))
        ));

        std::env::set_var("OLLAMA_HOST", "http://localhost:11434/");
        let summarizer = LlmSummarizer::from_env().unwrap();
        assert_eq!(
            summarizer.provider(),
            &LlmProvider::Ollama {
                host: "http://localhost:11434".to_string()
            }
        );

        std::env::set_var("ANTHROPIC_API_KEY", "test-key");
        let summarizer = LlmSummarizer::from_env().unwrap();
        assert_eq!(summarizer.provider(), &LlmProvider::Anthropic);

        std::env::set_var("OPENAI_API_KEY", "test-key");
        std::env::set_var("CARECHAT_LLM_MODEL", "gpt-4o");
        let summarizer = LlmSummarizer::from_env().unwrap();
        assert_eq!(summarizer.provider(), &LlmProvider::OpenAI);
        assert_eq!(summarizer.model_name(), "gpt-4o");

        std::env::remove_var("OPENAI_API_KEY");
        std::env::remove_var("ANTHROPIC_API_KEY");
        std::env::remove_var("OLLAMA_HOST");
        std::env::remove_var("CARECHAT_LLM_MODEL");
    }

    #[test]
    fn test_default_models() {
        let openai = LlmSummarizer::new(LlmProvider::OpenAI, "key".to_string(), None);
        assert_eq!(openai.model(), "gpt-4o-mini");

        let ollama = LlmSummarizer::new(
            LlmProvider::Ollama {
                host: "http://localhost:11434".to_string(),
            },
            String::new(),
            None,
        );
        assert_eq!(ollama.model(), "llama3.1");
    }

    #[test]
    fn test_ollama_response_shape() {
        let parsed: OllamaResponse =
            serde_json::from_str(r#"{"model":"llama3.1","response":"SUMMARY:\nok","done":true}"#)
                .unwrap();
        assert_eq!(parsed.response, "SUMMARY:\nok");
    }
}
