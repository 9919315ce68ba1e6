//! HTTP client for single-shot text generation

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use crate::config::AppConfig;
use crate::errors::RagGraphError;
use crate::errors::Result;
use crate::llm::LanguageModel;

/// Supported LLM wire formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LlmProvider {
    OpenAI,
    Ollama,
}

/// Client wrapping a text-generation model behind an HTTP endpoint
pub struct LlmService {
    provider: LlmProvider,
    model: String,
    endpoint: String,
    api_key: String,
    client: Client,
}

impl LlmService {
    /// Create a new LLM service from the application config
    ///
    /// # Errors
    /// - Missing LLM endpoint or key in configuration
    /// - HTTP client build errors
    pub fn new(config: &AppConfig) -> Result<Self> {
        if config.llm_endpoint().trim().is_empty() {
            return Err(RagGraphError::Config(
                "llm.llm_endpoint is not set".to_string(),
            ));
        }
        if config.llm_key().trim().is_empty() {
            return Err(RagGraphError::Config("llm.llm_key is not set".to_string()));
        }

        let provider = if config.llm_key() == "ollama" {
            LlmProvider::Ollama
        } else {
            LlmProvider::OpenAI
        };

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .map_err(|e| RagGraphError::Http(e.to_string()))?;

        Ok(Self {
            provider,
            model: config.llm_model().to_string(),
            endpoint: config.llm_endpoint().to_string(),
            api_key: config.llm_key().to_string(),
            client,
        })
    }

    async fn complete_openai(&self, prompt: &str) -> Result<String> {
        #[derive(Serialize)]
        struct ChatMessage<'a> {
            role: &'a str,
            content: &'a str,
        }

        #[derive(Serialize)]
        struct ChatRequest<'a> {
            model: &'a str,
            messages: Vec<ChatMessage<'a>>,
        }

        #[derive(Deserialize)]
        struct ChatResponse {
            choices: Vec<Choice>,
        }

        #[derive(Deserialize)]
        struct Choice {
            message: ResponseMessage,
        }

        #[derive(Deserialize)]
        struct ResponseMessage {
            content: String,
        }

        let url = format!("{}/chat/completions", self.endpoint);
        debug!("Calling chat completions API: {}", url);

        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| RagGraphError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(RagGraphError::Llm(format!(
                "Chat API error ({status}): {error_text}"
            )));
        }

        let result: ChatResponse = response
            .json()
            .await
            .map_err(|e| RagGraphError::Llm(format!("Failed to parse response: {e}")))?;

        result
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| RagGraphError::Llm("No choices in response".to_string()))
    }

    async fn complete_ollama(&self, prompt: &str) -> Result<String> {
        #[derive(Serialize)]
        struct GenerateRequest<'a> {
            model: &'a str,
            prompt: &'a str,
            stream: bool,
        }

        #[derive(Deserialize)]
        struct GenerateResponse {
            response: String,
        }

        let url = format!("{}/api/generate", self.endpoint);
        debug!("Calling Ollama generate API: {}", url);

        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| RagGraphError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(RagGraphError::Llm(format!(
                "Ollama API error ({status}): {error_text}"
            )));
        }

        let result: GenerateResponse = response
            .json()
            .await
            .map_err(|e| RagGraphError::Llm(format!("Failed to parse response: {e}")))?;

        Ok(result.response)
    }
}

#[async_trait]
impl LanguageModel for LlmService {
    async fn complete(&self, prompt: &str) -> Result<String> {
        match self.provider {
            LlmProvider::OpenAI => self.complete_openai(prompt).await,
            LlmProvider::Ollama => self.complete_ollama(prompt).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_rejects_empty_endpoint() {
        let mut config = AppConfig::default();
        config.llm.llm_endpoint = String::new();
        assert!(matches!(
            LlmService::new(&config),
            Err(RagGraphError::Config(_))
        ));
    }

    #[test]
    fn test_ollama_key_selects_ollama_provider() {
        let config = AppConfig::default();
        let service = LlmService::new(&config).unwrap();
        assert_eq!(service.provider, LlmProvider::Ollama);
    }

    #[test]
    fn test_bearer_key_selects_openai_provider() {
        let mut config = AppConfig::default();
        config.llm.llm_key = "sk-test".to_string();
        let service = LlmService::new(&config).unwrap();
        assert_eq!(service.provider, LlmProvider::OpenAI);
    }
}
