//! Language model adapter
//!
//! Single-shot text generation over HTTP. Two wire formats are supported:
//! OpenAI-compatible chat completions and the Ollama generate endpoint. The
//! provider is picked from config the same way as for embeddings: an
//! `llm_key` of "ollama" selects the local endpoint, anything else is sent
//! as a bearer token to an OpenAI-compatible API.

pub mod prompts;
pub mod service;

pub use service::LlmService;

use async_trait::async_trait;

use crate::errors::Result;

/// Text-generation adapter boundary
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Complete a prompt and return the generated text verbatim
    async fn complete(&self, prompt: &str) -> Result<String>;
}
