//! Chat-model backends.
//!
//! Exactly one backend is constructed at start-up from the resolved
//! provider configuration; the pipeline only ever sees the `ChatBackend`
//! trait.

pub mod ollama;
pub mod openai;

use async_trait::async_trait;
use serde::Serialize;

use crate::core::config::ProviderConfig;
use crate::errors::BotError;

/// Role of one prompt entry, serialized lowercase on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptRole {
    System,
    User,
}

/// One entry of the ordered prompt handed to a backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptMessage {
    pub role: PromptRole,
    pub content: String,
}

impl PromptMessage {
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: PromptRole::System,
            content: content.into(),
        }
    }

    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: PromptRole::User,
            content: content.into(),
        }
    }
}

/// A chat model that turns an ordered prompt into one text completion.
/// Single-shot, no streaming; the model's output is returned verbatim.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Provider label for logging.
    fn name(&self) -> &'static str;

    /// # Errors
    ///
    /// Returns `BotError::Summarization` on any backend failure.
    async fn invoke(&self, messages: &[PromptMessage]) -> Result<String, BotError>;
}

/// Build the one configured backend.
///
/// # Errors
///
/// Returns `BotError::Configuration` if the backend client cannot be built.
pub fn backend_from_config(provider: &ProviderConfig) -> Result<Box<dyn ChatBackend>, BotError> {
    match provider {
        ProviderConfig::Ollama { endpoint, model } => Ok(Box::new(ollama::OllamaBackend::new(
            endpoint.clone(),
            model.clone(),
        ))),
        ProviderConfig::OpenAi {
            endpoint,
            api_key,
            model,
        } => Ok(Box::new(openai::OpenAiBackend::new(
            endpoint.clone(),
            api_key.clone(),
            model.clone(),
        )?)),
    }
}
