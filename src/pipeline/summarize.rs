//! Prompt construction and the summarization engine.

use std::time::Duration;

use tracing::info;

use crate::core::config::ProviderConfig;
use crate::core::models::{Author, SourceMessage, SummaryResult};
use crate::errors::BotError;
use crate::llm::{ChatBackend, PromptMessage, backend_from_config};

/// Placeholder author used in the prompt when identity resolution failed.
/// Plain text, never wrapped in mention syntax.
pub const UNRESOLVED_AUTHOR: &str = "unknown";

/// The fixed instruction heading every prompt.
pub const SYSTEM_PROMPT: &str = "Summarize the messages in this conversation. \
Only output the summary. To mention a user, use <@user_id>. If there is only \
one message in the conversation, write a real summary of that message rather \
than restating it. Never invent a mention for an author marked unknown.";

/// Upper bound on one model invocation; the only unbounded-latency call in
/// the request path.
const MODEL_TIMEOUT: Duration = Duration::from_secs(120);

/// Build the ordered prompt: the fixed system instruction, then one
/// user-role entry per retained message in conversation order.
#[must_use]
pub fn build_prompt(messages: &[SourceMessage]) -> Vec<PromptMessage> {
    let mut prompt = Vec::with_capacity(messages.len() + 1);
    prompt.push(PromptMessage::system(SYSTEM_PROMPT));

    for msg in messages {
        let entry = match &msg.author {
            Author::Known(user_id) => format!("<@{}>: {}", user_id, msg.text),
            Author::Unresolved => format!("{}: {}", UNRESOLVED_AUTHOR, msg.text),
        };
        prompt.push(PromptMessage::user(entry));
    }

    prompt
}

/// The summarization engine: one configured chat backend behind the
/// `ChatBackend` seam, constructed once at start-up.
pub struct SummaryEngine {
    backend: Box<dyn ChatBackend>,
}

impl SummaryEngine {
    /// # Errors
    ///
    /// Returns `BotError::Configuration` if the backend cannot be built.
    pub fn new(provider: &ProviderConfig) -> Result<Self, BotError> {
        let backend = backend_from_config(provider)?;
        Ok(Self { backend })
    }

    /// Summarize the retained messages. The model's text comes back
    /// verbatim; no post-processing or truncation.
    ///
    /// # Errors
    ///
    /// Returns `BotError::Summarization` if the backend fails or does not
    /// answer within the invocation timeout.
    pub async fn summarize(&self, messages: &[SourceMessage]) -> Result<SummaryResult, BotError> {
        let prompt = build_prompt(messages);
        info!(
            backend = self.backend.name(),
            entries = prompt.len(),
            "invoking chat model"
        );

        let text = tokio::time::timeout(MODEL_TIMEOUT, self.backend.invoke(&prompt))
            .await
            .map_err(|_| {
                BotError::Summarization(format!(
                    "chat model did not answer within {}s",
                    MODEL_TIMEOUT.as_secs()
                ))
            })??;

        Ok(SummaryResult { text })
    }
}
