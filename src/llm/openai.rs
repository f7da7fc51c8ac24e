//! Hosted chat model behind an OpenAI-compatible chat-completions API.

use async_trait::async_trait;
use openai_api_rs::v1::api::OpenAIClient;
use openai_api_rs::v1::chat_completion::{
    ChatCompletionMessage, ChatCompletionRequest, Content, MessageRole,
};
use tokio::sync::Mutex;

use crate::errors::BotError;

use super::{ChatBackend, PromptMessage, PromptRole};

pub struct OpenAiBackend {
    // openai-api-rs takes `&mut self` on completion calls.
    client: Mutex<OpenAIClient>,
    model: String,
}

impl OpenAiBackend {
    /// # Errors
    ///
    /// Returns `BotError::Configuration` if the client cannot be built.
    pub fn new(endpoint: String, api_key: String, model: String) -> Result<Self, BotError> {
        let client = OpenAIClient::builder()
            .with_endpoint(endpoint)
            .with_api_key(api_key)
            .build()
            .map_err(|e| BotError::Configuration(format!("failed to build OpenAI client: {e}")))?;

        Ok(Self {
            client: Mutex::new(client),
            model,
        })
    }
}

fn to_completion_messages(messages: &[PromptMessage]) -> Vec<ChatCompletionMessage> {
    messages
        .iter()
        .map(|msg| ChatCompletionMessage {
            role: match msg.role {
                PromptRole::System => MessageRole::system,
                PromptRole::User => MessageRole::user,
            },
            content: Content::Text(msg.content.clone()),
            name: None,
            tool_calls: None,
            tool_call_id: None,
        })
        .collect()
}

#[async_trait]
impl ChatBackend for OpenAiBackend {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn invoke(&self, messages: &[PromptMessage]) -> Result<String, BotError> {
        let request = ChatCompletionRequest::new(self.model.clone(), to_completion_messages(messages));

        let result = {
            let mut client = self.client.lock().await;
            client.chat_completion(request).await?
        };

        result
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| BotError::Summarization("chat completion had no content".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_map_onto_completion_roles() {
        let converted = to_completion_messages(&[
            PromptMessage::system("instructions"),
            PromptMessage::user("<@U1>: hi"),
        ]);

        assert_eq!(converted.len(), 2);
        assert!(matches!(converted[0].role, MessageRole::system));
        assert!(matches!(converted[1].role, MessageRole::user));
        match &converted[1].content {
            Content::Text(text) => assert_eq!(text, "<@U1>: hi"),
            other => panic!("expected text content, got: {other:?}"),
        }
    }
}
