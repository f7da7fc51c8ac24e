//! Locally-hosted chat model behind Ollama's `/api/chat` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};

use crate::errors::BotError;

use super::{ChatBackend, PromptMessage};

const HTTP_TIMEOUT: Duration = Duration::from_secs(300);

pub struct OllamaBackend {
    endpoint: String,
    model: String,
    http: Client,
}

impl OllamaBackend {
    #[must_use]
    pub fn new(endpoint: String, model: String) -> Self {
        let http = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model,
            http,
        }
    }

    fn build_request_body(&self, messages: &[PromptMessage]) -> Value {
        json!({
            "model": self.model,
            "messages": messages,
            "stream": false,
        })
    }
}

#[async_trait]
impl ChatBackend for OllamaBackend {
    fn name(&self) -> &'static str {
        "ollama"
    }

    async fn invoke(&self, messages: &[PromptMessage]) -> Result<String, BotError> {
        let url = format!("{}/api/chat", self.endpoint);
        let body = self.build_request_body(messages);

        let resp = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| BotError::Summarization(format!("Ollama request failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let detail = resp.text().await.unwrap_or_else(|_| "<no body>".to_string());
            return Err(BotError::Summarization(format!(
                "Ollama HTTP {status}: {detail}"
            )));
        }

        let reply: Value = resp
            .json()
            .await
            .map_err(|e| BotError::Summarization(format!("Ollama response parse error: {e}")))?;

        reply
            .get("message")
            .and_then(|m| m.get("content"))
            .and_then(Value::as_str)
            .map(ToString::to_string)
            .ok_or_else(|| BotError::Summarization("Ollama response had no message content".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_carries_roles_and_disables_streaming() {
        let backend = OllamaBackend::new("http://localhost:11434/".to_string(), "llama3.1:8b".to_string());
        let body = backend.build_request_body(&[
            PromptMessage::system("summarize"),
            PromptMessage::user("<@U1>: hello"),
        ]);

        assert_eq!(body["model"], "llama3.1:8b");
        assert_eq!(body["stream"], false);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "<@U1>: hello");
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let backend = OllamaBackend::new("http://localhost:11434/".to_string(), "m".to_string());
        assert_eq!(backend.endpoint, "http://localhost:11434");
    }
}
