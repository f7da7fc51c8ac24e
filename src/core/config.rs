use std::env;

use crate::errors::BotError;

const DEFAULT_OLLAMA_ENDPOINT: &str = "http://localhost:11434";
const DEFAULT_OPENAI_ENDPOINT: &str = "https://api.openai.com/v1";

/// The chat-model backend, resolved once at start-up. Exactly one provider
/// is active for the lifetime of the process; nothing on the request path
/// looks at configuration shape again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderConfig {
    Ollama {
        endpoint: String,
        model: String,
    },
    OpenAi {
        endpoint: String,
        api_key: String,
        model: String,
    },
}

impl ProviderConfig {
    /// Pick the single configured provider. Both-set and neither-set are
    /// configuration errors.
    pub fn resolve(
        ollama_model: Option<String>,
        ollama_endpoint: Option<String>,
        openai_api_key: Option<String>,
        openai_model: Option<String>,
        openai_endpoint: Option<String>,
    ) -> Result<Self, BotError> {
        match (ollama_model, openai_api_key) {
            (Some(_), Some(_)) => Err(BotError::Configuration(
                "both OLLAMA_MODEL and OPENAI_API_KEY are set; configure exactly one chat model provider".to_string(),
            )),
            (None, None) => Err(BotError::Configuration(
                "no chat model provider configured; set OLLAMA_MODEL or OPENAI_API_KEY".to_string(),
            )),
            (Some(model), None) => Ok(ProviderConfig::Ollama {
                endpoint: ollama_endpoint
                    .unwrap_or_else(|| DEFAULT_OLLAMA_ENDPOINT.to_string()),
                model,
            }),
            (None, Some(api_key)) => {
                let model = openai_model.ok_or_else(|| {
                    BotError::Configuration(
                        "OPENAI_API_KEY is set but OPENAI_MODEL is missing".to_string(),
                    )
                })?;
                Ok(ProviderConfig::OpenAi {
                    endpoint: openai_endpoint
                        .unwrap_or_else(|| DEFAULT_OPENAI_ENDPOINT.to_string()),
                    api_key,
                    model,
                })
            }
        }
    }

    /// Short provider label for start-up logging.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            ProviderConfig::Ollama { .. } => "ollama",
            ProviderConfig::OpenAi { .. } => "openai",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub slack_bot_token: String,
    pub slack_app_token: String,
    pub provider: ProviderConfig,
}

impl AppConfig {
    /// Load and validate configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns `BotError::Configuration` when a token is missing or
    /// malformed, or when the provider selection is not exactly-one-of.
    pub fn from_env() -> Result<Self, BotError> {
        let slack_bot_token = require_env("SLACK_BOT_TOKEN")?;
        let slack_app_token = require_env("SLACK_APP_TOKEN")?;
        validate_token_prefix("SLACK_BOT_TOKEN", &slack_bot_token, "xoxb-")?;
        validate_token_prefix("SLACK_APP_TOKEN", &slack_app_token, "xapp-")?;

        let provider = ProviderConfig::resolve(
            env::var("OLLAMA_MODEL").ok(),
            env::var("OLLAMA_ENDPOINT").ok(),
            env::var("OPENAI_API_KEY").ok(),
            env::var("OPENAI_MODEL").ok(),
            env::var("OPENAI_ENDPOINT").ok(),
        )?;

        Ok(Self {
            slack_bot_token,
            slack_app_token,
            provider,
        })
    }
}

fn require_env(name: &str) -> Result<String, BotError> {
    env::var(name).map_err(|_| BotError::Configuration(format!("{name} is not set")))
}

/// Slack token families carry a fixed prefix; anything else is a paste error.
pub fn validate_token_prefix(name: &str, value: &str, prefix: &str) -> Result<(), BotError> {
    if value.starts_with(prefix) {
        Ok(())
    } else {
        Err(BotError::Configuration(format!(
            "{name} must start with '{prefix}'"
        )))
    }
}
