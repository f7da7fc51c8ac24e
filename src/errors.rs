use openai_api_rs::v1::error::APIError;
use slack_morphism::errors::SlackClientError;
use thiserror::Error;

/// Every failure the bot can hit, classified by how it is recovered.
///
/// `InvalidReference` and `ChannelAccess` are recovered locally (a usage
/// hint, a DM notice); the rest flow to the pipeline's generic failure
/// path. `Configuration` is only produced at start-up and is fatal.
#[derive(Debug, Error)]
pub enum BotError {
    #[error("invalid message reference: {0}")]
    InvalidReference(String),

    #[error("no access to channel {channel}")]
    ChannelAccess { channel: String },

    #[error("Slack API failure: {0}")]
    Transport(String),

    #[error("failed to deliver summary: {0}")]
    Delivery(String),

    #[error("chat model failure: {0}")]
    Summarization(String),

    #[error("invalid configuration: {0}")]
    Configuration(String),
}

impl BotError {
    /// Transient transport failures are the only class worth retrying.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, BotError::Transport(_))
    }
}

impl From<SlackClientError> for BotError {
    fn from(error: SlackClientError) -> Self {
        BotError::Transport(error.to_string())
    }
}

impl From<reqwest::Error> for BotError {
    fn from(error: reqwest::Error) -> Self {
        BotError::Transport(error.to_string())
    }
}

impl From<APIError> for BotError {
    fn from(error: APIError) -> Self {
        BotError::Summarization(error.to_string())
    }
}

impl From<serde_yaml::Error> for BotError {
    fn from(error: serde_yaml::Error) -> Self {
        BotError::Configuration(error.to_string())
    }
}
