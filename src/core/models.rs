use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Where the summary goes: into the channel for everyone, or only to the
/// requesting user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Visibility {
    Public,
    #[default]
    Ephemeral,
}

impl FromStr for Visibility {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(Visibility::Public),
            "ephemeral" => Ok(Visibility::Ephemeral),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Ephemeral => write!(f, "ephemeral"),
        }
    }
}

/// One summarization request, built fresh per slash command or shortcut
/// invocation and dropped when the pipeline task finishes.
#[derive(Debug, Clone)]
pub struct SummaryRequest {
    pub channel_id: String,
    /// Anchor message timestamp, `seconds.microseconds`.
    pub message_ts: String,
    pub user_id: String,
    pub visibility: Visibility,
}

/// A reply item as Slack returns it from `conversations.replies`. Regular
/// messages carry `user`; app messages carry `bot_id` instead.
#[derive(Debug, Clone, Deserialize)]
pub struct RawMessage {
    pub user: Option<String>,
    pub bot_id: Option<String>,
    #[serde(default)]
    pub text: String,
}

/// The resolved author of a message. `Unresolved` keeps the message in the
/// summarization input but suppresses mention syntax in the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Author {
    Known(String),
    Unresolved,
}

/// A message after author resolution, in the order Slack returned it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceMessage {
    pub author: Author,
    pub text: String,
}

/// The raw fetch for one request. `single_message` is classified on the
/// unfiltered reply list; it steers only the ephemeral delivery shape,
/// never the model input.
#[derive(Debug, Clone)]
pub struct ThreadFetch {
    pub messages: Vec<RawMessage>,
    pub single_message: bool,
}

impl ThreadFetch {
    #[must_use]
    pub fn new(messages: Vec<RawMessage>) -> Self {
        let single_message = messages.len() == 1;
        Self {
            messages,
            single_message,
        }
    }
}

/// Outcome of thread resolution. Transport failures travel separately as
/// `Err(BotError::Transport)`; this type only distinguishes the outcomes
/// the pipeline recovers from by matching.
#[derive(Debug)]
pub enum Resolution {
    Resolved(ThreadFetch),
    AccessDenied { channel: String },
}

/// The model's output, handed verbatim to the delivery dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryResult {
    pub text: String,
}
