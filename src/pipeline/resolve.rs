//! Thread resolution: one `conversations.replies` fetch, classified.

use crate::core::models::{Resolution, ThreadFetch};
use crate::errors::BotError;
use crate::slack::SlackGateway;

/// Fetch the anchor message and its replies and classify the outcome.
///
/// A membership failure becomes `Resolution::AccessDenied` so the caller
/// can recover with a DM notice; any other platform failure propagates as
/// `BotError::Transport`.
///
/// # Errors
///
/// Returns `BotError::Transport` for platform failures other than missing
/// channel membership.
pub async fn resolve_thread(
    gateway: &SlackGateway,
    channel_id: &str,
    message_ts: &str,
) -> Result<Resolution, BotError> {
    match gateway.fetch_replies(channel_id, message_ts).await {
        Ok(messages) => Ok(Resolution::Resolved(ThreadFetch::new(messages))),
        Err(BotError::ChannelAccess { channel }) => Ok(Resolution::AccessDenied { channel }),
        Err(other) => Err(other),
    }
}
