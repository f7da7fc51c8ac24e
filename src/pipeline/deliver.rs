//! Delivery of a finished summary.
//!
//! Public summaries go into the thread for everyone, prefixed with the
//! requester and a permalink. Ephemeral summaries go only to the requester;
//! they are bound to the thread only when there actually is one, because
//! Slack does not surface ephemeral replies inside a thread without
//! visible activity.

use crate::core::models::{SummaryRequest, SummaryResult, Visibility};
use crate::errors::BotError;
use crate::slack::SlackGateway;

/// Channel-visible text for a public delivery: requester and permalink
/// first, then the summary body.
#[must_use]
pub fn format_public_summary(user_id: &str, permalink: &str, summary: &str) -> String {
    format!("<@{user_id}> asked for a summary of <{permalink}|this message>:\n\n{summary}")
}

/// Thread binding for an ephemeral delivery: none for a lone message, the
/// anchor timestamp for a thread.
#[must_use]
pub fn ephemeral_thread_binding(single_message: bool, anchor_ts: &str) -> Option<String> {
    if single_message {
        None
    } else {
        Some(anchor_ts.to_string())
    }
}

/// Post the summary according to the request's visibility.
///
/// # Errors
///
/// Any platform failure is reported as `BotError::Delivery`; nothing is
/// retried.
pub async fn deliver(
    gateway: &SlackGateway,
    request: &SummaryRequest,
    single_message: bool,
    summary: &SummaryResult,
) -> Result<(), BotError> {
    match request.visibility {
        Visibility::Public => {
            let permalink = gateway
                .permalink(&request.channel_id, &request.message_ts)
                .await
                .map_err(as_delivery)?;
            let text = format_public_summary(&request.user_id, &permalink, &summary.text);
            gateway
                .post_message(&request.channel_id, &text, Some(&request.message_ts))
                .await
                .map_err(as_delivery)
        }
        Visibility::Ephemeral => {
            let thread_ts = ephemeral_thread_binding(single_message, &request.message_ts);
            gateway
                .post_ephemeral(
                    &request.channel_id,
                    &request.user_id,
                    &summary.text,
                    thread_ts.as_deref(),
                )
                .await
                .map_err(as_delivery)
        }
    }
}

fn as_delivery(err: BotError) -> BotError {
    BotError::Delivery(err.to_string())
}
