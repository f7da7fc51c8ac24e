//! Slash command handling.

use std::sync::Arc;

use slack_morphism::hyper_tokio::SlackHyperClient;
use slack_morphism::prelude::{
    SlackClientEventsUserState, SlackCommandEvent, SlackCommandEventResponse,
    SlackMessageResponseType, UserCallbackResult,
};
use slack_morphism::SlackMessageContent;
use tracing::{debug, info, warn};

use crate::core::models::SummaryRequest;
use crate::pipeline::run_request;
use crate::slack::parser::parse_summary_command;

use super::app_state;

pub const SUMMARIZE_COMMAND: &str = "/threadsum";
pub const CHANNELS_COMMAND: &str = "/threadsum-channels";
pub const HELP_COMMAND: &str = "/threadsum-help";

/// Usage hint returned for a command text without a valid permalink.
pub const USAGE_TEXT: &str = "Invalid permalink. Usage: `/threadsum <permalink> \
[public|ephemeral]`. Without a visibility argument the summary is only shown to you.";

fn ephemeral_response(text: impl Into<String>) -> SlackCommandEventResponse {
    SlackCommandEventResponse {
        content: SlackMessageContent::new().with_text(text.into()),
        response_type: Some(SlackMessageResponseType::Ephemeral),
    }
}

/// Empty ack; the pipeline answers through the Web API.
fn silent_ack() -> SlackCommandEventResponse {
    SlackCommandEventResponse {
        content: SlackMessageContent::new(),
        response_type: Some(SlackMessageResponseType::Ephemeral),
    }
}

/// Dispatch a slash command. Unknown commands are acked as no-op successes
/// so the framework does not log them as failures.
pub async fn on_command_event(
    event: SlackCommandEvent,
    _client: Arc<SlackHyperClient>,
    states: SlackClientEventsUserState,
) -> UserCallbackResult<SlackCommandEventResponse> {
    let state = app_state(&states).await?;

    match event.command.0.as_str() {
        SUMMARIZE_COMMAND => Ok(handle_summarize(&state, &event)),
        CHANNELS_COMMAND => Ok(handle_channels(&state).await),
        HELP_COMMAND => Ok(ephemeral_response(state.manifest.render_help())),
        other => {
            debug!(command = %other, "ignoring unroutable command");
            Ok(silent_ack())
        }
    }
}

fn handle_summarize(state: &Arc<super::AppState>, event: &SlackCommandEvent) -> SlackCommandEventResponse {
    let text = event.text.clone().unwrap_or_default();

    match parse_summary_command(&text) {
        Ok(reference) => {
            info!(
                channel = %reference.channel_id,
                visibility = %reference.visibility,
                "summary requested via slash command"
            );
            let request = SummaryRequest {
                channel_id: reference.channel_id,
                message_ts: reference.message_ts,
                user_id: event.user_id.0.clone(),
                visibility: reference.visibility,
            };
            tokio::spawn(run_request(
                state.gateway.clone(),
                state.engine.clone(),
                request,
            ));
            silent_ack()
        }
        Err(err) => {
            debug!(error = %err, "rejecting malformed summary command");
            ephemeral_response(USAGE_TEXT)
        }
    }
}

async fn handle_channels(state: &Arc<super::AppState>) -> SlackCommandEventResponse {
    match state.gateway.member_channels().await {
        Ok(channels) if channels.is_empty() => ephemeral_response(
            "I'm not in any channels yet. Invite me to a channel and I can summarize it.",
        ),
        Ok(channels) => {
            let lines: Vec<String> = channels.iter().map(|id| format!("• <#{id}>")).collect();
            ephemeral_response(format!("I can summarize messages in:\n{}", lines.join("\n")))
        }
        Err(err) => {
            warn!(error = %err, "failed to list channels");
            ephemeral_response("I couldn't fetch the channel list. Please try again.")
        }
    }
}
