//! Message shortcut handling.
//!
//! Two shortcuts point at the same pipeline and differ only in where the
//! summary lands: `summarize` answers the requester privately,
//! `summarize_public` posts into the channel. The shortcut payload already
//! carries channel, message and user, so no reference parsing happens here.

use std::sync::Arc;

use slack_morphism::hyper_tokio::SlackHyperClient;
use slack_morphism::prelude::{
    SlackClientEventsUserState, SlackInteractionEvent, SlackInteractionMessageActionEvent,
    UserCallbackResult,
};
use tracing::{debug, info, warn};

use crate::core::models::{SummaryRequest, Visibility};
use crate::pipeline::run_request;

use super::app_state;

pub const SHORTCUT_SUMMARIZE: &str = "summarize";
pub const SHORTCUT_SUMMARIZE_PUBLIC: &str = "summarize_public";

/// Visibility fixed by the shortcut that fired, or `None` for callback ids
/// this bot does not own.
#[must_use]
pub fn shortcut_visibility(callback_id: &str) -> Option<Visibility> {
    match callback_id {
        SHORTCUT_SUMMARIZE => Some(Visibility::Ephemeral),
        SHORTCUT_SUMMARIZE_PUBLIC => Some(Visibility::Public),
        _ => None,
    }
}

/// Dispatch an interaction event. Everything that is not one of our message
/// shortcuts is acked as a no-op success.
pub async fn on_interaction_event(
    event: SlackInteractionEvent,
    _client: Arc<SlackHyperClient>,
    states: SlackClientEventsUserState,
) -> UserCallbackResult<()> {
    match event {
        SlackInteractionEvent::MessageAction(action) => {
            handle_message_shortcut(action, &states).await
        }
        _ => {
            debug!("ignoring unroutable interaction event");
            Ok(())
        }
    }
}

async fn handle_message_shortcut(
    action: SlackInteractionMessageActionEvent,
    states: &SlackClientEventsUserState,
) -> UserCallbackResult<()> {
    let Some(visibility) = shortcut_visibility(&action.callback_id.0) else {
        debug!(callback_id = %action.callback_id.0, "ignoring unknown shortcut");
        return Ok(());
    };

    let Some(channel) = action.channel else {
        warn!("message shortcut without channel context");
        return Ok(());
    };
    let Some(message) = action.message else {
        warn!("message shortcut without message context");
        return Ok(());
    };

    let state = app_state(states).await?;
    let request = SummaryRequest {
        channel_id: channel.id.0,
        message_ts: message.origin.ts.0,
        user_id: action.user.id.0,
        visibility,
    };

    info!(
        channel = %request.channel_id,
        visibility = %request.visibility,
        "summary requested via shortcut"
    );
    tokio::spawn(run_request(
        state.gateway.clone(),
        state.engine.clone(),
        request,
    ));

    Ok(())
}
