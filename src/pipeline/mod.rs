//! The summarization pipeline: resolve -> filter -> summarize -> deliver.
//!
//! One invocation per inbound request, stages strictly sequential. The
//! only state shared with other requests is the injected gateway and
//! engine, both read-only after start-up.

pub mod deliver;
pub mod filter;
pub mod resolve;
pub mod summarize;

use std::sync::Arc;

use tracing::{error, info, warn};
use uuid::Uuid;

use crate::core::models::{Resolution, SummaryRequest};
use crate::errors::BotError;
use crate::slack::SlackGateway;

use deliver::deliver;
use filter::{drop_own_messages, resolve_authors};
use resolve::resolve_thread;
use summarize::SummaryEngine;

/// Private notice sent to a requester when the target channel is closed to
/// the bot.
#[must_use]
pub fn access_denied_notice(channel: &str) -> String {
    format!(
        "I can't read <#{channel}> because I'm not a member of it. \
         Invite me to the channel and try again."
    )
}

const FAILURE_NOTICE: &str =
    "Something went wrong while preparing your summary. Please try again in a moment.";

/// Run the full pipeline for one request. Entry point for the spawned
/// per-event task: never returns an error, every failure is handled here.
pub async fn run_request(
    gateway: Arc<SlackGateway>,
    engine: Arc<SummaryEngine>,
    request: SummaryRequest,
) {
    let correlation_id = Uuid::new_v4();

    match process(&gateway, &engine, &request).await {
        Ok(()) => info!(
            %correlation_id,
            channel = %request.channel_id,
            visibility = %request.visibility,
            "summary request completed"
        ),
        Err(err) => {
            error!(
                %correlation_id,
                channel = %request.channel_id,
                error = %err,
                "summary request failed"
            );
            notify_failure(&gateway, &request.user_id).await;
        }
    }
}

async fn process(
    gateway: &SlackGateway,
    engine: &SummaryEngine,
    request: &SummaryRequest,
) -> Result<(), BotError> {
    let fetch = match resolve_thread(gateway, &request.channel_id, &request.message_ts).await? {
        Resolution::Resolved(fetch) => fetch,
        Resolution::AccessDenied { channel } => {
            send_access_notice(gateway, &request.user_id, &channel).await;
            return Ok(());
        }
    };

    let own_identity = gateway.auth_identity().await?;
    let resolved = resolve_authors(&fetch.messages, |bot_id| async move {
        gateway.bot_identity(&bot_id).await
    })
    .await;
    let retained = drop_own_messages(resolved, &own_identity);

    let summary = engine.summarize(&retained).await?;

    deliver(gateway, request, fetch.single_message, &summary).await
}

/// Channel-access recovery: a DM naming the channel, then the request ends.
/// A failing notice is logged and swallowed.
async fn send_access_notice(gateway: &SlackGateway, user_id: &str, channel: &str) {
    let notice = access_denied_notice(channel);
    if let Err(err) = send_dm(gateway, user_id, &notice).await {
        warn!(user = %user_id, error = %err, "failed to deliver channel-access notice");
    }
}

/// Generic failure path: one best-effort private notice. Never propagates.
async fn notify_failure(gateway: &SlackGateway, user_id: &str) {
    if let Err(err) = send_dm(gateway, user_id, FAILURE_NOTICE).await {
        warn!(user = %user_id, error = %err, "failed to deliver failure notice");
    }
}

async fn send_dm(gateway: &SlackGateway, user_id: &str, text: &str) -> Result<(), BotError> {
    let dm_channel = gateway.open_dm(user_id).await?;
    gateway.post_message(&dm_channel, text, None).await
}
