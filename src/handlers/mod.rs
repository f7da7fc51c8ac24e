//! Socket Mode event dispatch.
//!
//! Thin binding between slack-morphism's listener callbacks and the
//! pipeline. Handlers pull the shared [`AppState`] out of the listener's
//! user state, ack fast, and spawn pipeline work.

pub mod commands;
pub mod shortcuts;

use std::sync::Arc;

use slack_morphism::hyper_tokio::SlackHyperClient;
use slack_morphism::prelude::{HttpStatusCode, SlackClientEventsUserState};
use tracing::warn;

use crate::core::manifest::FeatureManifest;
use crate::pipeline::summarize::SummaryEngine;
use crate::slack::SlackGateway;

/// Everything a handler needs, constructed once in `main` and injected
/// through the listener's user state. Read-only after start-up.
pub struct AppState {
    pub gateway: Arc<SlackGateway>,
    pub engine: Arc<SummaryEngine>,
    pub manifest: FeatureManifest,
}

/// Fetch the shared state from the listener's user-state storage.
pub(crate) async fn app_state(
    states: &SlackClientEventsUserState,
) -> Result<Arc<AppState>, Box<dyn std::error::Error + Send + Sync>> {
    let guard = states.read().await;
    guard
        .get_user_state::<Arc<AppState>>()
        .cloned()
        .ok_or_else(|| "application state missing from listener".into())
}

/// Listener-level error handler. Framework errors are logged and answered
/// with 200 so Slack does not retry the event against a broken handler.
pub fn on_socket_error(
    err: Box<dyn std::error::Error + Send + Sync>,
    _client: Arc<SlackHyperClient>,
    _states: SlackClientEventsUserState,
) -> HttpStatusCode {
    warn!(error = %err, "socket mode error");
    HttpStatusCode::OK
}
