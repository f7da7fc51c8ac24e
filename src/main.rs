use std::sync::Arc;

use slack_morphism::hyper_tokio::{SlackClientHyperConnector, SlackHyperClient};
use slack_morphism::prelude::{
    SlackClientEventsListenerEnvironment, SlackClientSocketModeConfig,
    SlackClientSocketModeListener, SlackSocketModeListenerCallbacks,
};
use slack_morphism::{SlackApiToken, SlackApiTokenValue};
use tracing::{error, info};

use threadsum::core::config::AppConfig;
use threadsum::core::manifest::FeatureManifest;
use threadsum::handlers::{self, AppState};
use threadsum::pipeline::summarize::SummaryEngine;
use threadsum::slack::SlackGateway;

#[tokio::main]
async fn main() {
    threadsum::setup_logging();

    // Configuration problems are fatal before any request is served.
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("configuration error: {err}");
            std::process::exit(1);
        }
    };

    let engine = match SummaryEngine::new(&config.provider) {
        Ok(engine) => Arc::new(engine),
        Err(err) => {
            error!("configuration error: {err}");
            std::process::exit(1);
        }
    };

    let gateway = match SlackGateway::new(config.slack_bot_token.clone()) {
        Ok(gateway) => Arc::new(gateway),
        Err(err) => {
            error!("failed to initialize Slack client: {err}");
            std::process::exit(1);
        }
    };

    let manifest = match FeatureManifest::embedded() {
        Ok(manifest) => manifest,
        Err(err) => {
            error!("configuration error: {err}");
            std::process::exit(1);
        }
    };

    info!(provider = config.provider.label(), "starting threadsum");

    let state = Arc::new(AppState {
        gateway,
        engine,
        manifest,
    });

    // The socket mode listener owns its own client for the persistent
    // WebSocket connection; the gateway keeps a separate one for REST calls.
    let listener_client = match SlackClientHyperConnector::new() {
        Ok(connector) => Arc::new(SlackHyperClient::new(connector)),
        Err(err) => {
            error!("failed to create socket mode connector: {err}");
            std::process::exit(1);
        }
    };

    let listener_environment = Arc::new(
        SlackClientEventsListenerEnvironment::new(listener_client)
            .with_error_handler(handlers::on_socket_error)
            .with_user_state(state),
    );

    let callbacks = SlackSocketModeListenerCallbacks::new()
        .with_command_events(handlers::commands::on_command_event)
        .with_interaction_events(handlers::shortcuts::on_interaction_event);

    let listener = SlackClientSocketModeListener::new(
        &SlackClientSocketModeConfig::new(),
        listener_environment,
        callbacks,
    );

    let app_token = SlackApiToken::new(SlackApiTokenValue::new(config.slack_app_token.clone()));
    if let Err(err) = listener.listen_for(&app_token).await {
        error!("failed to start socket mode listener: {err}");
        std::process::exit(1);
    }

    info!("connected to Slack, serving requests");

    tokio::select! {
        _ = listener.serve() => {
            info!("socket mode listener stopped");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("shutting down");
            listener.shutdown().await;
        }
    }
}
