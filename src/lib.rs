//! threadsum - a Slack bot that summarizes a message or thread on request.
//!
//! A user points the bot at a message (via the `/threadsum` slash command
//! with a permalink, or a message shortcut), the bot fetches the thread over
//! the Slack Web API, asks a chat model for a summary, and posts the result
//! either publicly into the thread or ephemerally to the requester.
//!
//! The crate is wired as:
//! - `handlers` - Socket Mode command/shortcut dispatch
//! - `pipeline` - resolve -> filter -> summarize -> deliver, one task per request
//! - `slack` - permalink parsing and the Web API gateway
//! - `llm` - the pluggable chat-model backends (Ollama or an OpenAI-style API)
//! - `core` - configuration, request/message models, the feature manifest

pub mod core;
pub mod errors;
pub mod handlers;
pub mod llm;
pub mod pipeline;
pub mod slack;

/// Configure structured logging for the bot process.
///
/// Uses an `EnvFilter` so verbosity can be tuned with `RUST_LOG`
/// (defaults to `info`). Called once from `main` before anything else.
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}
