//! Slack Web API gateway.
//!
//! One long-lived client per process, injected into the pipeline. Typed
//! slack-morphism requests are used where the crate models the call; the
//! remaining endpoints go through a shared `reqwest` client speaking the
//! Web API's JSON shapes directly.

use std::time::Duration;

use reqwest::Client;
use serde_json::{Value, json};
use slack_morphism::hyper_tokio::{SlackClientHyperConnector, SlackHyperClient};
use slack_morphism::prelude::{
    SlackApiChatPostEphemeralRequest, SlackApiChatPostMessageRequest,
    SlackApiConversationsOpenRequest,
};
use slack_morphism::{
    SlackApiToken, SlackApiTokenValue, SlackChannelId, SlackMessageContent, SlackTs, SlackUserId,
};
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tokio_retry::RetryIf;
use tracing::warn;

use crate::core::models::RawMessage;
use crate::errors::BotError;

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);
const REPLIES_LIMIT: u16 = 200;

/// Slack error code for a channel the bot is not a member of.
const ERROR_NOT_IN_CHANNEL: &str = "not_in_channel";

/// Build the JSON payload for `conversations.replies`.
#[must_use]
fn build_replies_payload(channel: &str, ts: &str) -> Value {
    json!({
        "channel": channel,
        "ts": ts,
        "limit": REPLIES_LIMIT,
    })
}

/// Build the JSON payload for `chat.getPermalink`.
#[must_use]
fn build_permalink_payload(channel: &str, message_ts: &str) -> Value {
    json!({
        "channel": channel,
        "message_ts": message_ts,
    })
}

/// Map a `conversations.replies` error code onto the bot's taxonomy.
/// Membership failures get their own class so the pipeline can recover
/// with a DM notice instead of the generic failure path.
fn classify_replies_error(code: &str, channel: &str) -> BotError {
    if code == ERROR_NOT_IN_CHANNEL {
        BotError::ChannelAccess {
            channel: channel.to_string(),
        }
    } else {
        BotError::Transport(format!("conversations.replies error: {code}"))
    }
}

pub struct SlackGateway {
    client: SlackHyperClient,
    token: SlackApiToken,
    http: Client,
}

impl SlackGateway {
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP connector cannot be built.
    pub fn new(bot_token: String) -> Result<Self, BotError> {
        let connector = SlackClientHyperConnector::new()
            .map_err(|e| BotError::Transport(format!("failed to create Slack connector: {e}")))?;
        let http = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Ok(Self {
            client: SlackHyperClient::new(connector),
            token: SlackApiToken::new(SlackApiTokenValue::new(bot_token)),
            http,
        })
    }

    fn bearer(&self) -> &str {
        &self.token.token_value.0
    }

    /// Retry transient transport failures with backoff and jitter. Reads
    /// only; deliveries are issued exactly once.
    async fn with_retry<F, Fut, T>(&self, operation: F) -> Result<T, BotError>
    where
        F: FnMut() -> Fut + Send,
        Fut: std::future::Future<Output = Result<T, BotError>> + Send,
        T: Send,
    {
        let strategy = ExponentialBackoff::from_millis(100).map(jitter).take(5);

        RetryIf::spawn(strategy, operation, BotError::is_retryable).await
    }

    /// The bot's own user identity, via `auth.test`.
    ///
    /// # Errors
    ///
    /// Returns `BotError::Transport` if the API call fails.
    pub async fn auth_identity(&self) -> Result<String, BotError> {
        self.with_retry(|| async {
            let session = self.client.open_session(&self.token);
            let resp = session.auth_test().await?;
            Ok(resp.user_id.0)
        })
        .await
    }

    /// Fetch the anchor message plus any replies for a timestamp, oldest
    /// first as Slack returns them.
    ///
    /// # Errors
    ///
    /// `BotError::ChannelAccess` when the bot is not a member of the
    /// channel; `BotError::Transport` for any other failure.
    pub async fn fetch_replies(
        &self,
        channel: &str,
        ts: &str,
    ) -> Result<Vec<RawMessage>, BotError> {
        let payload = build_replies_payload(channel, ts);

        self.with_retry(|| async {
            let body = self
                .post_json("https://slack.com/api/conversations.replies", &payload)
                .await?;

            if !body.get("ok").and_then(Value::as_bool).unwrap_or(false) {
                let code = body
                    .get("error")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown");
                return Err(classify_replies_error(code, channel));
            }

            let messages = body
                .get("messages")
                .cloned()
                .ok_or_else(|| {
                    BotError::Transport("conversations.replies: no messages in response".to_string())
                })?;

            serde_json::from_value(messages).map_err(|e| {
                BotError::Transport(format!("conversations.replies parse error: {e}"))
            })
        })
        .await
    }

    /// Resolve an app message's `bot_id` to its underlying user identity.
    ///
    /// Lookup failures are soft: the caller marks the author unresolved,
    /// so this logs and returns `None` instead of failing the request.
    pub async fn bot_identity(&self, bot_id: &str) -> Option<String> {
        let result = self
            .http
            .get("https://slack.com/api/bots.info")
            .bearer_auth(self.bearer())
            .query(&[("bot", bot_id)])
            .send()
            .await;

        let body: Value = match result {
            Ok(resp) => match resp.json().await {
                Ok(body) => body,
                Err(e) => {
                    warn!("bots.info parse error for {}: {}", bot_id, e);
                    return None;
                }
            },
            Err(e) => {
                warn!("bots.info request failed for {}: {}", bot_id, e);
                return None;
            }
        };

        if !body.get("ok").and_then(Value::as_bool).unwrap_or(false) {
            warn!(
                "bots.info error for {}: {}",
                bot_id,
                body.get("error").and_then(|v| v.as_str()).unwrap_or("unknown")
            );
            return None;
        }

        body.get("bot")
            .and_then(|b| b.get("user_id"))
            .and_then(Value::as_str)
            .map(ToString::to_string)
    }

    /// Resolve a shareable permalink for a message.
    ///
    /// # Errors
    ///
    /// Returns `BotError::Transport` if the request fails or Slack reports
    /// an error; issued exactly once per public delivery.
    pub async fn permalink(&self, channel: &str, message_ts: &str) -> Result<String, BotError> {
        let payload = build_permalink_payload(channel, message_ts);
        let body = self
            .post_json("https://slack.com/api/chat.getPermalink", &payload)
            .await?;

        if !body.get("ok").and_then(Value::as_bool).unwrap_or(false) {
            return Err(BotError::Transport(format!(
                "chat.getPermalink error: {}",
                body.get("error").and_then(Value::as_str).unwrap_or("unknown")
            )));
        }

        body.get("permalink")
            .and_then(Value::as_str)
            .map(ToString::to_string)
            .ok_or_else(|| BotError::Transport("chat.getPermalink: no permalink in response".to_string()))
    }

    /// Post a channel-visible message, optionally into a thread.
    ///
    /// # Errors
    ///
    /// Returns `BotError::Transport` if the API call fails. Not retried.
    pub async fn post_message(
        &self,
        channel: &str,
        text: &str,
        thread_ts: Option<&str>,
    ) -> Result<(), BotError> {
        let session = self.client.open_session(&self.token);
        let req = SlackApiChatPostMessageRequest::new(
            SlackChannelId(channel.to_string()),
            SlackMessageContent::new().with_text(text.to_string()),
        )
        .opt_thread_ts(thread_ts.map(|ts| SlackTs(ts.to_string())));

        session.chat_post_message(&req).await?;
        Ok(())
    }

    /// Post a message visible only to `user`, optionally bound to a thread.
    ///
    /// # Errors
    ///
    /// Returns `BotError::Transport` if the API call fails. Not retried.
    pub async fn post_ephemeral(
        &self,
        channel: &str,
        user: &str,
        text: &str,
        thread_ts: Option<&str>,
    ) -> Result<(), BotError> {
        let session = self.client.open_session(&self.token);
        let req = SlackApiChatPostEphemeralRequest::new(
            SlackChannelId(channel.to_string()),
            SlackUserId(user.to_string()),
            SlackMessageContent::new().with_text(text.to_string()),
        )
        .opt_thread_ts(thread_ts.map(|ts| SlackTs(ts.to_string())));

        session.chat_post_ephemeral(&req).await?;
        Ok(())
    }

    /// Open (or look up) the direct-message channel with a user.
    ///
    /// # Errors
    ///
    /// Returns `BotError::Transport` if the API call fails.
    pub async fn open_dm(&self, user: &str) -> Result<String, BotError> {
        let session = self.client.open_session(&self.token);
        let req = SlackApiConversationsOpenRequest::new()
            .with_users(vec![SlackUserId(user.to_string())]);

        let resp = session.conversations_open(&req).await?;
        Ok(resp.channel.id.0)
    }

    /// IDs of the channels the bot is a member of.
    ///
    /// # Errors
    ///
    /// Returns `BotError::Transport` if the API call fails.
    pub async fn member_channels(&self) -> Result<Vec<String>, BotError> {
        self.with_retry(|| async {
            let resp = self
                .http
                .get("https://slack.com/api/conversations.list")
                .bearer_auth(self.bearer())
                .query(&[
                    ("types", "public_channel,private_channel"),
                    ("exclude_archived", "true"),
                    ("limit", "1000"),
                ])
                .send()
                .await
                .map_err(|e| BotError::Transport(format!("conversations.list: {e}")))?;

            if !resp.status().is_success() {
                return Err(BotError::Transport(format!(
                    "conversations.list HTTP {}",
                    resp.status()
                )));
            }

            let body: Value = resp
                .json()
                .await
                .map_err(|e| BotError::Transport(format!("conversations.list parse: {e}")))?;

            if !body.get("ok").and_then(Value::as_bool).unwrap_or(false) {
                return Err(BotError::Transport(format!(
                    "conversations.list error: {}",
                    body.get("error").and_then(Value::as_str).unwrap_or("unknown")
                )));
            }

            let channels = body
                .get("channels")
                .and_then(Value::as_array)
                .map(|channels| {
                    channels
                        .iter()
                        .filter(|c| {
                            c.get("is_member").and_then(Value::as_bool).unwrap_or(false)
                        })
                        .filter_map(|c| c.get("id").and_then(Value::as_str))
                        .map(ToString::to_string)
                        .collect()
                })
                .unwrap_or_default();

            Ok(channels)
        })
        .await
    }

    /// POST a JSON payload to a Web API endpoint and return the parsed body.
    async fn post_json(&self, url: &str, payload: &Value) -> Result<Value, BotError> {
        let resp = self
            .http
            .post(url)
            .bearer_auth(self.bearer())
            .json(payload)
            .send()
            .await
            .map_err(|e| BotError::Transport(format!("{url}: {e}")))?;

        if !resp.status().is_success() {
            return Err(BotError::Transport(format!("{url} HTTP {}", resp.status())));
        }

        resp.json()
            .await
            .map_err(|e| BotError::Transport(format!("{url} parse error: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replies_payload_shape() {
        let payload = build_replies_payload("C123", "1700000000.000100");

        assert_eq!(payload["channel"], "C123");
        assert_eq!(payload["ts"], "1700000000.000100");
        assert_eq!(payload["limit"], 200);
    }

    #[test]
    fn permalink_payload_shape() {
        let payload = build_permalink_payload("C123", "1700000000.000100");

        assert_eq!(payload["channel"], "C123");
        assert_eq!(payload["message_ts"], "1700000000.000100");
        assert!(payload.get("limit").is_none());
    }

    #[test]
    fn membership_error_is_access_denied() {
        let err = classify_replies_error("not_in_channel", "C999");
        match err {
            BotError::ChannelAccess { channel } => assert_eq!(channel, "C999"),
            other => panic!("expected ChannelAccess, got: {other:?}"),
        }
    }

    #[test]
    fn other_errors_are_transport() {
        for code in ["channel_not_found", "ratelimited", "fatal_error"] {
            let err = classify_replies_error(code, "C999");
            match err {
                BotError::Transport(msg) => assert!(msg.contains(code)),
                other => panic!("expected Transport for {code}, got: {other:?}"),
            }
        }
    }
}
