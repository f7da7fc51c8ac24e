//! Author resolution and the bot's own-message filter.
//!
//! Resolution order per message: a direct `user` field wins; an app
//! message's `bot_id` is looked up once per request; anything left is
//! `Unresolved` and stays in the input without mention syntax. Messages
//! the bot itself wrote are dropped so it never summarizes its own
//! summaries.

use std::collections::HashMap;
use std::future::Future;

use crate::core::models::{Author, RawMessage, SourceMessage};

/// Resolve each raw message's author, memoizing `bot_id` lookups for the
/// duration of the request. `lookup` maps a bot id to its underlying user
/// identity and returns `None` when that fails.
pub async fn resolve_authors<F, Fut>(raw: &[RawMessage], mut lookup: F) -> Vec<SourceMessage>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Option<String>>,
{
    let mut bot_cache: HashMap<String, Option<String>> = HashMap::new();
    let mut resolved = Vec::with_capacity(raw.len());

    for msg in raw {
        let author = if let Some(user) = &msg.user {
            Author::Known(user.clone())
        } else if let Some(bot_id) = &msg.bot_id {
            let cached = match bot_cache.get(bot_id) {
                Some(identity) => identity.clone(),
                None => {
                    let identity = lookup(bot_id.clone()).await;
                    bot_cache.insert(bot_id.clone(), identity.clone());
                    identity
                }
            };
            match cached {
                Some(user_id) => Author::Known(user_id),
                None => Author::Unresolved,
            }
        } else {
            Author::Unresolved
        };

        resolved.push(SourceMessage {
            author,
            text: msg.text.clone(),
        });
    }

    resolved
}

/// Drop exactly the messages whose resolved author is the bot itself,
/// preserving the order of everything else.
#[must_use]
pub fn drop_own_messages(messages: Vec<SourceMessage>, own_identity: &str) -> Vec<SourceMessage> {
    messages
        .into_iter()
        .filter(|msg| !matches!(&msg.author, Author::Known(id) if id == own_identity))
        .collect()
}
