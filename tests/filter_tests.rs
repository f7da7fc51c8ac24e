use threadsum::core::models::{Author, RawMessage, SourceMessage};
use threadsum::pipeline::filter::{drop_own_messages, resolve_authors};

fn raw(user: Option<&str>, bot_id: Option<&str>, text: &str) -> RawMessage {
    RawMessage {
        user: user.map(ToString::to_string),
        bot_id: bot_id.map(ToString::to_string),
        text: text.to_string(),
    }
}

fn known(user: &str, text: &str) -> SourceMessage {
    SourceMessage {
        author: Author::Known(user.to_string()),
        text: text.to_string(),
    }
}

#[tokio::test]
async fn test_direct_user_wins_without_lookup() {
    let mut lookups = 0;
    let resolved = resolve_authors(&[raw(Some("U1"), None, "hello")], |_bot_id| {
        lookups += 1;
        async move { Some("UNEXPECTED".to_string()) }
    })
    .await;

    assert_eq!(resolved, vec![known("U1", "hello")]);
    assert_eq!(lookups, 0, "a message with a user field needs no bot lookup");
}

#[tokio::test]
async fn test_bot_message_resolves_to_underlying_identity() {
    let resolved = resolve_authors(&[raw(None, Some("B42"), "deploy done")], |bot_id| async move {
        assert_eq!(bot_id, "B42");
        Some("U42".to_string())
    })
    .await;

    assert_eq!(resolved, vec![known("U42", "deploy done")]);
}

#[tokio::test]
async fn test_failed_bot_lookup_marks_author_unresolved() {
    let resolved =
        resolve_authors(&[raw(None, Some("B42"), "deploy done")], |_bot_id| async move { None })
            .await;

    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].author, Author::Unresolved);
    assert_eq!(resolved[0].text, "deploy done", "text survives unresolved authorship");
}

#[tokio::test]
async fn test_missing_author_fields_never_fail() {
    // System-ish messages can lack both user and bot_id.
    let mut lookups = 0;
    let resolved = resolve_authors(&[raw(None, None, "channel purpose changed")], |_bot_id| {
        lookups += 1;
        async move { None }
    })
    .await;

    assert_eq!(resolved[0].author, Author::Unresolved);
    assert_eq!(lookups, 0, "no lookup expected for a message without bot_id");
}

#[tokio::test]
async fn test_bot_lookups_are_memoized_per_request() {
    let mut lookups = 0;
    let messages = [
        raw(None, Some("B42"), "one"),
        raw(None, Some("B42"), "two"),
        raw(None, Some("B42"), "three"),
    ];
    let resolved = resolve_authors(&messages, |_bot_id| {
        lookups += 1;
        async move { Some("U42".to_string()) }
    })
    .await;

    assert_eq!(lookups, 1);
    assert_eq!(resolved.len(), 3);
}

#[test]
fn test_drop_own_messages_keeps_order() {
    // Thread from U1, U2 and the bot itself: only the bot's entries go.
    let messages = vec![
        known("U1", "first"),
        known("B1", "earlier summary"),
        known("U2", "second"),
        known("B1", "another summary"),
    ];

    let retained = drop_own_messages(messages, "B1");

    assert_eq!(retained, vec![known("U1", "first"), known("U2", "second")]);
}

#[test]
fn test_drop_own_messages_keeps_unresolved() {
    let messages = vec![
        SourceMessage {
            author: Author::Unresolved,
            text: "from an unknown app".to_string(),
        },
        known("B1", "own message"),
    ];

    let retained = drop_own_messages(messages, "B1");

    assert_eq!(retained.len(), 1);
    assert_eq!(retained[0].author, Author::Unresolved);
}

#[test]
fn test_sole_own_message_filters_to_empty() {
    let retained = drop_own_messages(vec![known("B1", "summary")], "B1");
    assert!(retained.is_empty());
}
