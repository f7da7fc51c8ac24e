use threadsum::core::models::{RawMessage, ThreadFetch, Visibility};
use threadsum::handlers::shortcuts::{
    SHORTCUT_SUMMARIZE, SHORTCUT_SUMMARIZE_PUBLIC, shortcut_visibility,
};

fn raw(text: &str) -> RawMessage {
    RawMessage {
        user: Some("U1".to_string()),
        bot_id: None,
        text: text.to_string(),
    }
}

#[test]
fn test_visibility_parses_both_tokens() {
    assert_eq!("public".parse::<Visibility>(), Ok(Visibility::Public));
    assert_eq!("ephemeral".parse::<Visibility>(), Ok(Visibility::Ephemeral));
    assert_eq!("loud".parse::<Visibility>(), Err(()));
}

#[test]
fn test_visibility_defaults_to_ephemeral() {
    assert_eq!(Visibility::default(), Visibility::Ephemeral);
}

#[test]
fn test_single_message_classification() {
    // Classification happens on the raw reply list, before any filtering.
    let single = ThreadFetch::new(vec![raw("alone")]);
    assert!(single.single_message);

    let thread = ThreadFetch::new(vec![raw("anchor"), raw("reply")]);
    assert!(!thread.single_message);
}

#[test]
fn test_raw_message_deserializes_from_replies_payload() {
    let json = r#"{"type":"message","user":"U1","text":"hi","ts":"1700000000.000100"}"#;
    let msg: RawMessage = serde_json::from_str(json).unwrap();
    assert_eq!(msg.user.as_deref(), Some("U1"));
    assert_eq!(msg.text, "hi");

    let json = r#"{"type":"message","bot_id":"B7","ts":"1700000000.000200"}"#;
    let msg: RawMessage = serde_json::from_str(json).unwrap();
    assert_eq!(msg.bot_id.as_deref(), Some("B7"));
    assert_eq!(msg.text, "", "a missing text field must not fail parsing");
}

#[test]
fn test_shortcut_callback_ids_fix_visibility() {
    assert_eq!(
        shortcut_visibility(SHORTCUT_SUMMARIZE),
        Some(Visibility::Ephemeral)
    );
    assert_eq!(
        shortcut_visibility(SHORTCUT_SUMMARIZE_PUBLIC),
        Some(Visibility::Public)
    );
    assert_eq!(shortcut_visibility("someone_elses_shortcut"), None);
}
