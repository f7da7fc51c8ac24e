use threadsum::pipeline::access_denied_notice;
use threadsum::pipeline::deliver::{ephemeral_thread_binding, format_public_summary};

#[test]
fn test_single_message_ephemeral_has_no_thread_binding() {
    assert_eq!(ephemeral_thread_binding(true, "1700000000.000100"), None);
}

#[test]
fn test_threaded_ephemeral_binds_to_anchor() {
    assert_eq!(
        ephemeral_thread_binding(false, "1700000000.000100"),
        Some("1700000000.000100".to_string())
    );
}

#[test]
fn test_public_summary_names_requester_and_links_permalink() {
    let permalink = "https://acme.slack.com/archives/C123/p1700000000000100";
    let formatted = format_public_summary("U12345", permalink, "Decided to ship on Friday.");

    assert!(
        formatted.contains("<@U12345>"),
        "public post must name the requester"
    );
    assert!(
        formatted.contains(permalink),
        "public post must link the source message"
    );
    assert!(formatted.contains("Decided to ship on Friday."));
}

#[test]
fn test_public_summary_puts_attribution_before_body() {
    let formatted = format_public_summary("U1", "https://example.com/p1", "the summary");

    let mention_at = formatted.find("<@U1>").unwrap();
    let body_at = formatted.find("the summary").unwrap();
    assert!(mention_at < body_at);
}

#[test]
fn test_access_notice_names_the_channel() {
    let notice = access_denied_notice("C999");
    assert!(
        notice.contains("C999"),
        "the requester must learn which channel is closed to the bot"
    );
}
