use std::error::Error;

use threadsum::errors::BotError;

#[test]
fn test_bot_error_implements_error_trait() {
    fn assert_error<T: Error>(_: &T) {}

    let error = BotError::InvalidReference("junk".to_string());
    assert_error(&error);
}

#[test]
fn test_bot_error_display() {
    let error = BotError::Transport("timeout".to_string());
    assert_eq!(format!("{error}"), "Slack API failure: timeout");

    let error = BotError::ChannelAccess {
        channel: "C999".to_string(),
    };
    assert_eq!(format!("{error}"), "no access to channel C999");

    let error = BotError::Summarization("model unavailable".to_string());
    assert_eq!(format!("{error}"), "chat model failure: model unavailable");

    let error = BotError::Delivery("post failed".to_string());
    assert_eq!(format!("{error}"), "failed to deliver summary: post failed");
}

#[test]
fn test_only_transport_errors_are_retryable() {
    assert!(BotError::Transport("x".to_string()).is_retryable());

    let non_retryable = [
        BotError::InvalidReference("x".to_string()),
        BotError::ChannelAccess {
            channel: "C1".to_string(),
        },
        BotError::Delivery("x".to_string()),
        BotError::Summarization("x".to_string()),
        BotError::Configuration("x".to_string()),
    ];
    for error in non_retryable {
        assert!(!error.is_retryable(), "must not retry: {error}");
    }
}

#[test]
fn test_yaml_errors_become_configuration_errors() {
    let yaml_err = serde_yaml::from_str::<serde_yaml::Value>("{ unclosed").unwrap_err();
    let error: BotError = yaml_err.into();
    assert!(matches!(error, BotError::Configuration(_)));
}

#[test]
fn test_transport_conversions_exist() {
    // Compile-time checks that platform errors convert into the taxonomy.
    #[allow(unused)]
    fn _reqwest(err: reqwest::Error) -> BotError {
        BotError::from(err)
    }

    #[allow(unused)]
    fn _slack(err: slack_morphism::errors::SlackClientError) -> BotError {
        BotError::from(err)
    }

    #[allow(unused)]
    fn _openai(err: openai_api_rs::v1::error::APIError) -> BotError {
        BotError::from(err)
    }
}
