//! Parsing of the `/threadsum` command text.
//!
//! The command carries a Slack permalink fragment plus an optional
//! visibility token, e.g.
//! `https://acme.slack.com/archives/C0123/p1700000000000100 public`.
//! The `p<digits>` run encodes the message timestamp with the dot removed:
//! the first ten digits are seconds, the rest microseconds.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::models::Visibility;
use crate::errors::BotError;

static PERMALINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/archives/(\w+)/p(\d+)(?:\s*)(public|ephemeral)?")
        .expect("permalink pattern is valid")
});

/// A permalink reference extracted from command text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReference {
    pub channel_id: String,
    /// Platform timestamp, `seconds.microseconds`.
    pub message_ts: String,
    pub visibility: Visibility,
}

/// Extract channel, timestamp and visibility from the command text.
///
/// # Errors
///
/// Returns `BotError::InvalidReference` when the text does not contain a
/// permalink fragment; the caller answers with a usage hint instead of
/// entering the pipeline.
pub fn parse_summary_command(text: &str) -> Result<ParsedReference, BotError> {
    let caps = PERMALINK_RE
        .captures(text)
        .ok_or_else(|| BotError::InvalidReference(text.to_string()))?;

    let channel_id = caps[1].to_string();
    let message_ts = permalink_digits_to_ts(&caps[2]);
    let visibility = caps
        .get(3)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or_default();

    Ok(ParsedReference {
        channel_id,
        message_ts,
        visibility,
    })
}

/// `p1700000000000100` -> `1700000000.000100`: seconds are the first ten
/// digits, everything after is the fractional part.
fn permalink_digits_to_ts(digits: &str) -> String {
    let (seconds, fraction) = digits.split_at(digits.len().min(10));
    format!("{seconds}.{fraction}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_digits_at_ten() {
        assert_eq!(permalink_digits_to_ts("1700000000000100"), "1700000000.000100");
    }

    #[test]
    fn short_digit_run_keeps_empty_fraction() {
        assert_eq!(permalink_digits_to_ts("12345"), "12345.");
    }
}
