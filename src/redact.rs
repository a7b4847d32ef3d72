//! Masking of bot tokens in text that ends up in logs or error messages.
//!
//! Request URLs carry the token in their path (`/bot<token>/<method>`).
//! When the token is known, [`redact_secret`] masks it literally; the
//! pattern-based [`redact_token`] only recognises tokens shaped like the
//! ones Telegram issues.

use log::trace;
use once_cell::sync::Lazy;
use regex::Regex;

/// Placeholder written in place of a token
pub const REDACTED: &str = "<redacted>";

/// Bot tokens look like `123456789:AAE...`, with or without a `bot` URL prefix.
/// Matches at least 3 digits, a colon and at least 10 token characters.
static TOKEN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(bot)?\d{3,}:[A-Za-z0-9_-]{10,}").unwrap());

/// Replace every bot token in `text` with [`REDACTED`]
pub fn redact_token(text: &str) -> String {
    let result = TOKEN_REGEX.replace_all(text, |caps: &regex::Captures| {
        if caps.get(1).is_some() {
            format!("bot{}", REDACTED)
        } else {
            REDACTED.to_string()
        }
    });

    if result != text {
        trace!("Redacted bot token from text");
    }

    result.into_owned()
}

/// Mask a known token literally, then anything else shaped like a token
pub fn redact_secret(text: &str, token: &str) -> String {
    if token.is_empty() {
        return redact_token(text);
    }
    redact_token(&text.replace(token, REDACTED))
}

/// Mask everything except the numeric bot id for `Debug` output
pub(crate) fn mask_token(token: &str) -> String {
    match token.split_once(':') {
        Some((id, _)) => format!("{}:{}", id, REDACTED),
        None => REDACTED.to_string(),
    }
}
