//! Pulls a JSON value out of a free-text model reply.
//!
//! Models often wrap JSON in a markdown code fence, sometimes with a
//! language tag (```` ```json ````). The body between the first and the last
//! fence delimiter is taken; a tag line right after the opening delimiter is
//! skipped. A reply with fewer than two delimiters is parsed as-is.
//! Nothing is repaired: a reply that does not parse comes back as
//! [`ServiceError::Parse`] with the untouched reply attached.

use crate::error::{Result, ServiceError};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

const FENCE: &str = "```";

pub const PARSE_FAILURE_MESSAGE: &str = "Gemini response parsing failed";

static LANGUAGE_TAG: OnceLock<Regex> = OnceLock::new();

fn language_tag() -> &'static Regex {
    LANGUAGE_TAG.get_or_init(|| Regex::new(r"^[A-Za-z0-9_+.#-]+$").unwrap())
}

pub fn extract_json(reply: &str) -> Result<Value> {
    let candidate = fenced_body(reply).unwrap_or(reply).trim();

    serde_json::from_str(candidate).map_err(|e| {
        log::warn!("Model reply is not valid JSON: {}", e);
        ServiceError::Parse {
            message: PARSE_FAILURE_MESSAGE.to_string(),
            raw_text: reply.to_string(),
        }
    })
}

/// Text strictly between the first and last fence delimiter, minus a
/// leading language-tag line. `None` unless two distinct delimiters exist.
pub fn fenced_body(reply: &str) -> Option<&str> {
    let open = reply.find(FENCE)?;
    let close = reply.rfind(FENCE)?;
    if close < open + FENCE.len() {
        return None;
    }

    let body = &reply[open + FENCE.len()..close];
    match body.split_once('\n') {
        Some((first_line, rest)) if language_tag().is_match(first_line.trim()) => Some(rest),
        _ => Some(body),
    }
}
