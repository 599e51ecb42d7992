//! Guess how a fetched subscription body is encoded.

use std::fmt;

use serde_yaml::Value;

use crate::utils::base64::base64_decode;

/// Encoding of a subscription body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// A YAML (or JSON) document whose top level is a mapping.
    Structured,
    /// A Base64 wrapped list of share links.
    Base64,
    /// Anything else, read line by line.
    Plain,
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ContentKind::Structured => "Clash YAML",
            ContentKind::Base64 => "base64 subscription",
            ContentKind::Plain => "plain URI list",
        })
    }
}

/// Parse `text` as a structured document, returning it only when the top
/// level is a mapping.
pub fn parse_structured(text: &str) -> Option<Value> {
    match serde_yaml::from_str::<Value>(text) {
        Ok(value @ Value::Mapping(_)) => Some(value),
        _ => None,
    }
}

/// Decode a Base64 wrapped body. Empty output counts as failure.
pub fn decode_base64_blob(text: &str) -> Option<String> {
    base64_decode(text.trim()).filter(|decoded| !decoded.is_empty())
}

/// Classify `text`, trying structured, then Base64, then plain.
///
/// Never fails: an undecodable body is `Plain` and simply yields no links.
pub fn classify(text: &str) -> ContentKind {
    if parse_structured(text).is_some() {
        ContentKind::Structured
    } else if decode_base64_blob(text).is_some() {
        ContentKind::Base64
    } else {
        ContentKind::Plain
    }
}

/// Share links in a line oriented body: trimmed, non-empty lines containing
/// `://`.
pub fn extract_uri_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && line.contains("://"))
        .map(str::to_string)
        .collect()
}
