use log::warn;
use serde_yaml::Value;

use crate::models::{AggregateItem, Proxy};
use crate::parser::clash::extract_proxies;
use crate::parser::detect::{classify, decode_base64_blob, extract_uri_lines, parse_structured, ContentKind};
use crate::parser::error::ParseError;
use crate::parser::explodes::{explode, scheme_of};

/// One line of the source list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceEntry {
    /// `http://` or `https://` subscription to download.
    Url(String),
    /// A share link written directly into the list.
    Literal(String),
}

impl SourceEntry {
    /// Interpret a source list line. Blank lines and `#` comments give `None`.
    pub fn from_line(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        if line.starts_with("http://") || line.starts_with("https://") {
            Some(SourceEntry::Url(line.to_string()))
        } else {
            Some(SourceEntry::Literal(line.to_string()))
        }
    }

    /// Label for log lines. Literal links are reduced to their scheme.
    pub fn label(&self) -> String {
        match self {
            SourceEntry::Url(url) => url.clone(),
            SourceEntry::Literal(link) => format!("inline {} link", scheme_of(link)),
        }
    }
}

/// What one source body contained.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceContent {
    pub kind: ContentKind,
    /// Clash proxy entries, passed through as written.
    pub entries: Vec<Value>,
    /// Share links, untranslated.
    pub uris: Vec<String>,
}

/// Classify a body and pull out its Clash entries or share links.
pub fn parse_content(text: &str) -> SourceContent {
    let kind = classify(text);
    let (entries, uris) = match kind {
        ContentKind::Structured => (
            parse_structured(text)
                .map(|doc| extract_proxies(&doc))
                .unwrap_or_default(),
            Vec::new(),
        ),
        ContentKind::Base64 => (
            Vec::new(),
            decode_base64_blob(text)
                .map(|decoded| extract_uri_lines(&decoded))
                .unwrap_or_default(),
        ),
        ContentKind::Plain => (Vec::new(), extract_uri_lines(text)),
    };
    SourceContent {
        kind,
        entries,
        uris,
    }
}

/// A share link that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkFailure {
    pub source: String,
    pub scheme: String,
    pub error: ParseError,
}

/// Parse every link, keeping the successes and reporting each failure.
/// One bad link never stops the rest of the batch.
pub fn explode_links(source: &str, uris: &[String]) -> (Vec<Proxy>, Vec<LinkFailure>) {
    let mut nodes = Vec::with_capacity(uris.len());
    let mut failures = Vec::new();

    for uri in uris {
        match explode(uri) {
            Ok(node) => nodes.push(node),
            Err(error) => {
                let scheme = scheme_of(uri);
                warn!("{}: skipping {} link: {}", source, scheme, error);
                failures.push(LinkFailure {
                    source: source.to_string(),
                    scheme,
                    error,
                });
            }
        }
    }

    (nodes, failures)
}

impl SourceContent {
    /// Items this source contributes to the aggregate: Clash entries first,
    /// then nodes parsed from links.
    pub fn into_items(self, source: &str) -> (Vec<AggregateItem>, Vec<String>, Vec<LinkFailure>) {
        let (nodes, failures) = explode_links(source, &self.uris);
        let items = self
            .entries
            .into_iter()
            .map(AggregateItem::Entry)
            .chain(nodes.into_iter().map(AggregateItem::Node))
            .collect();
        (items, self.uris, failures)
    }
}
