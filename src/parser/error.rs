use thiserror::Error;

/// Why a single share link could not be turned into a node.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unsupported link scheme: {0}")]
    UnsupportedScheme(String),

    #[error("payload is not valid base64")]
    InvalidBase64,

    #[error("payload is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("malformed link: {0}")]
    InvalidUri(String),

    #[error("missing {0}")]
    MissingField(&'static str),

    #[error("invalid port: {0}")]
    InvalidPort(String),
}
