use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::Proxy;
use crate::parser::error::ParseError;
use crate::parser::fields::parse_port;
use crate::utils::base64::base64_decode;

use super::{scheme_of, url_decode};

/// `<anything>@<anything>:<digits>`, i.e. a body that is already decoded.
static PLAIN_SS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^.+@.+:\d+").expect("static regex is valid"));

/// Parse a Shadowsocks link into a Proxy object
///
/// Accepted bodies:
/// * `ss://method:password@host:port`
/// * `ss://BASE64(method:password@host:port)`
/// * `ss://BASE64(method:password)@host:port` (SIP002)
///
/// An optional `#remark` is kept, plugin query parameters are ignored.
pub fn explode_ss(ss: &str) -> Result<Proxy, ParseError> {
    // Check if the link starts with ss://
    let mut content = ss
        .strip_prefix("ss://")
        .ok_or_else(|| ParseError::UnsupportedScheme(scheme_of(ss)))?;

    // Extract fragment (remark) if present
    let mut remark = String::new();
    if let Some((body, fragment)) = content.split_once('#') {
        remark = url_decode(fragment);
        content = body;
    }
    // Drop plugin and other query parameters
    if let Some((body, _query)) = content.split_once('?') {
        content = body.trim_end_matches('/');
    }

    // Legacy links encode the whole body
    let decoded = if PLAIN_SS_RE.is_match(content) {
        content.to_string()
    } else {
        base64_decode(content).ok_or(ParseError::InvalidBase64)?
    };
    let decoded = decoded.trim();

    let (secret, server_port) = decoded
        .rsplit_once('@')
        .ok_or_else(|| ParseError::InvalidUri("expected method:password@host:port".to_string()))?;

    // SIP002 encodes only the secret part
    let secret = if secret.contains(':') {
        secret.to_string()
    } else {
        base64_decode(&url_decode(secret)).ok_or(ParseError::InvalidBase64)?
    };
    // Parse method and password
    let (method, password) = secret
        .split_once(':')
        .ok_or(ParseError::MissingField("password"))?;
    if method.is_empty() {
        return Err(ParseError::MissingField("method"));
    }

    // Parse server and port
    let (host, port) = server_port
        .rsplit_once(':')
        .ok_or(ParseError::MissingField("port"))?;
    let host = host.trim_start_matches('[').trim_end_matches(']');
    if host.is_empty() {
        return Err(ParseError::MissingField("host"));
    }
    let port = parse_port(port)?;

    Ok(Proxy::ss_construct(&remark, host, port, password, method))
}
