//! Share-link parsers, one per supported scheme.

pub mod ss;
pub mod trojan;
pub mod vless;
pub mod vmess;

use url::Url;

use crate::models::Proxy;
use crate::parser::error::ParseError;

pub use ss::explode_ss;
pub use trojan::explode_trojan;
pub use vless::explode_vless;
pub use vmess::explode_vmess;

/// Explode a proxy link into a Proxy object
///
/// This function detects the type of proxy link and calls the appropriate parser.
/// A failure only concerns this one link.
pub fn explode(link: &str) -> Result<Proxy, ParseError> {
    let link = link.trim();

    if link.starts_with("vmess://") {
        explode_vmess(link)
    } else if link.starts_with("vless://") {
        explode_vless(link)
    } else if link.starts_with("trojan://") {
        explode_trojan(link)
    } else if link.starts_with("ss://") {
        explode_ss(link)
    } else {
        Err(ParseError::UnsupportedScheme(scheme_of(link)))
    }
}

/// Scheme part of a link for diagnostics, without any credentials.
pub fn scheme_of(link: &str) -> String {
    match link.find("://") {
        Some(pos) => link[..pos].to_string(),
        None => String::from("<none>"),
    }
}

/// The pieces of a `scheme://user@host:port?query#fragment` link.
#[derive(Debug)]
pub(crate) struct UserinfoLink {
    pub user: String,
    pub host: String,
    pub port: Option<u16>,
    /// First non-empty `security` query value.
    pub security: Option<String>,
    pub remark: String,
}

pub(crate) fn parse_userinfo_link(
    link: &str,
    scheme: &str,
    user_field: &'static str,
) -> Result<UserinfoLink, ParseError> {
    if !link.starts_with(&format!("{}://", scheme)) {
        return Err(ParseError::UnsupportedScheme(scheme_of(link)));
    }

    // Parse the main part of the URL
    let url = Url::parse(link).map_err(|e| match e {
        url::ParseError::InvalidPort => ParseError::InvalidPort(e.to_string()),
        _ => ParseError::InvalidUri(e.to_string()),
    })?;

    // Extract user id or password
    let user = url_decode(url.username());
    if user.is_empty() {
        return Err(ParseError::MissingField(user_field));
    }

    // Extract host and port
    let host = url
        .host_str()
        .map(|h| h.trim_start_matches('[').trim_end_matches(']').to_string())
        .filter(|h| !h.is_empty())
        .ok_or(ParseError::MissingField("host"))?;

    let port = match url.port() {
        Some(0) => return Err(ParseError::InvalidPort("0".to_string())),
        other => other,
    };

    // Parse query parameters
    let security = url
        .query_pairs()
        .find(|(key, value)| key == "security" && !value.is_empty())
        .map(|(_, value)| value.to_string());

    let remark = url.fragment().map(url_decode).unwrap_or_default();

    Ok(UserinfoLink {
        user,
        host,
        port,
        security,
        remark,
    })
}

pub(crate) fn url_decode(input: &str) -> String {
    urlencoding::decode(input)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| input.to_string())
}
