use crate::constants::{DEFAULT_PORT, DEFAULT_TROJAN_SECURITY};
use crate::models::Proxy;
use crate::parser::error::ParseError;

use super::{parse_userinfo_link, UserinfoLink};

/// Parse a Trojan link into a Proxy object
///
/// Same shape as VLESS, but the user part is a password and the security
/// mode defaults to `tls`.
pub fn explode_trojan(trojan: &str) -> Result<Proxy, ParseError> {
    // Split into user, host, port, query and remark
    let UserinfoLink {
        user,
        host,
        port,
        security,
        remark,
    } = parse_userinfo_link(trojan, "trojan", "password")?;

    // Create the proxy, defaulting port and security
    Ok(Proxy::trojan_construct(
        &remark,
        &host,
        port.unwrap_or(DEFAULT_PORT),
        &user,
        security.as_deref().unwrap_or(DEFAULT_TROJAN_SECURITY),
    ))
}
