use crate::constants::{DEFAULT_PORT, DEFAULT_VLESS_SECURITY};
use crate::models::Proxy;
use crate::parser::error::ParseError;

use super::{parse_userinfo_link, UserinfoLink};

/// Parse a VLESS link into a Proxy object
///
/// Format: `vless://uuid@host:port?security=tls#remark`. The port defaults to
/// 443 and the security mode to `none`.
pub fn explode_vless(vless: &str) -> Result<Proxy, ParseError> {
    // Split into user, host, port, query and remark
    let UserinfoLink {
        user,
        host,
        port,
        security,
        remark,
    } = parse_userinfo_link(vless, "vless", "user id")?;

    // Create the proxy, defaulting port and security
    Ok(Proxy::vless_construct(
        &remark,
        &host,
        port.unwrap_or(DEFAULT_PORT),
        &user,
        security.as_deref().unwrap_or(DEFAULT_VLESS_SECURITY),
    ))
}
