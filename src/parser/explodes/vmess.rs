use serde_json::Value;

use crate::constants::{
    DEFAULT_ALTER_ID, DEFAULT_PORT, DEFAULT_VMESS_SECURITY, NIL_UUID, PLACEHOLDER_ADDRESS,
};
use crate::models::Proxy;
use crate::parser::error::ParseError;
use crate::parser::fields::{port_or, str_or, u16_or};
use crate::utils::base64::base64_decode;

/// Parse a VMess link into a Proxy object
///
/// Format: `vmess://` followed by Base64 encoded JSON, e.g.
/// `{"add":"1.2.3.4","port":8080,"id":"...","aid":0,"scy":"auto","ps":"name"}`.
/// Missing fields take the defaults from [`crate::constants`].
pub fn explode_vmess(vmess: &str) -> Result<Proxy, ParseError> {
    // Check if the link starts with vmess://
    let encoded = vmess
        .strip_prefix("vmess://")
        .ok_or_else(|| ParseError::UnsupportedScheme(super::scheme_of(vmess)))?;

    // Decode the base64 part and parse the JSON inside
    let decoded = base64_decode(encoded).ok_or(ParseError::InvalidBase64)?;
    let json: Value =
        serde_json::from_str(decoded.trim()).map_err(|e| ParseError::InvalidJson(e.to_string()))?;
    if !json.is_object() {
        return Err(ParseError::InvalidJson("expected an object".to_string()));
    }

    // Extract fields, falling back to the defaults
    let add = str_or(&json, "add", PLACEHOLDER_ADDRESS);
    let port = port_or(&json, "port", DEFAULT_PORT)?;
    let id = str_or(&json, "id", NIL_UUID);
    let aid = u16_or(&json, "aid", DEFAULT_ALTER_ID)?;
    let scy = str_or(&json, "scy", DEFAULT_VMESS_SECURITY);
    let remark = str_or(&json, "ps", "");

    Ok(Proxy::vmess_construct(&remark, &add, port, &id, aid, &scy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProxyExtra;
    use crate::utils::base64::base64_encode;

    fn link(json: &str) -> String {
        format!("vmess://{}", base64_encode(json))
    }

    #[test]
    fn test_parse_full_vmess() {
        let node = explode_vmess(&link(
            r#"{"add":"1.2.3.4","port":8080,"id":"abc","aid":2,"scy":"zero"}"#,
        ))
        .unwrap();
        assert_eq!(node.hostname, "1.2.3.4");
        assert_eq!(node.port, 8080);
        assert_eq!(node.identity, "abc");
        assert_eq!(
            node.extra,
            ProxyExtra::VMess {
                alter_id: 2,
                security: "zero".to_string()
            }
        );
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let node = explode_vmess(&link(r#"{"ps":"bare"}"#)).unwrap();
        assert_eq!(node.remark, "bare");
        assert_eq!(node.hostname, "example.com");
        assert_eq!(node.port, 443);
        assert_eq!(node.identity, "00000000-0000-0000-0000-000000000000");
        assert_eq!(
            node.extra,
            ProxyExtra::VMess {
                alter_id: 0,
                security: "auto".to_string()
            }
        );
    }

    #[test]
    fn test_string_numbers_and_missing_padding() {
        let json = r#"{"add":"h","port":"10086","id":"i","aid":"4"}"#;
        let body = base64_encode(json);
        let unpadded = body.trim_end_matches('=');
        let node = explode_vmess(&format!("vmess://{}", unpadded)).unwrap();
        assert_eq!(node.port, 10086);
        assert!(matches!(node.extra, ProxyExtra::VMess { alter_id: 4, .. }));
    }

    #[test]
    fn test_float_port() {
        let node = explode_vmess(&link(r#"{"add":"h","port":8080.0}"#)).unwrap();
        assert_eq!(node.port, 8080);
    }

    #[test]
    fn test_failures() {
        assert!(matches!(
            explode_vmess("vless://abc"),
            Err(ParseError::UnsupportedScheme(_))
        ));
        assert_eq!(explode_vmess("vmess://!!!!"), Err(ParseError::InvalidBase64));
        assert!(matches!(
            explode_vmess(&link("not json")),
            Err(ParseError::InvalidJson(_))
        ));
        assert!(matches!(
            explode_vmess(&link(r#"{"add":"h","port":"http"}"#)),
            Err(ParseError::InvalidPort(_))
        ));
    }
}
