use serde_json::json;
use urlencoding::encode as url_encode;

use crate::models::{AggregateItem, Proxy, ProxyExtra};
use crate::parser::clash::translate_proxies;
use crate::utils::base64::base64_encode;

/// Convert a proxy to a single URI
///
/// The output is accepted by the matching parser in
/// [`crate::parser::explodes`].
pub fn proxy_to_uri(node: &Proxy) -> String {
    let host = if node.hostname.contains(':') {
        format!("[{}]", node.hostname)
    } else {
        node.hostname.clone()
    };
    let fragment = if node.remark.is_empty() {
        String::new()
    } else {
        format!("#{}", url_encode(&node.remark))
    };

    match &node.extra {
        ProxyExtra::VMess { alter_id, security } => {
            // Format: vmess://BASE64(JSON)
            let vmess_json = json!({
                "v": "2",
                "ps": node.remark,
                "add": node.hostname,
                "port": node.port,
                "id": node.identity,
                "aid": alter_id,
                "scy": security
            });
            format!("vmess://{}", base64_encode(&vmess_json.to_string()))
        }
        ProxyExtra::Vless { security } | ProxyExtra::Trojan { security } => {
            format!(
                "{}://{}@{}:{}?security={}{}",
                node.proxy_type().scheme(),
                url_encode(&node.identity),
                host,
                node.port,
                url_encode(security),
                fragment
            )
        }
        ProxyExtra::Shadowsocks { method } => {
            // Format: ss://BASE64(method:password)@server:port#remark
            let user_info = base64_encode(&format!("{}:{}", method, node.identity));
            format!("ss://{}@{}:{}{}", user_info, host, node.port, fragment)
        }
    }
}

/// Convert the aggregate to a Base64 wrapped link subscription
///
/// Clash entries are translated first; entries of other types are skipped.
pub fn proxy_to_single(items: &[AggregateItem]) -> String {
    let links: Vec<String> = translate_proxies(items).iter().map(proxy_to_uri).collect();
    base64_encode(&links.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::explode;

    #[test]
    fn test_links_parse_back() {
        let nodes = vec![
            Proxy::vmess_construct("vm", "1.2.3.4", 8080, "abc", 2, "zero"),
            Proxy::vless_construct("", "2001:db8::1", 443, "u1", "reality"),
            Proxy::trojan_construct("t j", "example.org", 8443, "p@ss", "tls"),
            Proxy::ss_construct("s", "1.2.3.4", 8888, "pa:ss", "aes-256-gcm"),
        ];
        for node in nodes {
            let link = proxy_to_uri(&node);
            assert_eq!(explode(&link).unwrap(), node, "{}", link);
        }
    }

    #[test]
    fn test_subscription_skips_untranslatable_entries() {
        let items = vec![
            AggregateItem::Entry(
                serde_yaml::from_str("{name: hy, type: hysteria2, server: h, port: 443}").unwrap(),
            ),
            AggregateItem::Node(Proxy::ss_construct("", "h", 1, "p", "m")),
        ];
        let decoded = crate::utils::base64::base64_decode(&proxy_to_single(&items)).unwrap();
        assert_eq!(decoded.lines().count(), 1);
        assert!(decoded.starts_with("ss://"));
    }
}
