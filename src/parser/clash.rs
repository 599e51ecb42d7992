//! Pull proxy entries out of Clash style YAML documents.

use log::debug;
use serde_yaml::Value;

use crate::constants::{
    DEFAULT_ALTER_ID, DEFAULT_PORT, DEFAULT_TROJAN_SECURITY, DEFAULT_VMESS_SECURITY, NIL_UUID,
};
use crate::models::{AggregateItem, Proxy, ProxyType};
use crate::parser::error::ParseError;
use crate::parser::fields::{opt_str, parse_port, port_or, str_or, u16_or, FieldSource};

/// Entries of the top level `proxies` sequence, unchanged.
///
/// A document without `proxies`, or whose `proxies` is not a sequence,
/// yields nothing. Entries that are not mappings are skipped.
pub fn extract_proxies(document: &Value) -> Vec<Value> {
    let Some(proxies) = document.get("proxies").and_then(Value::as_sequence) else {
        return Vec::new();
    };

    proxies
        .iter()
        .filter(|entry| {
            let keep = entry.is_mapping();
            if !keep {
                debug!("skipping non-mapping proxy entry");
            }
            keep
        })
        .cloned()
        .collect()
}

/// Nodes for every item of the aggregate, in order.
///
/// Nodes are taken as they are. Clash entries are translated; only `vmess`,
/// `vless`, `trojan` and `ss` entries are understood, anything else and
/// entries missing required fields are dropped.
pub fn translate_proxies(items: &[AggregateItem]) -> Vec<Proxy> {
    items
        .iter()
        .filter_map(|item| match item {
            AggregateItem::Node(node) => Some(node.clone()),
            AggregateItem::Entry(entry) => match translate_proxy(entry) {
                Some(Ok(node)) => Some(node),
                Some(Err(e)) => {
                    debug!(
                        "dropping Clash entry '{}': {}",
                        str_or(entry, "name", "<unnamed>"),
                        e
                    );
                    None
                }
                None => {
                    debug!("no node for Clash entry '{}'", item.display_name());
                    None
                }
            },
        })
        .collect()
}

/// Translate one entry. `None` means the type is not one we convert.
pub fn translate_proxy(entry: &Value) -> Option<Result<Proxy, ParseError>> {
    let proxy_type = entry
        .scalar("type")
        .and_then(|kind| ProxyType::from_clash_type(&kind))?;
    Some(translate_typed(entry, proxy_type))
}

fn translate_typed(entry: &Value, proxy_type: ProxyType) -> Result<Proxy, ParseError> {
    let name = str_or(entry, "name", "");
    let server = opt_str(entry, "server").ok_or(ParseError::MissingField("server"))?;
    // ss has no default port
    let port = match proxy_type {
        ProxyType::Shadowsocks => {
            parse_port(&opt_str(entry, "port").ok_or(ParseError::MissingField("port"))?)?
        }
        _ => port_or(entry, "port", DEFAULT_PORT)?,
    };

    let node = match proxy_type {
        ProxyType::VMess => Proxy::vmess_construct(
            &name,
            &server,
            port,
            &str_or(entry, "uuid", NIL_UUID),
            u16_or(entry, "alterId", DEFAULT_ALTER_ID)?,
            &str_or(entry, "cipher", DEFAULT_VMESS_SECURITY),
        ),
        ProxyType::Vless => {
            let uuid = opt_str(entry, "uuid").ok_or(ParseError::MissingField("uuid"))?;
            Proxy::vless_construct(&name, &server, port, &uuid, vless_security(entry))
        }
        ProxyType::Trojan => {
            let password =
                opt_str(entry, "password").ok_or(ParseError::MissingField("password"))?;
            Proxy::trojan_construct(&name, &server, port, &password, DEFAULT_TROJAN_SECURITY)
        }
        ProxyType::Shadowsocks => {
            let method = opt_str(entry, "cipher").ok_or(ParseError::MissingField("cipher"))?;
            let password =
                opt_str(entry, "password").ok_or(ParseError::MissingField("password"))?;
            Proxy::ss_construct(&name, &server, port, &password, &method)
        }
    };
    Ok(node)
}

fn vless_security(entry: &Value) -> &'static str {
    if entry.contains("reality-opts") {
        "reality"
    } else if entry.flag("tls") == Some(true) {
        "tls"
    } else {
        "none"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProxyExtra;

    const DOC: &str = r#"
port: 7890
proxies:
  - name: "vm"
    type: vmess
    server: vm.example.com
    port: 443
    uuid: b831381d-6324-4d53-ad4f-8cda48b30811
    alterId: 0
    cipher: auto
  - name: "vm-bare"
    type: vmess
    server: 5.6.7.8
  - name: "vl"
    type: vless
    server: vl.example.com
    port: 8443
    uuid: u-1
    tls: true
  - name: "tj"
    type: trojan
    server: tj.example.com
    port: 443
    password: secret
  - name: "ss"
    type: ss
    server: 1.2.3.4
    port: "8388"
    cipher: aes-256-gcm
    password: pw
  - name: "hy"
    type: hysteria2
    server: hy.example.com
    port: 443
  - just a string
"#;

    fn doc() -> Value {
        serde_yaml::from_str(DOC).unwrap()
    }

    fn entries(doc: &Value) -> Vec<AggregateItem> {
        extract_proxies(doc)
            .into_iter()
            .map(AggregateItem::Entry)
            .collect()
    }

    #[test]
    fn test_extract_passes_entries_through() {
        let entries = extract_proxies(&doc());
        assert_eq!(entries.len(), 6);
        assert_eq!(entries[5].get("type").and_then(Value::as_str), Some("hysteria2"));
    }

    #[test]
    fn test_extract_without_proxies() {
        let v: Value = serde_yaml::from_str("rules: []").unwrap();
        assert!(extract_proxies(&v).is_empty());
        let v: Value = serde_yaml::from_str("proxies: oops").unwrap();
        assert!(extract_proxies(&v).is_empty());
    }

    #[test]
    fn test_translate_known_types() {
        let nodes = translate_proxies(&entries(&doc()));
        assert_eq!(nodes.len(), 5);

        assert_eq!(nodes[0].remark, "vm");
        assert_eq!(nodes[0].identity, "b831381d-6324-4d53-ad4f-8cda48b30811");

        assert_eq!(nodes[1].port, 443);
        assert_eq!(nodes[1].identity, NIL_UUID);
        assert_eq!(
            nodes[1].extra,
            ProxyExtra::VMess {
                alter_id: 0,
                security: "auto".to_string()
            }
        );

        assert_eq!(nodes[2].security(), Some("tls"));
        assert_eq!(nodes[3].proxy_type(), ProxyType::Trojan);
        assert_eq!(nodes[4].port, 8388);
        assert_eq!(
            nodes[4].extra,
            ProxyExtra::Shadowsocks {
                method: "aes-256-gcm".to_string()
            }
        );
    }

    #[test]
    fn test_incomplete_entries_are_dropped() {
        let v: Value = serde_yaml::from_str(
            "proxies:\n  - {name: a, type: trojan, server: h}\n  - {name: b, type: ss, port: 1}\n",
        )
        .unwrap();
        assert!(translate_proxies(&entries(&v)).is_empty());
    }

    #[test]
    fn test_ss_entry_requires_port() {
        let v: Value = serde_yaml::from_str(
            "{name: s, type: ss, server: h, cipher: aes-256-gcm, password: pw}",
        )
        .unwrap();
        assert_eq!(
            translate_proxy(&v),
            Some(Err(ParseError::MissingField("port")))
        );

        let v: Value = serde_yaml::from_str("{name: t, type: trojan, server: h, password: pw}").unwrap();
        let node = translate_proxy(&v).unwrap().unwrap();
        assert_eq!(node.port, DEFAULT_PORT);
        assert_eq!(node.security(), Some(DEFAULT_TROJAN_SECURITY));
    }

    #[test]
    fn test_nodes_and_entries_keep_order() {
        let mut items = vec![AggregateItem::Node(Proxy::ss_construct("first", "h", 1, "p", "m"))];
        items.extend(entries(&doc()));
        let nodes = translate_proxies(&items);
        assert_eq!(nodes.len(), 6);
        assert_eq!(nodes[0].remark, "first");
        assert_eq!(nodes[1].remark, "vm");
    }
}
