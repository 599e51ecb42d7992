use serde_json::{json, Value};

use crate::generator::config::remark::process_remark;
use crate::generator::error::EmitError;
use crate::models::{AggregateItem, Proxy, ProxyExtra, ProxyType};
use crate::parser::clash::translate_proxies;

/// Template used when no V2Ray template file is available.
pub const DEFAULT_V2RAY_BASE: &str =
    r#"{"log":{"loglevel":"warning"},"inbounds":[],"outbounds":[]}"#;

const PROXY_PROTOCOLS: [&str; 4] = ["vmess", "vless", "trojan", "shadowsocks"];

/// Convert the aggregate to V2Ray format
///
/// Every node becomes one outbound, in aggregate order. Clash entries are
/// translated first; entries of other types are dropped. The template's own
/// non-proxy outbounds (`freedom`, `blackhole`, ...) follow the generated
/// ones, so the first outbound is always a proxy when one exists. Tags are
/// kept unique across both.
///
/// # Arguments
/// * `items` - Deduplicated aggregate
/// * `base_conf` - V2Ray template as a JSON string, [`DEFAULT_V2RAY_BASE`] if `None`
pub fn proxy_to_v2ray(items: &[AggregateItem], base_conf: Option<&str>) -> Result<String, EmitError> {
    let mut config: Value = serde_json::from_str(base_conf.unwrap_or(DEFAULT_V2RAY_BASE))
        .map_err(|e| EmitError::TemplateInvalid(e.to_string()))?;
    if !config.is_object() {
        return Err(EmitError::TemplateInvalid(
            "top level must be an object".to_string(),
        ));
    }

    let kept: Vec<Value> = config
        .get("outbounds")
        .and_then(Value::as_array)
        .map(|existing| {
            existing
                .iter()
                .filter(|outbound| {
                    let protocol = outbound.get("protocol").and_then(Value::as_str).unwrap_or("");
                    !PROXY_PROTOCOLS.contains(&protocol)
                })
                .cloned()
                .collect()
        })
        .unwrap_or_default();

    // Template tags are taken first so a node cannot shadow `direct` and friends
    let mut remarks_list: Vec<String> = kept
        .iter()
        .filter_map(|outbound| outbound.get("tag").and_then(Value::as_str))
        .map(str::to_string)
        .collect();

    let mut outbounds = Vec::with_capacity(items.len() + kept.len());
    for node in translate_proxies(items) {
        let mut outbound = node_to_outbound(&node);
        let mut tag = node.display_name();
        process_remark(&mut tag, &remarks_list);
        outbound["tag"] = Value::from(tag.as_str());
        remarks_list.push(tag);
        outbounds.push(outbound);
    }
    outbounds.extend(kept);
    config["outbounds"] = Value::Array(outbounds);

    serde_json::to_string_pretty(&config).map_err(|e| EmitError::Serialize(e.to_string()))
}

/// Render a node as a V2Ray outbound.
pub fn node_to_outbound(node: &Proxy) -> Value {
    let proxy_type = node.proxy_type();
    let settings = match &node.extra {
        ProxyExtra::VMess { alter_id, security } => json!({
            "vnext": [{
                "address": node.hostname,
                "port": node.port,
                "users": [{
                    "id": node.identity,
                    "alterId": alter_id,
                    "security": security
                }]
            }]
        }),
        ProxyExtra::Vless { .. } => json!({
            "vnext": [{
                "address": node.hostname,
                "port": node.port,
                "users": [{
                    "id": node.identity,
                    "encryption": "none"
                }]
            }]
        }),
        ProxyExtra::Trojan { .. } => json!({
            "servers": [{
                "address": node.hostname,
                "port": node.port,
                "password": node.identity
            }]
        }),
        ProxyExtra::Shadowsocks { method } => json!({
            "servers": [{
                "address": node.hostname,
                "port": node.port,
                "method": method,
                "password": node.identity
            }]
        }),
    };

    let mut outbound = json!({
        "tag": node.display_name(),
        "protocol": proxy_type.v2ray_protocol(),
        "settings": settings
    });

    if matches!(proxy_type, ProxyType::Vless | ProxyType::Trojan) && node.tls_secure() {
        outbound["streamSettings"] = json!({
            "network": "tcp",
            "security": node.security().unwrap_or("tls")
        });
    }

    outbound
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = r#"{
        "log": {"loglevel": "info"},
        "routing": {"domainStrategy": "AsIs"},
        "outbounds": [
            {"tag": "old", "protocol": "vmess", "settings": {}},
            {"tag": "direct", "protocol": "freedom"},
            {"tag": "block", "protocol": "blackhole"}
        ]
    }"#;

    fn items() -> Vec<AggregateItem> {
        vec![
            AggregateItem::Node(Proxy::vmess_construct("vm", "1.2.3.4", 8080, "abc", 2, "zero")),
            AggregateItem::Entry(
                serde_yaml::from_str(
                    "{name: clash-ss, type: ss, server: 5.6.7.8, port: 8388, cipher: aes-256-gcm, password: pw}",
                )
                .unwrap(),
            ),
            AggregateItem::Entry(
                serde_yaml::from_str("{name: hy, type: hysteria2, server: h, port: 443}").unwrap(),
            ),
            AggregateItem::Node(Proxy::trojan_construct("tj", "t.example.com", 443, "pw", "tls")),
        ]
    }

    #[test]
    fn test_outbounds_follow_schema() {
        let out = proxy_to_v2ray(&items(), Some(TEMPLATE)).unwrap();
        let config: Value = serde_json::from_str(&out).unwrap();

        assert_eq!(config["routing"]["domainStrategy"], "AsIs");
        let outbounds = config["outbounds"].as_array().unwrap();
        let tags: Vec<&str> = outbounds.iter().filter_map(|o| o["tag"].as_str()).collect();
        assert_eq!(tags, vec!["vm", "clash-ss", "tj", "direct", "block"]);

        let vnext = &outbounds[0]["settings"]["vnext"][0];
        assert_eq!(vnext["address"], "1.2.3.4");
        assert_eq!(vnext["port"], 8080);
        assert_eq!(vnext["users"][0]["id"], "abc");
        assert_eq!(vnext["users"][0]["alterId"], 2);
        assert_eq!(vnext["users"][0]["security"], "zero");

        assert_eq!(outbounds[1]["protocol"], "shadowsocks");
        assert_eq!(outbounds[1]["settings"]["servers"][0]["method"], "aes-256-gcm");

        assert_eq!(outbounds[2]["streamSettings"]["security"], "tls");
    }

    #[test]
    fn test_default_template() {
        let out = proxy_to_v2ray(&items(), None).unwrap();
        let config: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(config["log"]["loglevel"], "warning");
        assert_eq!(config["outbounds"].as_array().map(Vec::len), Some(3));
    }

    #[test]
    fn test_tags_are_unique() {
        let items = vec![
            AggregateItem::Node(Proxy::ss_construct("h (1)", "a", 2, "p", "m")),
            AggregateItem::Node(Proxy::ss_construct("", "h", 1, "p", "m")),
            AggregateItem::Node(Proxy::trojan_construct("direct", "t", 443, "pw", "tls")),
        ];
        let out = proxy_to_v2ray(&items, Some(TEMPLATE)).unwrap();
        let config: Value = serde_json::from_str(&out).unwrap();
        let tags: Vec<&str> = config["outbounds"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|o| o["tag"].as_str())
            .collect();
        assert_eq!(tags, vec!["h (1)", "h (1) 2", "direct 2", "direct", "block"]);
    }

    #[test]
    fn test_invalid_template() {
        assert!(matches!(
            proxy_to_v2ray(&[], Some("[1, 2]")),
            Err(EmitError::TemplateInvalid(_))
        ));
    }

    #[test]
    fn test_output_is_stable() {
        assert_eq!(
            proxy_to_v2ray(&items(), Some(TEMPLATE)).unwrap(),
            proxy_to_v2ray(&items(), Some(TEMPLATE)).unwrap()
        );
    }
}
