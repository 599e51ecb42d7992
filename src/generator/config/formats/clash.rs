use serde_yaml::{Mapping, Value};

use crate::generator::config::group::{default_select_group, group_generate, upsert_group};
use crate::generator::config::remark::process_remark;
use crate::generator::error::EmitError;
use crate::models::{AggregateItem, Proxy, ProxyExtra};

/// Convert the aggregate to Clash format
///
/// `base_conf` is the template document. Its `proxies` list is replaced by
/// the aggregate: Clash entries are copied as they were read, nodes from
/// share links are rendered as Clash proxies. A proxy whose name is already
/// taken is renamed with a counter suffix. A `select` group over every proxy
/// name is written into `proxy-groups`. Every other template key is left
/// alone.
///
/// # Arguments
/// * `items` - Deduplicated aggregate
/// * `base_conf` - Clash template as a YAML string
pub fn proxy_to_clash(items: &[AggregateItem], base_conf: &str) -> Result<String, EmitError> {
    let mut yaml_node: Value =
        serde_yaml::from_str(base_conf).map_err(|e| EmitError::TemplateInvalid(e.to_string()))?;
    let Value::Mapping(root) = &mut yaml_node else {
        return Err(EmitError::TemplateInvalid(
            "top level must be a mapping".to_string(),
        ));
    };

    let mut remarks_list: Vec<String> = Vec::with_capacity(items.len());
    let mut proxies = Vec::with_capacity(items.len());
    for item in items {
        let mut proxy = match item {
            AggregateItem::Entry(entry) => entry.clone(),
            AggregateItem::Node(node) => Value::Mapping(node_to_clash(node)),
        };

        let original = item.display_name();
        let mut remark = original.clone();
        process_remark(&mut remark, &remarks_list);
        if remark != original {
            if let Value::Mapping(map) = &mut proxy {
                insert(map, "name", remark.as_str());
            }
        }
        if !remark.is_empty() {
            remarks_list.push(remark);
        }
        proxies.push(proxy);
    }

    let group = default_select_group(group_generate(&proxies));
    root.insert(Value::from("proxies"), Value::Sequence(proxies));
    let groups_key = Value::from("proxy-groups");
    match root.get_mut(&groups_key) {
        Some(Value::Sequence(groups)) => upsert_group(groups, group),
        _ => {
            root.insert(groups_key, Value::Sequence(vec![group]));
        }
    }

    serde_yaml::to_string(&yaml_node).map_err(|e| EmitError::Serialize(e.to_string()))
}

fn insert<V: Into<Value>>(map: &mut Mapping, key: &str, value: V) {
    map.insert(Value::from(key), value.into());
}

/// Render a node as a Clash proxy entry.
pub fn node_to_clash(node: &Proxy) -> Mapping {
    let mut proxy = Mapping::new();
    insert(&mut proxy, "name", node.display_name());
    insert(&mut proxy, "type", node.proxy_type().clash_type());
    insert(&mut proxy, "server", node.hostname.as_str());
    insert(&mut proxy, "port", node.port);

    match &node.extra {
        ProxyExtra::VMess { alter_id, security } => {
            insert(&mut proxy, "uuid", node.identity.as_str());
            insert(&mut proxy, "alterId", *alter_id);
            insert(&mut proxy, "cipher", security.as_str());
        }
        ProxyExtra::Vless { .. } => {
            insert(&mut proxy, "uuid", node.identity.as_str());
            if node.tls_secure() {
                insert(&mut proxy, "tls", true);
            }
        }
        ProxyExtra::Trojan { .. } => {
            insert(&mut proxy, "password", node.identity.as_str());
        }
        ProxyExtra::Shadowsocks { method } => {
            insert(&mut proxy, "cipher", method.as_str());
            insert(&mut proxy, "password", node.identity.as_str());
        }
    }

    proxy
}
