//! Group generation utilities
//!
//! Builds the selector group that lets a client pick among every node.

use serde_yaml::{Mapping, Value};

use crate::constants::DEFAULT_GROUP_NAME;
use crate::models::scalar_to_string;

/// Names of the rendered Clash proxies in order, skipping unnamed entries.
pub fn group_generate(proxies: &[Value]) -> Vec<String> {
    proxies
        .iter()
        .filter_map(|proxy| proxy.get("name").and_then(scalar_to_string))
        .filter(|name| !name.is_empty())
        .collect()
}

/// A `select` group named [`DEFAULT_GROUP_NAME`] over `names`.
pub fn default_select_group(names: Vec<String>) -> Value {
    let mut group = Mapping::new();
    group.insert(Value::from("name"), Value::from(DEFAULT_GROUP_NAME));
    group.insert(Value::from("type"), Value::from("select"));
    group.insert(
        Value::from("proxies"),
        Value::Sequence(names.into_iter().map(Value::from).collect()),
    );
    Value::Mapping(group)
}

/// Put `group` into `groups`, replacing a group with the same name in place,
/// otherwise in front of the template's own groups.
pub fn upsert_group(groups: &mut Vec<Value>, group: Value) {
    let name = group.get("name").cloned();
    match groups
        .iter_mut()
        .find(|existing| name.is_some() && existing.get("name") == name.as_ref())
    {
        Some(existing) => *existing = group,
        None => groups.insert(0, group),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_lists_names_in_order() {
        let proxies: Vec<Value> = serde_yaml::from_str(
            "[{name: 'h (1)', server: h, port: 1}, {name: 42, server: s, port: 2}, {server: s, port: 3}]",
        )
        .unwrap();
        assert_eq!(group_generate(&proxies), vec!["h (1)", "42"]);
    }

    #[test]
    fn test_upsert_replaces_or_prepends() {
        let mut groups: Vec<Value> =
            serde_yaml::from_str("[{name: Auto, type: url-test}, {name: PROXY, type: fallback}]")
                .unwrap();
        upsert_group(&mut groups, default_select_group(vec!["a".to_string()]));
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[1].get("type").and_then(Value::as_str), Some("select"));

        let mut groups: Vec<Value> = serde_yaml::from_str("[{name: Auto}]").unwrap();
        upsert_group(&mut groups, default_select_group(Vec::new()));
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].get("name").and_then(Value::as_str), Some("PROXY"));
    }
}
