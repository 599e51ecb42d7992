//! The per-run collection of nodes gathered from every source.

use linked_hash_map::LinkedHashMap;
use serde_yaml::Value;

use super::Proxy;

/// One thing a source contributed: either a node parsed from a share link,
/// or a Clash proxy entry kept as the source wrote it.
#[derive(Debug, Clone, PartialEq)]
pub enum AggregateItem {
    Node(Proxy),
    Entry(Value),
}

impl AggregateItem {
    /// Identity used for deduplication.
    ///
    /// Named items key on `name:<name>`, unnamed ones on `<host>:<port>`.
    /// Nodes and Clash entries share one key space so the same server seen in
    /// a share link and in a Clash document collapses into one item. Anything
    /// else falls back to its serialized form, so every item gets a key.
    pub fn dedup_key(&self) -> String {
        match self {
            AggregateItem::Node(node) => {
                if !node.remark.is_empty() {
                    format!("name:{}", node.remark)
                } else if !node.hostname.is_empty() {
                    format!("{}:{}", node.hostname, node.port)
                } else {
                    format!("{:?}", node)
                }
            }
            AggregateItem::Entry(entry) => {
                if let Some(name) = entry.get("name").and_then(scalar_to_string) {
                    if !name.is_empty() {
                        return format!("name:{}", name);
                    }
                }
                let server = entry.get("server").and_then(scalar_to_string);
                let port = entry.get("port").and_then(scalar_to_string);
                match (server, port) {
                    (Some(server), Some(port)) if !server.is_empty() && !port.is_empty() => {
                        format!("{}:{}", server, port)
                    }
                    _ => serde_yaml::to_string(entry).unwrap_or_else(|_| format!("{:?}", entry)),
                }
            }
        }
    }

    /// Name shown in generated configs.
    pub fn display_name(&self) -> String {
        match self {
            AggregateItem::Node(node) => node.display_name(),
            AggregateItem::Entry(entry) => entry
                .get("name")
                .and_then(scalar_to_string)
                .unwrap_or_default(),
        }
    }
}

/// Render a YAML scalar the way it would read in the document.
pub(crate) fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Deduplicated, order preserving collection.
///
/// A later item with an already seen key replaces the earlier value but keeps
/// the earlier position.
#[derive(Debug, Default)]
pub struct Aggregate {
    items: LinkedHashMap<String, AggregateItem>,
    seen: usize,
}

impl Aggregate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, item: AggregateItem) {
        self.seen += 1;
        let key = item.dedup_key();
        // LinkedHashMap::insert would move the key to the back.
        if let Some(slot) = self.items.get_mut(&key) {
            *slot = item;
        } else {
            self.items.insert(key, item);
        }
    }

    /// Number of items offered, duplicates included.
    pub fn seen(&self) -> usize {
        self.seen
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_items(self) -> Vec<AggregateItem> {
        self.items.into_iter().map(|(_, item)| item).collect()
    }
}

impl Extend<AggregateItem> for Aggregate {
    fn extend<T: IntoIterator<Item = AggregateItem>>(&mut self, iter: T) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl FromIterator<AggregateItem> for Aggregate {
    fn from_iter<T: IntoIterator<Item = AggregateItem>>(iter: T) -> Self {
        let mut aggregate = Aggregate::new();
        aggregate.extend(iter);
        aggregate
    }
}

/// Deduplicate `items` in arrival order.
pub fn dedupe<I>(items: I) -> Vec<AggregateItem>
where
    I: IntoIterator<Item = AggregateItem>,
{
    items.into_iter().collect::<Aggregate>().into_items()
}
