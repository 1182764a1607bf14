//! The token tree.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A node of a design-token file.
///
/// Every JSON object is a [`Group`](TokenNode::Group), whether it holds
/// nested tokens or the fields of a single token; everything else (strings,
/// numbers, arrays, ...) is a [`Value`](TokenNode::Value). Member order is the
/// order of the source document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum TokenNode {
    Group(IndexMap<String, TokenNode>),
    Value(Value),
}

impl TokenNode {
    /// An empty group.
    pub fn group() -> Self {
        TokenNode::Group(IndexMap::new())
    }

    pub fn is_group(&self) -> bool {
        matches!(self, TokenNode::Group(_))
    }

    /// Member `key` of a group.
    pub fn get(&self, key: &str) -> Option<&TokenNode> {
        match self {
            TokenNode::Group(members) => members.get(key),
            TokenNode::Value(_) => None,
        }
    }

    /// Member keys of a group, in document order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        let members = match self {
            TokenNode::Group(members) => Some(members),
            TokenNode::Value(_) => None,
        };
        members.into_iter().flat_map(|m| m.keys().map(String::as_str))
    }

    /// Number of groups on the longest path from this node, this one included.
    pub fn depth(&self) -> usize {
        match self {
            TokenNode::Group(members) => {
                1 + members.values().map(TokenNode::depth).max().unwrap_or(0)
            }
            TokenNode::Value(_) => 0,
        }
    }
}

impl Default for TokenNode {
    fn default() -> Self {
        Self::group()
    }
}

impl From<Value> for TokenNode {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => TokenNode::Group(
                map.into_iter()
                    .map(|(key, value)| (key, TokenNode::from(value)))
                    .collect(),
            ),
            other => TokenNode::Value(other),
        }
    }
}

impl From<TokenNode> for Value {
    fn from(node: TokenNode) -> Self {
        match node {
            TokenNode::Group(members) => Value::Object(
                members
                    .into_iter()
                    .map(|(key, node)| (key, Value::from(node)))
                    .collect(),
            ),
            TokenNode::Value(value) => value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_objects_become_groups() {
        let node = TokenNode::from(json!({"a": {"b": [1, {"c": 2}]}, "d": null}));
        assert!(node.is_group());
        assert!(node.get("a").is_some_and(TokenNode::is_group));
        // Arrays stay opaque values, objects inside them included.
        assert!(matches!(node.get("a").and_then(|a| a.get("b")), Some(TokenNode::Value(_))));
        assert_eq!(node.depth(), 2);
    }

    #[test]
    fn test_member_order_is_preserved() {
        let node: TokenNode = serde_json::from_str(r#"{"z": 1, "a": 2, "m": 3}"#).unwrap();
        assert_eq!(node.keys().collect::<Vec<_>>(), vec!["z", "a", "m"]);
        assert_eq!(serde_json::to_string(&node).unwrap(), r#"{"z":1,"a":2,"m":3}"#);
    }

    #[test]
    fn test_scalars_are_values() {
        let node = TokenNode::from(json!("#007bff"));
        assert_eq!(node, TokenNode::Value(json!("#007bff")));
        assert_eq!(node.keys().count(), 0);
        assert_eq!(node.depth(), 0);
    }
}
