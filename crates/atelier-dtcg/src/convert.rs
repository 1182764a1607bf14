//! Legacy token keys to DTCG `$`-prefixed keys.
//!
//! | Legacy key | DTCG key |
//! |------------|----------|
//! | `value` | `$value` |
//! | `type` | `$type` |
//! | `description` | `$description` |
//! | `comment` | `$description` |
//!
//! Keys already starting with `$` are DTCG keys and are never renamed. Groups
//! under them (`$extensions` and the like) are still converted; the token
//! data under `$value`, `$type` and `$description` is not.
//! A legacy key is only renamed when its DTCG name is still free in the same
//! group; explicit `$` keys win, then `description`, then `comment`. A legacy
//! key that loses is kept under its own name so no data is dropped, which also
//! makes the conversion idempotent.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde_json::Value;

use crate::node::TokenNode;

const DTCG_PREFIX: char = '$';

/// Legacy keys in the order they claim their DTCG name.
const LEGACY_KEYS: &[(&str, &str)] = &[
    ("value", "$value"),
    ("type", "$type"),
    ("description", "$description"),
    ("comment", "$description"),
];

/// Converts a legacy token tree to DTCG form.
///
/// Groups are converted recursively, including groups under `$` keys. Values
/// under `$value`, `$type` and `$description` (renamed or explicit) and under
/// legacy keys kept by a collision are copied as they are, as are arrays and
/// scalars.
pub fn convert(node: TokenNode) -> TokenNode {
    match node {
        TokenNode::Group(members) => TokenNode::Group(convert_group(members)),
        TokenNode::Value(Value::Object(map)) => convert(TokenNode::from(Value::Object(map))),
        value @ TokenNode::Value(_) => value,
    }
}

/// [`convert`] over plain JSON values.
pub fn convert_value(value: Value) -> Value {
    convert(TokenNode::from(value)).into()
}

fn convert_group(members: IndexMap<String, TokenNode>) -> IndexMap<String, TokenNode> {
    let renames = plan_renames(&members);

    members
        .into_iter()
        .map(|(key, node)| match renames.get(key.as_str()) {
            Some(target) => (target.to_string(), node),
            None if is_reserved(&key) => (key, node),
            None => (key, convert(node)),
        })
        .collect()
}

/// Decides which legacy keys of a group get their DTCG name.
fn plan_renames(members: &IndexMap<String, TokenNode>) -> IndexMap<&'static str, &'static str> {
    let mut claimed: HashSet<&str> = members
        .keys()
        .filter(|key| key.starts_with(DTCG_PREFIX))
        .map(String::as_str)
        .collect();

    let mut renames = IndexMap::new();
    for &(legacy, target) in LEGACY_KEYS {
        if !members.contains_key(legacy) {
            continue;
        }
        if claimed.insert(target) {
            renames.insert(legacy, target);
        } else {
            tracing::debug!(key = legacy, target, "legacy key kept, target already present");
        }
    }
    renames
}

/// Keys whose values are token data rather than nested groups.
fn is_reserved(key: &str) -> bool {
    LEGACY_KEYS
        .iter()
        .any(|(legacy, target)| *legacy == key || *target == key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_renames_leaf_keys() {
        let converted = convert_value(json!({
            "color": {"brand": {"value": "#007bff", "type": "color", "comment": "c"}}
        }));
        assert_eq!(
            converted,
            json!({"color": {"brand": {"$value": "#007bff", "$type": "color", "$description": "c"}}})
        );
    }

    #[test]
    fn test_description_beats_comment() {
        let converted = convert_value(json!({"comment": "old", "description": "new"}));
        assert_eq!(converted, json!({"comment": "old", "$description": "new"}));
    }

    #[test]
    fn test_explicit_dtcg_keys_win() {
        let converted = convert_value(json!({"$value": 1, "value": 2, "type": "number"}));
        assert_eq!(converted, json!({"$value": 1, "value": 2, "$type": "number"}));
    }

    #[test]
    fn test_token_data_is_not_recursed() {
        let converted = convert_value(json!({"value": {"value": 1}, "$type": {"type": "x"}}));
        assert_eq!(converted, json!({"$value": {"value": 1}, "$type": {"type": "x"}}));
        assert_eq!(convert_value(converted.clone()), converted);
    }

    #[test]
    fn test_groups_under_dtcg_keys_are_converted() {
        let converted = convert_value(json!({
            "$extensions": {"vendor": {"value": 1, "comment": "c"}}
        }));
        assert_eq!(
            converted,
            json!({"$extensions": {"vendor": {"$value": 1, "$description": "c"}}})
        );
    }

    #[test]
    fn test_arrays_and_scalars_are_copied() {
        assert_eq!(convert_value(json!([{"value": 1}])), json!([{"value": 1}]));
        assert_eq!(convert_value(json!(3)), json!(3));
        let converted = convert_value(json!({"shadow": [{"value": 1}]}));
        assert_eq!(converted, json!({"shadow": [{"value": 1}]}));
    }

    #[test]
    fn test_order_is_kept_in_place() {
        let converted = convert_value(json!({"b": {}, "value": 1, "a": {}}));
        let keys: Vec<_> = converted.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["b", "$value", "a"]);
    }
}
