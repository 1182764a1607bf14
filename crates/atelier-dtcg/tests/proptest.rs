//! Property-based tests for the legacy schema converter.

use atelier_dtcg::{convert, convert_json, convert_value, TokenNode};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

fn key_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("value".to_string()),
        Just("type".to_string()),
        Just("description".to_string()),
        Just("comment".to_string()),
        Just("$value".to_string()),
        Just("$type".to_string()),
        Just("$description".to_string()),
        Just("$extensions".to_string()),
        "[a-z][a-z0-9-]{0,6}",
    ]
}

fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i32>().prop_map(Value::from),
        "#[0-9a-f]{6}".prop_map(Value::from),
        "[ -~]{0,10}".prop_map(Value::from),
    ]
}

fn tree_strategy() -> impl Strategy<Value = Value> {
    scalar_strategy().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..3).prop_map(Value::Array),
            prop::collection::vec((key_strategy(), inner), 0..6)
                .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

const LEGACY: &[&str] = &["value", "type", "description", "comment"];
const DATA_KEYS: &[&str] = &["$value", "$type", "$description"];

/// Every non-legacy key path of `value`. Legacy keys are left out together
/// with their subtree, `$` keys are listed but not descended into.
fn plain_paths(value: &Value, prefix: &str, out: &mut Vec<String>) {
    if let Value::Object(map) = value {
        for (key, child) in map {
            if LEGACY.contains(&key.as_str()) {
                continue;
            }
            let path = format!("{prefix}/{key}");
            out.push(path.clone());
            if !key.starts_with('$') {
                plain_paths(child, &path, out);
            }
        }
    }
}

proptest! {
    #[test]
    fn convert_is_idempotent(tree in tree_strategy()) {
        let once = convert_value(tree);
        let twice = convert_value(once.clone());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn convert_keeps_non_legacy_keys_and_depth(tree in tree_strategy()) {
        let converted = convert_value(tree.clone());

        let mut before = Vec::new();
        plain_paths(&tree, "", &mut before);
        let mut after = Vec::new();
        plain_paths(&converted, "", &mut after);
        for path in &before {
            prop_assert!(after.contains(path), "lost {}", path);
        }

        prop_assert_eq!(
            TokenNode::from(tree).depth(),
            TokenNode::from(converted).depth()
        );
    }

    #[test]
    fn no_legacy_key_survives_without_a_dtcg_twin(tree in tree_strategy()) {
        fn check(value: &Value) -> bool {
            let Value::Object(map) = value else { return true };
            let legacy_ok = [("value", "$value"), ("type", "$type"), ("description", "$description"), ("comment", "$description")]
                .iter()
                .all(|(legacy, target)| !map.contains_key(*legacy) || map.contains_key(*target));
            legacy_ok
                && map
                    .iter()
                    .filter(|(key, _)| !DATA_KEYS.contains(&key.as_str()) && !LEGACY.contains(&key.as_str()))
                    .all(|(_, child)| check(child))
        }
        prop_assert!(check(&convert_value(tree)));
    }
}

#[test]
fn legacy_sample_converts() {
    let legacy = json!({
        "color": {
            "brand": {
                "primary": {
                    "value": "#007bff",
                    "type": "color",
                    "comment": "Main brand identity color"
                }
            }
        }
    });
    assert_eq!(
        convert_value(legacy),
        json!({
            "color": {
                "brand": {
                    "primary": {
                        "$value": "#007bff",
                        "$type": "color",
                        "$description": "Main brand identity color"
                    }
                }
            }
        })
    );
}

#[test]
fn mixed_levels_pass_dtcg_keys_through() {
    let node = TokenNode::from(json!({
        "spacing": {"$type": "dimension", "sm": {"value": "4px"}, "md": {"$value": "8px", "comment": "base"}}
    }));
    let converted: Value = convert(node).into();
    assert_eq!(
        converted,
        json!({
            "spacing": {"$type": "dimension", "sm": {"$value": "4px"}, "md": {"$value": "8px", "$description": "base"}}
        })
    );
}

#[test]
fn convert_json_pretty_prints_with_two_spaces() {
    let output = convert_json(r#"{"a":{"type":"color"}}"#).unwrap();
    assert_eq!(output, "{\n  \"a\": {\n    \"$type\": \"color\"\n  }\n}");
}

#[test]
fn convert_json_accepts_any_json() {
    assert_eq!(convert_json("[1,2]").unwrap(), "[\n  1,\n  2\n]");
    assert_eq!(convert_json("\"x\"").unwrap(), "\"x\"");
    assert!(convert_json("").is_err());
}
