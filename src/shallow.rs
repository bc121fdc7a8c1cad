//! Shallow merge and assign helpers.

use serde_json::{Map, Value};

/// Shallow merge: a new map with `a`'s entries, then `b`'s applied over
/// them (`b` wins on conflict).
///
/// Only top-level keys are combined; values are cloned as-is. Non-object
/// arguments contribute nothing.
pub fn merge_shallow(a: &Value, b: &Value) -> Map<String, Value> {
    let mut result = Map::new();

    if let Value::Object(map) = a {
        for (key, value) in map {
            result.insert(key.clone(), value.clone());
        }
    }
    if let Value::Object(map) = b {
        for (key, value) in map {
            result.insert(key.clone(), value.clone());
        }
    }

    result
}

/// No-overwrite assign: copy into `a` only those of `b`'s keys that `a`
/// lacks.
///
/// Mutates `a` in place; keys already present in `a` keep their values.
pub fn assign(a: &mut Map<String, Value>, b: &Map<String, Value>) {
    for (key, value) in b {
        if !a.contains_key(key) {
            a.insert(key.clone(), value.clone());
        }
    }
}
