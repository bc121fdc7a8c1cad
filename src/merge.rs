//! Deep merge utility with array concatenation.

use serde_json::{Map, Value};
use tracing::trace;

/// True exactly for plain objects.
///
/// Arrays are objects in the underlying JSON representation but are never
/// merge targets, so they are excluded here along with every other kind of
/// value.
pub fn is_plain_object(value: &Value) -> bool {
    matches!(value, Value::Object(_))
}

/// Deep merge where arrays concatenate, nested objects merge one level deep,
/// primitives overwrite.
///
/// Folds `sources` left to right into a fresh map. Non-object sources
/// (primitives, arrays, null) contribute nothing and are skipped without
/// error. Later sources win for leaf and second-level values; array
/// concatenation is the one rule that keeps earlier contributions,
/// prepending them to the newer elements.
///
/// Merging stops at the second level: the immediate child keys of an object
/// value are copied, and anything below them is cloned wholesale from the
/// last source that defined that child key.
pub fn merge_deep(sources: &[Value]) -> Map<String, Value> {
    let mut result = Map::new();

    for source in sources {
        let source_map = match source {
            Value::Object(map) => map,
            other => {
                trace!("skipping non-object source: {}", other);
                continue;
            }
        };

        for (key, next_item) in source_map {
            match next_item {
                // Arrays: concatenate onto an existing array
                Value::Array(next_arr) => {
                    if let Some(Value::Array(existing)) = result.get_mut(key) {
                        existing.extend(next_arr.iter().cloned());
                    } else {
                        result.insert(key.clone(), Value::Array(next_arr.clone()));
                    }
                }

                // Objects: copy the immediate child keys, no deeper
                Value::Object(sub_map) => {
                    let slot = result
                        .entry(key.clone())
                        .or_insert_with(|| Value::Object(Map::new()));
                    if !is_plain_object(slot) {
                        *slot = Value::Object(Map::new());
                    }
                    if let Value::Object(target) = slot {
                        for (sub_key, sub_value) in sub_map {
                            target.insert(sub_key.clone(), sub_value.clone());
                        }
                    }
                }

                // Primitives: source overwrites
                other => {
                    result.insert(key.clone(), other.clone());
                }
            }
        }
    }

    result
}
