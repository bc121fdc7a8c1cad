//! In-place key renaming.

use serde_json::{Map, Value};

/// For each `(new_key, old_key)` pair, set `source[new_key]` to a copy of
/// `source[old_key]`. The old key is NOT removed.
///
/// Note this function mutates `source`; callers needing immutability should
/// copy first. Pairs whose old key is absent are skipped.
pub fn rename_keys(source: &mut Map<String, Value>, renames: &[(&str, &str)]) {
    for (new_key, old_key) in renames {
        if let Some(value) = source.get(*old_key).cloned() {
            source.insert((*new_key).to_string(), value);
        }
    }
}
