//! Identity and property accessor construction.

use serde_json::Value;

/// Returns its argument unchanged.
pub fn identity<T>(value: T) -> T {
    value
}

/// Build a read accessor bound to `key`.
///
/// No bounds checking: a missing key, or a non-object argument, yields
/// `Value::Null`.
pub fn property(key: impl Into<String>) -> impl Fn(&Value) -> Value {
    let key = key.into();
    move |obj: &Value| obj.get(&key).cloned().unwrap_or(Value::Null)
}
