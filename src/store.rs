//! String-keyed, JSON-encoded local persistence.
//!
//! A small external collaborator for applications built on the merge
//! utilities; the core operations never depend on it. Values are stored
//! under string keys inside a single JSON object file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

/// Error reading or writing the backing file, or encoding a stored value.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read store file {}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write store file {}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("store file {} does not contain a JSON object", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to encode value for key {key:?}")]
    Encode {
        key: String,
        source: serde_json::Error,
    },

    #[error("failed to decode value for key {key:?}")]
    Decode {
        key: String,
        source: serde_json::Error,
    },
}

/// Key-value store backed by a single JSON object file.
///
/// A missing backing file reads as an empty store; the file is created on
/// the first write.
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    /// Create a store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path to the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Retrieve and decode the value stored under `key`.
    ///
    /// Returns `Ok(None)` when the key, or the whole backing file, is
    /// absent.
    pub fn get_item<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let items = self.load()?;
        match items.get(key) {
            Some(value) => {
                let decoded =
                    serde_json::from_value(value.clone()).map_err(|e| StoreError::Decode {
                        key: key.to_string(),
                        source: e,
                    })?;
                Ok(Some(decoded))
            }
            None => Ok(None),
        }
    }

    /// Encode `value` and store it under `key`, replacing any previous
    /// value.
    pub fn set_item<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let mut items = self.load()?;
        let encoded = serde_json::to_value(value).map_err(|e| StoreError::Encode {
            key: key.to_string(),
            source: e,
        })?;
        items.insert(key.to_string(), encoded);
        self.save(items)
    }

    /// Remove the value stored under `key`. Returns whether it was present.
    pub fn remove_item(&self, key: &str) -> Result<bool, StoreError> {
        let mut items = self.load()?;
        let removed = items.remove(key).is_some();
        if removed {
            self.save(items)?;
        }
        Ok(removed)
    }

    /// Keys currently present, in insertion order.
    pub fn keys(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.load()?.keys().cloned().collect())
    }

    fn load(&self) -> Result<Map<String, Value>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("store file {} not found, reading as empty", self.path.display());
                return Ok(Map::new());
            }
            Err(e) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };

        serde_json::from_str(&content).map_err(|e| StoreError::Parse {
            path: self.path.clone(),
            source: e,
        })
    }

    fn save(&self, items: Map<String, Value>) -> Result<(), StoreError> {
        let content = Value::Object(items).to_string();
        fs::write(&self.path, content).map_err(|e| StoreError::Write {
            path: self.path.clone(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn make_store(dir: &Path) -> LocalStore {
        LocalStore::new(dir.join("store.json"))
    }

    #[test]
    fn test_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = make_store(dir.path());
        let value: Option<Value> = store.get_item("anything").unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn test_set_then_get_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = make_store(dir.path());

        store.set_item("count", &7u32).unwrap();

        assert_eq!(store.get_item::<u32>("count").unwrap(), Some(7));
    }

    #[test]
    fn test_set_overwrites_previous_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = make_store(dir.path());

        store.set_item("theme", &"light").unwrap();
        store.set_item("theme", &"dark").unwrap();

        assert_eq!(
            store.get_item::<String>("theme").unwrap(),
            Some("dark".to_string())
        );
    }

    #[test]
    fn test_values_persist_across_store_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        LocalStore::new(&path).set_item("saved", &json!({"a": 1})).unwrap();

        let reopened = LocalStore::new(&path);
        assert_eq!(
            reopened.get_item::<Value>("saved").unwrap(),
            Some(json!({"a": 1}))
        );
    }

    #[test]
    fn test_remove_item() {
        let dir = tempfile::tempdir().unwrap();
        let store = make_store(dir.path());

        store.set_item("gone", &1).unwrap();

        assert!(store.remove_item("gone").unwrap());
        assert_eq!(store.get_item::<Value>("gone").unwrap(), None);
        // Removing again reports absence
        assert!(!store.remove_item("gone").unwrap());
    }

    #[test]
    fn test_keys_in_insertion_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = make_store(dir.path());

        store.set_item("first", &1).unwrap();
        store.set_item("second", &2).unwrap();
        store.set_item("third", &3).unwrap();

        assert_eq!(store.keys().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "not json at all").unwrap();

        let store = LocalStore::new(&path);
        let result = store.get_item::<Value>("key");
        assert!(matches!(result, Err(StoreError::Parse { .. })));
    }

    #[test]
    fn test_non_object_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let store = LocalStore::new(&path);
        let result = store.get_item::<Value>("key");
        assert!(matches!(result, Err(StoreError::Parse { .. })));
    }

    #[test]
    fn test_typed_struct_round_trip() {
        #[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
        struct TodoItem {
            title: String,
            done: bool,
        }

        let dir = tempfile::tempdir().unwrap();
        let store = make_store(dir.path());

        let item = TodoItem {
            title: "write tests".to_string(),
            done: false,
        };
        store.set_item("todo:1", &item).unwrap();

        assert_eq!(store.get_item::<TodoItem>("todo:1").unwrap(), Some(item));
    }

    #[test]
    fn test_decode_error_for_mismatched_type() {
        let dir = tempfile::tempdir().unwrap();
        let store = make_store(dir.path());

        store.set_item("text", &"not a number").unwrap();

        let result = store.get_item::<u32>("text");
        assert!(matches!(result, Err(StoreError::Decode { .. })));
    }
}
