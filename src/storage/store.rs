//! Key-value persistence store
//!
//! Each key maps to one JSON file in the data directory. Values are read
//! back untyped; callers normalize them into models.

use std::path::PathBuf;

use serde::Serialize;
use serde_json::Value;

use super::file_io::{read_json_value, write_json_atomic};
use crate::error::BkvError;

/// Key of the settlement workspace
pub const WORKSPACE_KEY: &str = "betriebkostenverrechner_workspace_v1";

/// Legacy key holding a single settlement state
pub const LEGACY_STATE_KEY: &str = "betriebkostenverrechner_state_v1";

/// Key of the ledger workspace
pub const LEDGER_WORKSPACE_KEY: &str = "betriebkostenverrechner_euer_workspace_v1";

/// Legacy key holding a single ledger state
pub const LEGACY_LEDGER_STATE_KEY: &str = "euer_state_v1";

/// JSON file store addressed by string keys
#[derive(Debug, Clone)]
pub struct KeyValueStore {
    dir: PathBuf,
}

impl KeyValueStore {
    /// Create a store rooted at `dir`
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// File backing a key
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Whether a value is stored under `key`
    pub fn contains(&self, key: &str) -> bool {
        self.path_for(key).exists()
    }

    /// Load the value stored under `key`, `None` if absent
    pub fn load(&self, key: &str) -> Result<Option<Value>, BkvError> {
        read_json_value(self.path_for(key))
    }

    /// Store a value under `key`, replacing any previous value
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), BkvError> {
        write_json_atomic(self.path_for(key), value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let store = KeyValueStore::new(temp_dir.path().to_path_buf());

        assert!(!store.contains("k"));
        assert_eq!(store.load("k").unwrap(), None);

        store.save("k", &json!({"a": 1})).unwrap();
        assert!(store.contains("k"));
        assert_eq!(store.load("k").unwrap(), Some(json!({"a": 1})));

        store.save("k", &json!([2])).unwrap();
        assert_eq!(store.load("k").unwrap(), Some(json!([2])));
    }

    #[test]
    fn test_path_for_key() {
        let store = KeyValueStore::new(PathBuf::from("/tmp/x"));
        assert_eq!(
            store.path_for(WORKSPACE_KEY),
            PathBuf::from("/tmp/x/betriebkostenverrechner_workspace_v1.json")
        );
    }
}
