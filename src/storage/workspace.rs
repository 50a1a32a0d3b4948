//! Workspace repository
//!
//! Loads a workspace from the key-value store, normalizing whatever is found
//! there, and writes the whole workspace back as one snapshot.

use std::sync::RwLock;

use serde_json::Value;

use super::store::KeyValueStore;
use crate::error::BkvError;
use crate::models::{DocumentState, Workspace};

/// Turns untyped stored data into a workspace
pub type Normalizer<S> = fn(&Value) -> Workspace<S>;

/// Repository for one workspace key
pub struct WorkspaceRepository<S: DocumentState> {
    store: KeyValueStore,
    key: &'static str,
    legacy_key: &'static str,
    normalize: Normalizer<S>,
    migrate_legacy: Normalizer<S>,
    data: RwLock<Workspace<S>>,
}

impl<S: DocumentState> WorkspaceRepository<S> {
    /// Create a repository for `key`; `legacy_key` is consulted only when
    /// `key` holds nothing yet.
    pub fn new(
        store: KeyValueStore,
        key: &'static str,
        legacy_key: &'static str,
        normalize: Normalizer<S>,
        migrate_legacy: Normalizer<S>,
    ) -> Self {
        Self {
            store,
            key,
            legacy_key,
            normalize,
            migrate_legacy,
            data: RwLock::new(Workspace::new_default()),
        }
    }

    /// Load the workspace from disk.
    ///
    /// Falls back to the legacy single-state key, then to a default
    /// workspace. A file that is not valid JSON counts as missing. The
    /// stored file is only read; the normalized result is written back on
    /// the next `save`.
    pub fn load(&self) -> Result<(), BkvError> {
        let workspace = match self.read_key(self.key)? {
            Some(value) => (self.normalize)(&value),
            None => match self.read_key(self.legacy_key)? {
                Some(legacy) => (self.migrate_legacy)(&legacy),
                None => Workspace::new_default(),
            },
        };

        let mut data = self
            .data
            .write()
            .map_err(|e| BkvError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *data = workspace;

        Ok(())
    }

    fn read_key(&self, key: &str) -> Result<Option<Value>, BkvError> {
        match self.store.load(key) {
            Err(BkvError::Json(msg)) => {
                eprintln!("Warning: ignoring unreadable data ({})", msg);
                Ok(None)
            }
            other => other,
        }
    }

    /// Save the workspace to disk
    pub fn save(&self) -> Result<(), BkvError> {
        let data = self
            .data
            .read()
            .map_err(|e| BkvError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        self.store.save(self.key, &*data)
    }

    /// Snapshot of the workspace
    pub fn get(&self) -> Result<Workspace<S>, BkvError> {
        let data = self
            .data
            .read()
            .map_err(|e| BkvError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.clone())
    }

    /// Mutate the workspace in place.
    ///
    /// Changes made before the closure returns an error are kept, so
    /// closures validate before they mutate.
    pub fn update<R, F>(&self, f: F) -> Result<R, BkvError>
    where
        F: FnOnce(&mut Workspace<S>) -> Result<R, BkvError>,
    {
        let mut data = self
            .data
            .write()
            .map_err(|e| BkvError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        f(&mut data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AppState, EuerState};
    use crate::normalize::{
        migrate_legacy_ledger_state, migrate_legacy_state, normalize_ledger_workspace,
        normalize_workspace,
    };
    use crate::storage::store::{
        LEDGER_WORKSPACE_KEY, LEGACY_LEDGER_STATE_KEY, LEGACY_STATE_KEY, WORKSPACE_KEY,
    };
    use serde_json::json;
    use tempfile::TempDir;

    fn settlement_repo(store: &KeyValueStore) -> WorkspaceRepository<AppState> {
        WorkspaceRepository::new(
            store.clone(),
            WORKSPACE_KEY,
            LEGACY_STATE_KEY,
            normalize_workspace,
            migrate_legacy_state,
        )
    }

    #[test]
    fn test_load_empty_store_gives_default() {
        let temp_dir = TempDir::new().unwrap();
        let store = KeyValueStore::new(temp_dir.path().to_path_buf());
        let repo = settlement_repo(&store);

        repo.load().unwrap();
        let ws = repo.get().unwrap();
        assert_eq!(ws.documents.len(), 1);
        assert_eq!(ws.documents[0].state.parties.len(), 3);
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let store = KeyValueStore::new(temp_dir.path().to_path_buf());
        let repo = settlement_repo(&store);
        repo.load().unwrap();

        repo.update(|ws| {
            ws.documents[0].name = "2024".into();
            ws.documents[0].state.total_amount = 1200.0;
            Ok(())
        })
        .unwrap();
        repo.save().unwrap();

        let reloaded = settlement_repo(&store);
        reloaded.load().unwrap();
        let ws = reloaded.get().unwrap();
        assert_eq!(ws.documents[0].name, "2024");
        assert_eq!(ws.documents[0].state.total_amount, 1200.0);
        assert_eq!(ws, repo.get().unwrap());
    }

    #[test]
    fn test_legacy_state_migrated_when_workspace_missing() {
        let temp_dir = TempDir::new().unwrap();
        let store = KeyValueStore::new(temp_dir.path().to_path_buf());
        store
            .save(LEGACY_STATE_KEY, &json!({"totalAmount": 900, "parties": [{"name": "Alt"}]}))
            .unwrap();

        let repo = settlement_repo(&store);
        repo.load().unwrap();
        let ws = repo.get().unwrap();
        assert_eq!(ws.documents[0].state.total_amount, 900.0);
        assert_eq!(ws.documents[0].state.parties[0].name, "Alt");
    }

    #[test]
    fn test_stored_workspace_wins_over_legacy() {
        let temp_dir = TempDir::new().unwrap();
        let store = KeyValueStore::new(temp_dir.path().to_path_buf());
        store
            .save(LEGACY_LEDGER_STATE_KEY, &json!({"entries": []}))
            .unwrap();
        store
            .save(
                LEDGER_WORKSPACE_KEY,
                &json!({
                    "schema": "betriebkostenverrechner-euer-workspace",
                    "version": 1,
                    "currentDocumentId": "a",
                    "documents": [{"id": "a", "name": "Neu", "state": {"entries": [{"amount": 5}]}}]
                }),
            )
            .unwrap();

        let repo: WorkspaceRepository<EuerState> = WorkspaceRepository::new(
            store.clone(),
            LEDGER_WORKSPACE_KEY,
            LEGACY_LEDGER_STATE_KEY,
            normalize_ledger_workspace,
            migrate_legacy_ledger_state,
        );
        repo.load().unwrap();
        let ws = repo.get().unwrap();
        assert_eq!(ws.documents[0].name, "Neu");
        assert_eq!(ws.documents[0].state.entries.len(), 1);
    }

    #[test]
    fn test_corrupt_workspace_file_replaced_by_default() {
        let temp_dir = TempDir::new().unwrap();
        let store = KeyValueStore::new(temp_dir.path().to_path_buf());
        std::fs::write(store.path_for(WORKSPACE_KEY), "{ truncated").unwrap();

        let repo = settlement_repo(&store);
        repo.load().unwrap();
        let ws = repo.get().unwrap();
        assert_eq!(ws.documents.len(), 1);
        assert_eq!(ws.documents[0].name, "Abrechnung 1");

        repo.save().unwrap();
        assert!(store.load(WORKSPACE_KEY).unwrap().is_some());
    }

    #[test]
    fn test_corrupt_workspace_file_falls_back_to_legacy() {
        let temp_dir = TempDir::new().unwrap();
        let store = KeyValueStore::new(temp_dir.path().to_path_buf());
        std::fs::write(store.path_for(WORKSPACE_KEY), "not json").unwrap();
        store
            .save(LEGACY_STATE_KEY, &json!({"totalAmount": 50, "parties": [{"name": "Alt"}]}))
            .unwrap();

        let repo = settlement_repo(&store);
        repo.load().unwrap();
        let ws = repo.get().unwrap();
        assert_eq!(ws.documents[0].state.parties[0].name, "Alt");
        assert_eq!(ws.documents[0].state.total_amount, 50.0);
    }
}
