//! Storage layer
//!
//! JSON files under the data directory, one per store key, written
//! atomically. The two workspaces (settlements and ledger) are loaded into
//! memory, mutated by services and saved back as whole snapshots.

pub mod file_io;
pub mod init;
pub mod store;
pub mod workspace;

pub use file_io::{read_json_value, write_json_atomic};
pub use init::initialize_storage;
pub use store::{
    KeyValueStore, LEDGER_WORKSPACE_KEY, LEGACY_LEDGER_STATE_KEY, LEGACY_STATE_KEY, WORKSPACE_KEY,
};
pub use workspace::WorkspaceRepository;

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::{BkvPaths, Settings};
use crate::error::BkvResult;
use crate::models::{AppState, EuerState};
use crate::normalize::{
    migrate_legacy_ledger_state, migrate_legacy_state, normalize_ledger_workspace,
    normalize_workspace,
};

/// Main storage coordinator that provides access to both workspaces
pub struct Storage {
    paths: BkvPaths,
    store: KeyValueStore,
    pub settlements: WorkspaceRepository<AppState>,
    pub ledger: WorkspaceRepository<EuerState>,
    audit: Option<AuditLogger>,
}

impl Storage {
    /// Create a storage instance; nothing is read until `load_all`
    pub fn new(paths: BkvPaths, settings: &Settings) -> BkvResult<Self> {
        paths.ensure_directories()?;

        let store = KeyValueStore::new(paths.data_dir());
        let audit = settings
            .audit_enabled
            .then(|| AuditLogger::new(paths.audit_log()));

        Ok(Self {
            settlements: WorkspaceRepository::new(
                store.clone(),
                WORKSPACE_KEY,
                LEGACY_STATE_KEY,
                normalize_workspace,
                migrate_legacy_state,
            ),
            ledger: WorkspaceRepository::new(
                store.clone(),
                LEDGER_WORKSPACE_KEY,
                LEGACY_LEDGER_STATE_KEY,
                normalize_ledger_workspace,
                migrate_legacy_ledger_state,
            ),
            store,
            paths,
            audit,
        })
    }

    pub fn store(&self) -> &KeyValueStore {
        &self.store
    }

    /// The audit logger, if auditing is enabled
    pub fn audit(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    /// Load both workspaces from disk
    pub fn load_all(&self) -> BkvResult<()> {
        self.settlements.load()?;
        self.ledger.load()?;
        Ok(())
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    /// Record a create operation
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> BkvResult<()> {
        match &self.audit {
            Some(logger) => logger.log(&AuditEntry::create(
                entity_type,
                entity_id,
                entity_name,
                entity,
            )),
            None => Ok(()),
        }
    }

    /// Record an update operation
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> BkvResult<()> {
        match &self.audit {
            Some(logger) => logger.log(&AuditEntry::update(
                entity_type,
                entity_id,
                entity_name,
                before,
                after,
            )),
            None => Ok(()),
        }
    }

    /// Record a delete operation
    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> BkvResult<()> {
        match &self.audit {
            Some(logger) => logger.log(&AuditEntry::delete(
                entity_type,
                entity_id,
                entity_name,
                entity,
            )),
            None => Ok(()),
        }
    }
}
