//! Storage initialization
//!
//! Handles first-run setup: directories, settings and both workspace files.

use crate::config::{BkvPaths, Settings};
use crate::error::BkvResult;
use crate::models::{AppState, EuerState, Workspace};

use super::store::{KeyValueStore, LEDGER_WORKSPACE_KEY, WORKSPACE_KEY};

/// Initialize storage for a fresh installation.
///
/// Existing files are left untouched, so running this twice is harmless.
pub fn initialize_storage(paths: &BkvPaths) -> BkvResult<Settings> {
    paths.ensure_directories()?;

    let settings = Settings::load_or_create(paths)?;
    if !paths.is_initialized() {
        settings.save(paths)?;
    }

    let store = KeyValueStore::new(paths.data_dir());
    if !store.contains(WORKSPACE_KEY) {
        store.save(WORKSPACE_KEY, &Workspace::<AppState>::new_default())?;
    }
    if !store.contains(LEDGER_WORKSPACE_KEY) {
        store.save(LEDGER_WORKSPACE_KEY, &Workspace::<EuerState>::new_default())?;
    }

    Ok(settings)
}
