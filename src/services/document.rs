//! Document service
//!
//! Manages the documents of a workspace: create, rename, duplicate, delete,
//! select and reset. The same service drives settlement documents and
//! ledger documents.

use chrono::Local;

use crate::audit::EntityType;
use crate::error::{BkvError, BkvResult};
use crate::models::{AppState, Document, DocumentState, EuerState, Workspace};
use crate::storage::{Storage, WorkspaceRepository};

/// Service for document management in one workspace
pub struct DocumentService<'a, S: DocumentState> {
    storage: &'a Storage,
    repo: &'a WorkspaceRepository<S>,
    entity_type: EntityType,
}

impl<'a> DocumentService<'a, AppState> {
    /// Documents of the settlement workspace
    pub fn settlements(storage: &'a Storage) -> Self {
        Self {
            storage,
            repo: &storage.settlements,
            entity_type: EntityType::Document,
        }
    }

    /// Set the total amount of the current document
    pub fn set_total_amount(&self, amount: f64) -> BkvResult<Document<AppState>> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(BkvError::Validation(format!(
                "Total amount must be a non-negative number, got {}",
                amount
            )));
        }

        self.update_current(|state| {
            state.total_amount = amount;
            Ok(())
        })?;
        self.current()
    }

    /// Import a normalized state, either replacing the current document's
    /// state or as a new document that becomes current.
    ///
    /// A new document is named `document_name` when non-blank, else
    /// `Import <date>`.
    pub fn import(
        &self,
        state: AppState,
        document_name: Option<&str>,
        as_new: bool,
    ) -> BkvResult<Document<AppState>> {
        if state.parties.is_empty() {
            return Err(BkvError::Import(
                "Keine Parteien in der Datei gefunden.".into(),
            ));
        }

        if !as_new {
            self.update_current(|current| {
                *current = state;
                Ok(())
            })?;
            return self.current();
        }

        let name = match document_name {
            Some(name) if !name.trim().is_empty() => name.to_string(),
            _ => format!("Import {}", Local::now().format("%d.%m.%Y")),
        };
        self.add_document(Document::new(name, state))
    }
}

impl<'a> DocumentService<'a, EuerState> {
    /// Documents of the ledger workspace
    pub fn ledger(storage: &'a Storage) -> Self {
        Self {
            storage,
            repo: &storage.ledger,
            entity_type: EntityType::LedgerDocument,
        }
    }
}

impl<'a, S: DocumentState> DocumentService<'a, S> {
    /// Snapshot of the whole workspace
    pub fn workspace(&self) -> BkvResult<Workspace<S>> {
        self.repo.get()
    }

    /// All documents, in workspace order (newest first)
    pub fn list(&self) -> BkvResult<Vec<Document<S>>> {
        Ok(self.repo.get()?.documents)
    }

    /// The document currently being edited
    pub fn current(&self) -> BkvResult<Document<S>> {
        self.repo
            .get()?
            .current()
            .cloned()
            .ok_or_else(|| BkvError::Storage("Workspace has no documents".into()))
    }

    /// Find a document by name, ID or 1-based position
    pub fn find(&self, identifier: &str) -> BkvResult<Document<S>> {
        let ws = self.repo.get()?;
        ws.find(identifier)
            .map(|idx| ws.documents[idx].clone())
            .ok_or_else(|| BkvError::document_not_found(identifier))
    }

    /// Create a document with default state; it becomes current
    pub fn create(&self, name: Option<&str>) -> BkvResult<Document<S>> {
        let count = self.repo.get()?.documents.len();
        let name = match name.map(str::trim) {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => S::default_document_name(count + 1),
        };
        self.add_document(Document::new(name, S::default()))
    }

    /// Rename a document
    pub fn rename(&self, identifier: &str, name: &str) -> BkvResult<Document<S>> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BkvError::Validation("Document name cannot be empty".into()));
        }

        let (before, after) = self.repo.update(|ws| {
            let idx = ws
                .find(identifier)
                .ok_or_else(|| BkvError::document_not_found(identifier))?;
            let before = ws.documents[idx].clone();
            let doc = &mut ws.documents[idx];
            doc.name = name.to_string();
            doc.touch();
            Ok((before, doc.clone()))
        })?;
        self.repo.save()?;

        self.storage.log_update(
            self.entity_type,
            after.id.to_string(),
            Some(after.name.clone()),
            &before,
            &after,
        )?;

        Ok(after)
    }

    /// Copy a document as `<name> (Kopie)`; the copy becomes current
    pub fn duplicate(&self, identifier: &str) -> BkvResult<Document<S>> {
        let source = self.find(identifier)?;
        let copy = Document::new(format!("{} (Kopie)", source.name), source.state);
        self.add_document(copy)
    }

    /// Delete a document. The last remaining document cannot be deleted.
    ///
    /// When the current document is deleted, the first remaining document
    /// becomes current.
    pub fn delete(&self, identifier: &str) -> BkvResult<Document<S>> {
        let removed = self.repo.update(|ws| {
            let idx = ws
                .find(identifier)
                .ok_or_else(|| BkvError::document_not_found(identifier))?;
            if ws.documents.len() <= 1 {
                return Err(BkvError::Validation(
                    "Cannot delete the only remaining document".into(),
                ));
            }

            let was_current = ws.is_current(&ws.documents[idx].id);
            let removed = ws.documents.remove(idx);
            if was_current {
                ws.current_document_id = ws.documents[0].id.clone();
            }
            Ok(removed)
        })?;
        self.repo.save()?;

        self.storage.log_delete(
            self.entity_type,
            removed.id.to_string(),
            Some(removed.name.clone()),
            &removed,
        )?;

        Ok(removed)
    }

    /// Make a document current
    pub fn select(&self, identifier: &str) -> BkvResult<Document<S>> {
        let selected = self.repo.update(|ws| {
            let idx = ws
                .find(identifier)
                .ok_or_else(|| BkvError::document_not_found(identifier))?;
            ws.current_document_id = ws.documents[idx].id.clone();
            Ok(ws.documents[idx].clone())
        })?;
        self.repo.save()?;
        Ok(selected)
    }

    /// Reset the current document's state to the default state
    pub fn reset(&self) -> BkvResult<Document<S>> {
        self.update_current(|state| {
            *state = S::default();
            Ok(())
        })?;
        self.current()
    }

    /// Mutate the state of the current document, then save and audit it.
    ///
    /// `f` must validate before it mutates; on error nothing is saved.
    pub fn update_current<R, F>(&self, f: F) -> BkvResult<R>
    where
        F: FnOnce(&mut S) -> BkvResult<R>,
    {
        let (before, after, result) = self.repo.update(|ws| {
            let doc = ws
                .current_mut()
                .ok_or_else(|| BkvError::Storage("Workspace has no documents".into()))?;
            let before = doc.clone();
            let result = f(&mut doc.state)?;
            doc.touch();
            Ok((before, doc.clone(), result))
        })?;
        self.repo.save()?;

        self.storage.log_update(
            self.entity_type,
            after.id.to_string(),
            Some(after.name.clone()),
            &before.state,
            &after.state,
        )?;

        Ok(result)
    }

    fn add_document(&self, document: Document<S>) -> BkvResult<Document<S>> {
        self.repo.update(|ws| {
            ws.push_front(document.clone());
            Ok(())
        })?;
        self.repo.save()?;

        self.storage.log_create(
            self.entity_type,
            document.id.to_string(),
            Some(document.name.clone()),
            &document,
        )?;

        Ok(document)
    }
}
