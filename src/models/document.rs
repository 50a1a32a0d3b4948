//! Documents and workspaces
//!
//! A workspace is the persisted collection of named documents plus the
//! reference to the document currently being edited. Settlement documents
//! and ledger documents share this structure and differ only in their state.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::ids::DocumentId;
use super::ledger::EuerState;
use super::state::AppState;

/// Schema tag of the settlement workspace
pub const WORKSPACE_SCHEMA: &str = "betriebkostenverrechner-workspace";

/// Schema tag of the ledger workspace
pub const LEDGER_WORKSPACE_SCHEMA: &str = "betriebkostenverrechner-euer-workspace";

/// Version shared by both workspace envelopes
pub const WORKSPACE_VERSION: u64 = 1;

/// State types that can live inside a workspace document
pub trait DocumentState: Clone + Default + Serialize + DeserializeOwned {
    /// Schema tag written into the workspace envelope
    const SCHEMA: &'static str;

    /// Name given to a newly created document at the 1-based `position`
    fn default_document_name(position: usize) -> String;
}

impl DocumentState for AppState {
    const SCHEMA: &'static str = WORKSPACE_SCHEMA;

    fn default_document_name(position: usize) -> String {
        format!("Abrechnung {}", position)
    }
}

impl DocumentState for EuerState {
    const SCHEMA: &'static str = LEDGER_WORKSPACE_SCHEMA;

    fn default_document_name(position: usize) -> String {
        if position <= 1 {
            "EÜR".to_string()
        } else {
            format!("EÜR {}", position)
        }
    }
}

/// A named, timestamped document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document<S> {
    pub id: DocumentId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub state: S,
}

impl<S> Document<S> {
    /// Create a document with fresh id and timestamps
    pub fn new(name: impl Into<String>, state: S) -> Self {
        let now = Utc::now();
        Self {
            id: DocumentId::new(),
            name: name.into(),
            created_at: now,
            updated_at: now,
            state,
        }
    }

    /// Mark the document as modified now
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Persisted collection of documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace<S> {
    pub schema: String,
    pub version: u64,
    pub current_document_id: DocumentId,
    pub documents: Vec<Document<S>>,
}

impl<S: DocumentState> Workspace<S> {
    /// Workspace holding exactly one document, which is current
    pub fn with_document(document: Document<S>) -> Self {
        Self {
            schema: S::SCHEMA.to_string(),
            version: WORKSPACE_VERSION,
            current_document_id: document.id.clone(),
            documents: vec![document],
        }
    }

    /// Workspace with one default document
    pub fn new_default() -> Self {
        Self::with_document(Document::new(S::default_document_name(1), S::default()))
    }
}

impl<S> Workspace<S> {
    /// The current document, falling back to the first one
    pub fn current(&self) -> Option<&Document<S>> {
        self.documents
            .iter()
            .find(|d| d.id == self.current_document_id)
            .or_else(|| self.documents.first())
    }

    /// Mutable access to the current document, falling back to the first one
    pub fn current_mut(&mut self) -> Option<&mut Document<S>> {
        let idx = self
            .documents
            .iter()
            .position(|d| d.id == self.current_document_id)
            .unwrap_or(0);
        self.documents.get_mut(idx)
    }

    /// Find a document by name (case-insensitive), id, or 1-based position
    pub fn find(&self, identifier: &str) -> Option<usize> {
        let needle = identifier.trim();
        let lower = needle.to_lowercase();

        self.documents
            .iter()
            .position(|d| d.name.to_lowercase() == lower)
            .or_else(|| self.documents.iter().position(|d| d.id.as_str() == needle))
            .or_else(|| {
                needle
                    .parse::<usize>()
                    .ok()
                    .filter(|n| *n >= 1 && *n <= self.documents.len())
                    .map(|n| n - 1)
            })
    }

    /// Put a document at the front and make it current
    pub fn push_front(&mut self, document: Document<S>) {
        self.current_document_id = document.id.clone();
        self.documents.insert(0, document);
    }

    /// Whether the given document is the current one
    pub fn is_current(&self, id: &DocumentId) -> bool {
        self.current().map(|d| &d.id == id).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_default_settlement_workspace() {
        let ws: Workspace<AppState> = Workspace::new_default();
        assert_eq!(ws.schema, WORKSPACE_SCHEMA);
        assert_eq!(ws.version, 1);
        assert_eq!(ws.documents.len(), 1);
        assert_eq!(ws.documents[0].name, "Abrechnung 1");
        assert_eq!(ws.current().unwrap().id, ws.current_document_id);
    }

    #[test]
    fn test_new_default_ledger_workspace() {
        let ws: Workspace<EuerState> = Workspace::new_default();
        assert_eq!(ws.schema, LEDGER_WORKSPACE_SCHEMA);
        assert_eq!(ws.documents[0].name, "EÜR");
        assert_eq!(ws.documents[0].state.entries.len(), 2);
    }

    #[test]
    fn test_current_falls_back_to_first() {
        let mut ws: Workspace<AppState> = Workspace::new_default();
        ws.current_document_id = DocumentId::from_raw("gone");
        assert_eq!(ws.current().unwrap().name, "Abrechnung 1");
        assert!(ws.current_mut().is_some());
    }

    #[test]
    fn test_push_front_becomes_current() {
        let mut ws: Workspace<AppState> = Workspace::new_default();
        let doc = Document::new("Abrechnung 2", AppState::default());
        let id = doc.id.clone();
        ws.push_front(doc);

        assert_eq!(ws.documents[0].id, id);
        assert!(ws.is_current(&id));
        assert_eq!(ws.find("abrechnung 1"), Some(1));
        assert_eq!(ws.find("1"), Some(0));
    }

    #[test]
    fn test_envelope_serialization_shape() {
        let ws: Workspace<AppState> = Workspace::new_default();
        let json = serde_json::to_value(&ws).unwrap();
        assert_eq!(json["schema"], WORKSPACE_SCHEMA);
        assert_eq!(json["version"], 1);
        assert!(json["currentDocumentId"].is_string());
        assert!(json["documents"][0]["createdAt"].is_string());
        assert!(json["documents"][0]["state"]["totalAmount"].is_number());
    }
}
