//! Normalization of the settlement workspace

use chrono::Utc;
use serde_json::Value;

use super::state::normalize_state;
use super::{has_envelope, string_value, timestamp_value};
use crate::models::{
    AppState, Document, DocumentId, DocumentState, Workspace, WORKSPACE_SCHEMA, WORKSPACE_VERSION,
};

/// Name given to a document created from non-workspace input
const IMPORTED_DOCUMENT_NAME: &str = "Import";

/// Rebuild a settlement workspace from arbitrary input.
///
/// - A valid envelope has each document rebuilt; documents whose state holds
///   no parties are dropped. If none survive, one fresh default document is
///   used. The stored current document is kept only if it survived.
/// - Anything else is read as a raw state or export file; if that yields at
///   least one party it becomes a single `"Import"` document, otherwise a
///   fresh default workspace is returned.
pub fn normalize_workspace(input: &Value) -> Workspace<AppState> {
    let documents = match input.get("documents").and_then(Value::as_array) {
        Some(docs) if has_envelope(input, WORKSPACE_SCHEMA, WORKSPACE_VERSION) => docs,
        _ => {
            let state = normalize_state(input);
            if state.parties.is_empty() {
                return Workspace::new_default();
            }
            return Workspace::with_document(Document::new(IMPORTED_DOCUMENT_NAME, state));
        }
    };

    let documents: Vec<Document<AppState>> = documents
        .iter()
        .enumerate()
        .map(|(idx, d)| normalize_document(d, idx))
        .filter(|d| !d.state.parties.is_empty())
        .collect();

    if documents.is_empty() {
        return Workspace::new_default();
    }

    let current_document_id = string_value(input.get("currentDocumentId"))
        .filter(|id| documents.iter().any(|d| d.id.as_str() == *id))
        .map(DocumentId::from_raw)
        .unwrap_or_else(|| documents[0].id.clone());

    Workspace {
        schema: WORKSPACE_SCHEMA.to_string(),
        version: WORKSPACE_VERSION,
        current_document_id,
        documents,
    }
}

/// Wrap a state saved under the legacy single-state key into a workspace
pub fn migrate_legacy_state(input: &Value) -> Workspace<AppState> {
    let state = normalize_state(input);
    Workspace::with_document(Document::new(AppState::default_document_name(1), state))
}

fn normalize_document(input: &Value, idx: usize) -> Document<AppState> {
    let now = Utc::now();

    Document {
        id: string_value(input.get("id"))
            .map(DocumentId::from_raw)
            .unwrap_or_default(),
        name: string_value(input.get("name"))
            .map(str::to_string)
            .unwrap_or_else(|| AppState::default_document_name(idx + 1)),
        created_at: timestamp_value(input.get("createdAt")).unwrap_or(now),
        updated_at: timestamp_value(input.get("updatedAt")).unwrap_or(now),
        state: normalize_state(input.get("state").unwrap_or(&Value::Null)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(id: &str, name: &str, parties: Value) -> Value {
        json!({
            "id": id,
            "name": name,
            "createdAt": "2024-01-01T00:00:00.000Z",
            "updatedAt": "2024-02-01T00:00:00.000Z",
            "state": {"totalAmount": 100, "parties": parties}
        })
    }

    fn envelope(current: &str, docs: Vec<Value>) -> Value {
        json!({
            "schema": WORKSPACE_SCHEMA,
            "version": 1,
            "currentDocumentId": current,
            "documents": docs
        })
    }

    #[test]
    fn test_valid_workspace_round_trips() {
        let input = envelope(
            "d2",
            vec![
                doc("d1", "Abrechnung 1", json!([{"name": "A"}])),
                doc("d2", "2023", json!([{"name": "B"}, {"name": "C"}])),
            ],
        );
        let ws = normalize_workspace(&input);

        assert_eq!(ws.documents.len(), 2);
        assert_eq!(ws.current_document_id.as_str(), "d2");
        assert_eq!(ws.current().unwrap().state.parties.len(), 2);
        assert_eq!(
            ws.documents[0].created_at.to_rfc3339(),
            "2024-01-01T00:00:00+00:00"
        );
    }

    #[test]
    fn test_documents_without_parties_are_dropped() {
        let input = envelope(
            "d1",
            vec![
                doc("d1", "leer", json!([])),
                doc("d2", "voll", json!([{"name": "A"}])),
            ],
        );
        let ws = normalize_workspace(&input);

        assert_eq!(ws.documents.len(), 1);
        assert_eq!(ws.documents[0].name, "voll");
        // d1 did not survive, so current falls back to the first document
        assert_eq!(ws.current_document_id.as_str(), "d2");
    }

    #[test]
    fn test_empty_collection_falls_back_to_fresh_document() {
        let ws = normalize_workspace(&envelope("x", vec![doc("d1", "leer", json!([]))]));
        assert_eq!(ws.documents.len(), 1);
        assert_eq!(ws.documents[0].name, "Abrechnung 1");
        assert_eq!(ws.documents[0].state.parties.len(), 3);
        assert_eq!(ws.current_document_id, ws.documents[0].id);
    }

    #[test]
    fn test_document_field_defaults() {
        let input = envelope("", vec![json!({"state": {"parties": [{}]}}), json!({"name": 3, "state": {"parties": [{}]}})]);
        let ws = normalize_workspace(&input);

        assert_eq!(ws.documents[0].name, "Abrechnung 1");
        assert_eq!(ws.documents[1].name, "Abrechnung 2");
        assert_ne!(ws.documents[0].id, ws.documents[1].id);
    }

    #[test]
    fn test_wrong_version_is_not_a_workspace() {
        let mut input = envelope("d1", vec![doc("d1", "A", json!([{"name": "A"}]))]);
        input["version"] = json!(2);
        let ws = normalize_workspace(&input);

        assert_eq!(ws.documents.len(), 1);
        assert_eq!(ws.documents[0].name, "Abrechnung 1");
    }

    #[test]
    fn test_raw_state_is_wrapped_as_import() {
        let ws = normalize_workspace(&json!({"totalAmount": 500, "parties": [{"name": "A"}]}));
        assert_eq!(ws.documents.len(), 1);
        assert_eq!(ws.documents[0].name, "Import");
        assert_eq!(ws.documents[0].state.total_amount, 500.0);
    }

    #[test]
    fn test_garbage_yields_default_workspace() {
        for input in [Value::Null, json!(17), json!("x"), json!({"documents": 5})] {
            let ws = normalize_workspace(&input);
            assert_eq!(ws.documents.len(), 1);
            assert!(ws.current().is_some());
        }
    }

    #[test]
    fn test_migrate_legacy_state() {
        let ws = migrate_legacy_state(&json!({"baseTotal": 30, "heatTotal": 70, "parties": [{"name": "Alt"}]}));
        assert_eq!(ws.documents[0].name, "Abrechnung 1");
        assert_eq!(ws.documents[0].state.total_amount, 100.0);
        assert_eq!(ws.documents[0].state.parties[0].name, "Alt");
    }
}
