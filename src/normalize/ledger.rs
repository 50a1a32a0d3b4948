//! Normalization of the EÜR ledger workspace

use chrono::Utc;
use serde_json::Value;

use super::{has_envelope, non_blank_string, string_value, timestamp_value};
use crate::models::ledger::today_iso;
use crate::models::{
    Document, DocumentId, DocumentState, EntryId, EntryType, EuerEntry, EuerState, Workspace,
    LEDGER_WORKSPACE_SCHEMA, WORKSPACE_VERSION,
};

/// Rebuild a ledger entry. Non-object input yields `None`.
///
/// Unlike settlement numbers, the amount is not coerced from strings: only a
/// finite JSON number is kept, anything else becomes 0.
pub fn normalize_entry(input: &Value) -> Option<EuerEntry> {
    input.as_object()?;

    let entry_type = match string_value(input.get("type")) {
        Some("expense") => EntryType::Expense,
        _ => EntryType::Income,
    };

    Some(EuerEntry {
        id: string_value(input.get("id"))
            .map(EntryId::from_raw)
            .unwrap_or_default(),
        date: string_value(input.get("date"))
            .map(str::to_string)
            .unwrap_or_else(today_iso),
        entry_type,
        category: owned_string(input.get("category")),
        description: owned_string(input.get("description")),
        amount: input
            .get("amount")
            .and_then(Value::as_f64)
            .filter(|v| v.is_finite())
            .unwrap_or(0.0),
    })
}

/// Rebuild a ledger state. Input without an `entries` array yields the
/// default sample state; non-object entries are skipped.
pub fn normalize_ledger_state(input: &Value) -> EuerState {
    if !input.is_object() {
        return EuerState::default();
    }

    match input.get("entries").and_then(Value::as_array) {
        Some(raw) => EuerState {
            entries: raw.iter().filter_map(normalize_entry).collect(),
        },
        None => EuerState::default(),
    }
}

/// Rebuild a ledger workspace from arbitrary input.
///
/// A bare legacy state (an object with an `entries` array) is wrapped into a
/// single document. Input without a valid envelope yields a default
/// workspace. Documents are never dropped here, an empty ledger is valid.
pub fn normalize_ledger_workspace(input: &Value) -> Workspace<EuerState> {
    if !input.is_object() {
        return Workspace::new_default();
    }

    if input.get("entries").map(Value::is_array).unwrap_or(false) {
        return migrate_legacy_ledger_state(input);
    }

    let docs = match input.get("documents").and_then(Value::as_array) {
        Some(docs) if has_envelope(input, LEDGER_WORKSPACE_SCHEMA, WORKSPACE_VERSION) => docs,
        _ => return Workspace::new_default(),
    };

    let documents: Vec<Document<EuerState>> =
        docs.iter().filter_map(normalize_ledger_document).collect();

    if documents.is_empty() {
        return Workspace::new_default();
    }

    let current_document_id = string_value(input.get("currentDocumentId"))
        .filter(|id| documents.iter().any(|d| d.id.as_str() == *id))
        .map(DocumentId::from_raw)
        .unwrap_or_else(|| documents[0].id.clone());

    Workspace {
        schema: LEDGER_WORKSPACE_SCHEMA.to_string(),
        version: WORKSPACE_VERSION,
        current_document_id,
        documents,
    }
}

/// Wrap a ledger state saved under the legacy single-state key into a workspace
pub fn migrate_legacy_ledger_state(input: &Value) -> Workspace<EuerState> {
    Workspace::with_document(Document::new(
        EuerState::default_document_name(1),
        normalize_ledger_state(input),
    ))
}

fn normalize_ledger_document(input: &Value) -> Option<Document<EuerState>> {
    input.as_object()?;

    let created_at = timestamp_value(input.get("createdAt")).unwrap_or_else(Utc::now);

    Some(Document {
        id: string_value(input.get("id"))
            .map(DocumentId::from_raw)
            .unwrap_or_default(),
        name: non_blank_string(input.get("name"))
            .map(str::to_string)
            .unwrap_or_else(|| EuerState::default_document_name(1)),
        created_at,
        updated_at: timestamp_value(input.get("updatedAt")).unwrap_or(created_at),
        state: normalize_ledger_state(input.get("state").unwrap_or(&Value::Null)),
    })
}

fn owned_string(value: Option<&Value>) -> String {
    string_value(value).unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entry_defaults() {
        let entry = normalize_entry(&json!({"type": "gift", "amount": "12"})).unwrap();
        assert_eq!(entry.entry_type, EntryType::Income);
        assert_eq!(entry.amount, 0.0);
        assert_eq!(entry.category, "");
        assert_eq!(entry.description, "");
        assert_eq!(entry.date, today_iso());
    }

    #[test]
    fn test_entry_keeps_valid_fields() {
        let entry = normalize_entry(&json!({
            "id": "e1", "date": "2023-04-05", "type": "expense",
            "category": "Miete", "description": "April", "amount": 450.5
        }))
        .unwrap();
        assert_eq!(entry.id.as_str(), "e1");
        assert_eq!(entry.date, "2023-04-05");
        assert_eq!(entry.entry_type, EntryType::Expense);
        assert_eq!(entry.category, "Miete");
        assert_eq!(entry.amount, 450.5);
    }

    #[test]
    fn test_entry_keeps_negative_amount_for_later_coercion() {
        let entry = normalize_entry(&json!({"amount": -5})).unwrap();
        assert_eq!(entry.amount, -5.0);
    }

    #[test]
    fn test_non_object_entries_skipped() {
        let state = normalize_ledger_state(&json!({"entries": [1, null, {"amount": 3}]}));
        assert_eq!(state.entries.len(), 1);
        assert_eq!(state.entries[0].amount, 3.0);
    }

    #[test]
    fn test_state_without_entries_is_default() {
        assert_eq!(normalize_ledger_state(&json!({"entries": 3})).entries.len(), 2);
        assert_eq!(normalize_ledger_state(&Value::Null).entries.len(), 2);
    }

    #[test]
    fn test_legacy_state_is_wrapped() {
        let ws = normalize_ledger_workspace(&json!({"entries": [{"amount": 10}]}));
        assert_eq!(ws.documents.len(), 1);
        assert_eq!(ws.documents[0].name, "EÜR");
        assert_eq!(ws.documents[0].state.entries.len(), 1);
    }

    #[test]
    fn test_workspace_envelope() {
        let input = json!({
            "schema": LEDGER_WORKSPACE_SCHEMA,
            "version": 1,
            "currentDocumentId": "b",
            "documents": [
                {"id": "a", "name": "  ", "createdAt": "2024-01-01T00:00:00Z", "state": {"entries": []}},
                {"id": "b", "name": "2024", "state": {"entries": [{"type": "expense", "amount": 1}]}},
                "junk"
            ]
        });
        let ws = normalize_ledger_workspace(&input);

        assert_eq!(ws.documents.len(), 2);
        assert_eq!(ws.documents[0].name, "EÜR");
        assert_eq!(ws.documents[0].updated_at, ws.documents[0].created_at);
        assert!(ws.documents[0].state.entries.is_empty());
        assert_eq!(ws.current_document_id.as_str(), "b");
    }

    #[test]
    fn test_unknown_current_falls_back_to_first() {
        let input = json!({
            "schema": LEDGER_WORKSPACE_SCHEMA,
            "version": 1,
            "currentDocumentId": 5,
            "documents": [{"id": "a", "state": {"entries": []}}]
        });
        let ws = normalize_ledger_workspace(&input);
        assert_eq!(ws.current_document_id.as_str(), "a");
    }

    #[test]
    fn test_bad_envelope_yields_default() {
        let ws = normalize_ledger_workspace(&json!({"schema": "other", "version": 1, "documents": []}));
        assert_eq!(ws.documents.len(), 1);
        assert_eq!(ws.documents[0].state.entries.len(), 2);

        let ws = normalize_ledger_workspace(&json!([1, 2]));
        assert_eq!(ws.documents.len(), 1);
    }
}
