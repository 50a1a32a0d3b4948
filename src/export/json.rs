//! JSON export and import of a settlement document
//!
//! The export file wraps one document's state in a versioned envelope. The
//! import side accepts that envelope or a bare state and repairs it through
//! normalization.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::error::{BkvError, BkvResult};
use crate::models::{AppState, Document};
use crate::normalize::{normalize_state, EXPORT_SCHEMA, EXPORT_VERSION};

/// Exported settlement document
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportFile {
    pub schema: String,
    pub version: u64,
    pub exported_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_name: Option<String>,
    pub state: AppState,
}

impl ExportFile {
    /// Wrap a state for export
    pub fn new(state: AppState, document_name: Option<String>) -> Self {
        Self {
            schema: EXPORT_SCHEMA.to_string(),
            version: EXPORT_VERSION,
            exported_at: Utc::now(),
            document_name,
            state,
        }
    }

    pub fn from_document(document: &Document<AppState>) -> Self {
        Self::new(document.state.clone(), Some(document.name.clone()))
    }
}

/// A parsed import file
#[derive(Debug, Clone)]
pub struct ImportedState {
    pub state: AppState,
    /// `documentName` of the file, if it carried a string there
    pub document_name: Option<String>,
}

/// Suggested file name for exporting `document`.
///
/// Whitespace, path separators and characters Windows rejects in file
/// names become `_`, so the name always stays in the working directory.
pub fn default_export_filename(document: &Document<AppState>) -> String {
    let stem: String = document
        .name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_whitespace() || c.is_control() => '_',
            c => c,
        })
        .collect();

    format!(
        "betriebskosten-{}-{}.json",
        stem,
        Utc::now().format("%Y-%m-%d")
    )
}

/// Write `document` as a pretty-printed export file
pub fn export_document_json<W: Write>(
    document: &Document<AppState>,
    writer: &mut W,
) -> BkvResult<()> {
    let export = ExportFile::from_document(document);
    serde_json::to_writer_pretty(&mut *writer, &export)
        .map_err(|e| BkvError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| BkvError::Export(e.to_string()))?;
    Ok(())
}

/// Parse an import file.
///
/// Fails only on invalid JSON or when no party survives normalization.
pub fn import_from_json(json_str: &str) -> BkvResult<ImportedState> {
    let value: Value =
        serde_json::from_str(json_str).map_err(|e| BkvError::Import(e.to_string()))?;

    let state = normalize_state(&value);
    if state.parties.is_empty() {
        return Err(BkvError::Import(
            "Keine Parteien in der Datei gefunden.".into(),
        ));
    }

    let document_name = value
        .get("documentName")
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok(ImportedState {
        state,
        document_name,
    })
}
