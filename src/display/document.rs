//! Document list formatting

use crate::models::{AppState, Document, DocumentState, EuerState, Workspace};

use super::report::table;

/// Short description of a document's content for list views
pub trait DocumentInfo {
    fn info(&self) -> String;
}

impl DocumentInfo for AppState {
    fn info(&self) -> String {
        match self.parties.len() {
            1 => "1 Partei".to_string(),
            n => format!("{} Parteien", n),
        }
    }
}

impl DocumentInfo for EuerState {
    fn info(&self) -> String {
        match self.entries.len() {
            1 => "1 Eintrag".to_string(),
            n => format!("{} Einträge", n),
        }
    }
}

/// Documents of a workspace; the current one is marked with `*`
pub fn format_document_list<S: DocumentState + DocumentInfo>(workspace: &Workspace<S>) -> String {
    let current_id = workspace.current().map(|d| d.id.clone());

    let rows = workspace
        .documents
        .iter()
        .enumerate()
        .map(|(i, d)| {
            let marker = if Some(&d.id) == current_id.as_ref() { "*" } else { "" };
            vec![
                marker.to_string(),
                (i + 1).to_string(),
                d.name.clone(),
                d.state.info(),
                d.updated_at.format("%Y-%m-%d %H:%M").to_string(),
                d.id.short().to_string(),
            ]
        })
        .collect();

    table(
        &["", "#", "Name", "Inhalt", "Geändert", "ID"],
        rows,
        &[1],
    )
}

/// Header line for a single document
pub fn format_document_header<S: DocumentInfo>(document: &Document<S>) -> String {
    format!(
        "Dokument: {} ({}, ID {})\n",
        document.name,
        document.state.info(),
        document.id.short()
    )
}
