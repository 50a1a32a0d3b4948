//! Export and import CLI commands

use std::io::Write;
use std::path::PathBuf;

use clap::Subcommand;

use crate::error::{BkvError, BkvResult};
use crate::export::{default_export_filename, export_document_json, export_document_yaml, import_from_json};
use crate::services::DocumentService;
use crate::storage::Storage;

use super::create_output;

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export the current document as JSON (re-importable)
    Json {
        /// Output file (default: betriebskosten-<name>-<date>.json)
        output: Option<PathBuf>,
    },
    /// Export the current document as YAML
    Yaml {
        /// Output file
        output: PathBuf,
    },
}

/// Handle export commands
pub fn handle_export_command(storage: &Storage, cmd: ExportCommands) -> BkvResult<()> {
    let doc = DocumentService::settlements(storage).current()?;

    let output = match cmd {
        ExportCommands::Json { output } => {
            let output = output.unwrap_or_else(|| PathBuf::from(default_export_filename(&doc)));
            let mut writer = create_output(&output)?;
            export_document_json(&doc, &mut writer)?;
            writer.flush()?;
            output
        }
        ExportCommands::Yaml { output } => {
            let mut writer = create_output(&output)?;
            export_document_yaml(&doc, &mut writer)?;
            writer.flush()?;
            output
        }
    };

    println!("Exported '{}' to: {}", doc.name, output.display());
    Ok(())
}

/// Import a JSON file into the current document, or as a new document
pub fn handle_import(storage: &Storage, file: PathBuf, as_new: bool) -> BkvResult<()> {
    let contents = std::fs::read_to_string(&file).map_err(|e| {
        BkvError::Import(format!("Failed to read {}: {}", file.display(), e))
    })?;
    let imported = import_from_json(&contents)?;

    let service = DocumentService::settlements(storage);
    let doc = service.import(imported.state, imported.document_name.as_deref(), as_new)?;

    if as_new {
        println!("Imported as new document: {}", doc.name);
    } else {
        println!("Imported into current document: {}", doc.name);
    }
    println!("  Parteien: {}", doc.state.parties.len());
    Ok(())
}
