//! Document CLI commands
//!
//! The same subcommands manage settlement documents (`bkv doc`) and ledger
//! documents (`bkv euer doc`).

use clap::Subcommand;

use crate::config::Settings;
use crate::display::report::money;
use crate::display::{
    format_document_header, format_document_list, format_entry_list, format_party_list,
    DocumentInfo,
};
use crate::error::BkvResult;
use crate::models::DocumentState;
use crate::services::DocumentService;
use crate::storage::Storage;

/// Document subcommands
#[derive(Subcommand)]
pub enum DocumentCommands {
    /// List all documents
    List,
    /// Create a new document and make it current
    New {
        /// Document name (default: numbered name)
        name: Option<String>,
    },
    /// Rename a document
    Rename {
        /// Document name, ID or position
        document: String,
        /// New name
        name: String,
    },
    /// Copy a document; the copy becomes current
    Duplicate {
        /// Document name, ID or position
        document: String,
    },
    /// Delete a document (the last one cannot be deleted)
    Delete {
        /// Document name, ID or position
        document: String,
    },
    /// Make a document current
    Select {
        /// Document name, ID or position
        document: String,
    },
    /// Show a document (default: the current one)
    Show {
        /// Document name, ID or position
        document: Option<String>,
    },
}

/// Handle a settlement document command
pub fn handle_document_command(
    storage: &Storage,
    settings: &Settings,
    cmd: DocumentCommands,
) -> BkvResult<()> {
    let service = DocumentService::settlements(storage);
    match cmd {
        DocumentCommands::Show { document } => {
            let doc = match document {
                Some(d) => service.find(&d)?,
                None => service.current()?,
            };
            print!("{}", format_document_header(&doc));
            println!("Gesamtbetrag: {}", money(doc.state.total_amount, settings));
            println!("{}", format_party_list(&doc.state.parties, settings));
            Ok(())
        }
        other => run_common(&service, other),
    }
}

/// Handle a ledger document command
pub fn handle_ledger_document_command(
    storage: &Storage,
    settings: &Settings,
    cmd: DocumentCommands,
) -> BkvResult<()> {
    let service = DocumentService::ledger(storage);
    match cmd {
        DocumentCommands::Show { document } => {
            let doc = match document {
                Some(d) => service.find(&d)?,
                None => service.current()?,
            };
            print!("{}", format_document_header(&doc));
            println!("{}", format_entry_list(&doc.state.entries, settings));
            Ok(())
        }
        other => run_common(&service, other),
    }
}

fn run_common<S: DocumentState + DocumentInfo>(
    service: &DocumentService<'_, S>,
    cmd: DocumentCommands,
) -> BkvResult<()> {
    match cmd {
        DocumentCommands::List => {
            println!("{}", format_document_list(&service.workspace()?));
        }
        DocumentCommands::New { name } => {
            let doc = service.create(name.as_deref())?;
            println!("Created document: {}", doc.name);
            println!("  ID: {}", doc.id);
        }
        DocumentCommands::Rename { document, name } => {
            let doc = service.rename(&document, &name)?;
            println!("Renamed document to: {}", doc.name);
        }
        DocumentCommands::Duplicate { document } => {
            let doc = service.duplicate(&document)?;
            println!("Created copy: {}", doc.name);
        }
        DocumentCommands::Delete { document } => {
            let doc = service.delete(&document)?;
            println!("Deleted document: {}", doc.name);
            println!("Current document: {}", service.current()?.name);
        }
        DocumentCommands::Select { document } => {
            let doc = service.select(&document)?;
            println!("Current document: {}", doc.name);
        }
        DocumentCommands::Show { .. } => {
            print!("{}", format_document_header(&service.current()?));
        }
    }
    Ok(())
}
