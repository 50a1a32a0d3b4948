//! Export module
//!
//! - JSON: settlement document export file, also read back by import
//! - YAML: the same export file in human-readable form
//! - CSV: ledger entries for spreadsheets

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{default_csv_filename, export_entries_csv};
pub use json::{
    default_export_filename, export_document_json, import_from_json, ExportFile, ImportedState,
};
pub use yaml::export_document_yaml;
