//! YAML export of a settlement document

use std::io::Write;

use crate::error::{BkvError, BkvResult};
use crate::models::{AppState, Document};

use super::json::ExportFile;

/// Write `document` as a YAML export file with a short header comment
pub fn export_document_yaml<W: Write>(
    document: &Document<AppState>,
    writer: &mut W,
) -> BkvResult<()> {
    let export = ExportFile::from_document(document);

    writeln!(writer, "# Betriebskosten export: {}", document.name)
        .map_err(|e| BkvError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", export.exported_at)
        .map_err(|e| BkvError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| BkvError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export)?;

    Ok(())
}
