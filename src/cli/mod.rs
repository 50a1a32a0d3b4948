//! CLI command handlers
//!
//! Bridges the clap argument parsing with the service layer.

pub mod document;
pub mod ledger;
pub mod party;
pub mod settlement;
pub mod transfer;

pub use document::{handle_document_command, handle_ledger_document_command, DocumentCommands};
pub use ledger::{handle_euer_command, EuerCommands};
pub use party::{handle_meter_command, handle_party_command, MeterCommands, PartyCommands};
pub use settlement::{handle_calc, handle_report, handle_reset, handle_total};
pub use transfer::{handle_export_command, handle_import, ExportCommands};

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::error::{BkvError, BkvResult};

/// Parse an amount typed by the user.
///
/// Accepts `1234.56` as well as the German `1.234,56`.
pub fn parse_amount(input: &str, what: &str) -> BkvResult<f64> {
    let trimmed = input.trim().trim_start_matches('€').trim();
    let normalized = if trimmed.contains(',') {
        trimmed.replace('.', "").replace(',', ".")
    } else {
        trimmed.to_string()
    };

    match normalized.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(BkvError::Validation(format!(
            "Invalid {}: '{}'. Use a non-negative number like '1234.56' or '1.234,56'.",
            what,
            input.trim()
        ))),
    }
}

fn create_output(path: &Path) -> BkvResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        BkvError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1234.56", "amount").unwrap(), 1234.56);
        assert_eq!(parse_amount("1.234,56", "amount").unwrap(), 1234.56);
        assert_eq!(parse_amount(" 12,5 ", "amount").unwrap(), 12.5);
        assert_eq!(parse_amount("€ 80", "amount").unwrap(), 80.0);
        assert!(parse_amount("-5", "amount").unwrap_err().is_validation());
        assert!(parse_amount("abc", "amount").is_err());
        assert!(parse_amount("inf", "amount").is_err());
    }
}
