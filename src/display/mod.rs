//! Display formatting for terminal output
//!
//! Every formatter returns a `String`; printing is left to the CLI.

pub mod document;
pub mod ledger;
pub mod report;
pub mod settlement;

pub use document::{format_document_header, format_document_list, DocumentInfo};
pub use ledger::{format_entry_list, format_euer_report, format_year_totals};
pub use settlement::{
    format_calculation, format_overview, format_party_breakdown, format_party_list,
    format_result_table, format_warnings,
};
