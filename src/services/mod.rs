//! Service layer
//!
//! Business logic on top of the storage layer: the pure allocation and
//! ledger calculations, plus the services that validate user changes,
//! persist them and write the audit log.

pub mod allocation;
pub mod document;
pub mod entry;
pub mod ledger;
pub mod party;
pub mod settlement;

pub use allocation::{calculate, CalculationResult, PartyResult};
pub use document::DocumentService;
pub use entry::{parse_date, EntryUpdate, LedgerService, YearSummary};
pub use ledger::{available_years, calculate_euer, entry_year, filter_entries_by_year, sorted_by_date};
pub use party::{PartyService, PartyUpdate};
pub use settlement::{summarize, SettlementSummary};
