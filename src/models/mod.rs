//! Core data models
//!
//! This module contains the data structures of both domains: cost
//! settlement (parties, meters, documents) and the EÜR ledger.

pub mod document;
pub mod ids;
pub mod ledger;
pub mod money;
pub mod number;
pub mod party;
pub mod state;

pub use document::{
    Document, DocumentState, Workspace, LEDGER_WORKSPACE_SCHEMA, WORKSPACE_SCHEMA,
    WORKSPACE_VERSION,
};
pub use ids::{DocumentId, EntryId, MeterId, PartyId};
pub use ledger::{EntryType, EuerEntry, EuerState, EuerTotals};
pub use money::{format_eur, format_number};
pub use number::{non_negative, parse_loose_number, round2, to_non_negative_number};
pub use party::{HeatMeter, Party, PartyValidationError};
pub use state::{AppState, CostPools};
