//! Audit logging
//!
//! Every persisted create, update and delete is appended to a line-delimited
//! JSON log together with the entity before and after the change.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
