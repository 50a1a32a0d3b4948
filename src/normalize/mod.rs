//! Normalization of untyped persisted data
//!
//! Everything read from disk or imported from a file is first parsed into a
//! `serde_json::Value` and then rebuilt here into the typed models. These
//! functions never fail: missing, mistyped or legacy fields are replaced by
//! defaults.

pub mod ledger;
pub mod state;
pub mod workspace;

pub use ledger::{migrate_legacy_ledger_state, normalize_ledger_state, normalize_ledger_workspace};
pub use state::{normalize_meter, normalize_party, normalize_state, EXPORT_SCHEMA, EXPORT_VERSION};
pub use workspace::{migrate_legacy_state, normalize_workspace};

use chrono::{DateTime, Utc};
use serde_json::Value;

/// The value as a string, if it is one
pub(crate) fn string_value(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str)
}

/// The value as a string, if it is one and is not blank
pub(crate) fn non_blank_string(value: Option<&Value>) -> Option<&str> {
    string_value(value).filter(|s| !s.trim().is_empty())
}

/// The value as an RFC 3339 timestamp, if it parses
pub(crate) fn timestamp_value(value: Option<&Value>) -> Option<DateTime<Utc>> {
    string_value(value)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

/// Whether an envelope carries the given schema tag and version
pub(crate) fn has_envelope(value: &Value, schema: &str, version: u64) -> bool {
    value.get("schema").and_then(Value::as_str) == Some(schema)
        && value.get("version").and_then(Value::as_f64) == Some(version as f64)
}
