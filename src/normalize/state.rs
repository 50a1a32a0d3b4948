//! Normalization of a single settlement state
//!
//! Accepts a raw `AppState`, an export file wrapping one, or anything else,
//! and always produces a well-typed state in which every party has at least
//! one meter.

use serde_json::Value;

use super::{has_envelope, non_blank_string};
use crate::models::{to_non_negative_number, AppState, HeatMeter, MeterId, Party, PartyId};

/// Schema tag of the export file envelope
pub const EXPORT_SCHEMA: &str = "betriebkostenverrechner";

/// Version of the export file envelope
pub const EXPORT_VERSION: u64 = 1;

/// Rebuild a meter; `index` is its zero-based position, used for the label
pub fn normalize_meter(input: &Value, index: usize) -> HeatMeter {
    HeatMeter {
        id: non_blank_string(input.get("id"))
            .map(MeterId::from_raw)
            .unwrap_or_default(),
        label: non_blank_string(input.get("label"))
            .map(str::to_string)
            .unwrap_or_else(|| HeatMeter::default_label(index)),
        value: to_non_negative_number(input.get("value").unwrap_or(&Value::Null)),
    }
}

/// Rebuild a party; `index` is its zero-based position, used for the name
pub fn normalize_party(input: &Value, index: usize) -> Party {
    let meters = match input.get("meters").and_then(Value::as_array) {
        Some(raw) if !raw.is_empty() => raw
            .iter()
            .enumerate()
            .map(|(i, m)| normalize_meter(m, i))
            .collect(),
        _ => vec![normalize_meter(&Value::Null, 0)],
    };

    Party {
        id: non_blank_string(input.get("id"))
            .map(PartyId::from_raw)
            .unwrap_or_default(),
        name: non_blank_string(input.get("name"))
            .map(str::to_string)
            .unwrap_or_else(|| Party::default_name(index)),
        sqm: number_field(input, "sqm"),
        prepayment: number_field(input, "prepayment"),
        meters,
    }
}

/// Rebuild a settlement state from a raw state or an export file.
///
/// States written before `totalAmount` existed stored the two cost pools
/// separately; when `totalAmount` is absent their sum is used instead.
pub fn normalize_state(input: &Value) -> AppState {
    let raw = if has_envelope(input, EXPORT_SCHEMA, EXPORT_VERSION) {
        input.get("state").unwrap_or(&Value::Null)
    } else {
        input
    };

    let parties = raw
        .get("parties")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .enumerate()
                .map(|(i, p)| normalize_party(p, i))
                .collect()
        })
        .unwrap_or_default();

    let total_amount = match raw.get("totalAmount") {
        Some(v) if !v.is_null() => to_non_negative_number(v),
        _ => number_field(raw, "baseTotal") + number_field(raw, "heatTotal"),
    };

    AppState {
        total_amount,
        parties,
    }
}

fn number_field(input: &Value, key: &str) -> f64 {
    to_non_negative_number(input.get(key).unwrap_or(&Value::Null))
}
