//! Numeric coercion and rounding
//!
//! Every number that enters a calculation passes through these helpers, so
//! negative, NaN and infinite values never reach the allocation engine.

use serde_json::Value;

/// Convert an arbitrary JSON value into a finite, non-negative number.
///
/// Conversion follows loose numeric coercion: numbers are taken as-is,
/// strings are trimmed and parsed (empty string is 0, `0x`/`0o`/`0b`
/// prefixes are honored), `null` is 0, booleans are 1/0 and a one-element
/// array coerces its element. Anything non-finite after conversion yields 0,
/// negative results are clamped to 0.
pub fn to_non_negative_number(value: &Value) -> f64 {
    coerce(value).map(non_negative).unwrap_or(0.0)
}

/// Clamp a typed number into the finite, non-negative range.
pub fn non_negative(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

/// Round to two decimals: `round((value + EPSILON) * 100) / 100`.
///
/// Ties round toward positive infinity. The result is never `-0.0`.
pub fn round2(value: f64) -> f64 {
    let rounded = round_half_up((value + f64::EPSILON) * 100.0) / 100.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

fn coerce(value: &Value) -> Option<f64> {
    match value {
        Value::Null => Some(0.0),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_loose_number(s),
        Value::Array(items) => match items.as_slice() {
            [] => Some(0.0),
            // Array elements are stringified first, so booleans do not survive
            [Value::Bool(_)] => None,
            [single] => coerce(single),
            _ => None,
        },
        Value::Object(_) => None,
    }
}

/// Parse a string as a loose numeric literal.
///
/// Returns `None` where the string is not a number at all; infinities are
/// returned as-is so callers decide how to treat them.
pub fn parse_loose_number(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return Some(0.0);
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = s.strip_prefix(prefix) {
            return u64::from_str_radix(digits, radix).ok().map(|v| v as f64);
        }
    }

    match s {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    // Rust accepts "inf"/"nan" spellings that are not numeric literals here
    if s.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
        return None;
    }

    s.parse::<f64>().ok()
}
