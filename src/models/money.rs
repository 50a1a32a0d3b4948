//! Money and quantity formatting
//!
//! Amounts are plain `f64` values that have already been passed through
//! `round2`; this module only renders them in the Austrian German style
//! (`€ 1.234,56`, thousands separated by `.`, decimal comma).

/// Format an amount in euro with exactly two decimals, e.g. `€ 1.234,56`.
///
/// Non-finite values render as zero.
pub fn format_eur(value: f64) -> String {
    format_currency(value, "€")
}

/// Format an amount with an arbitrary currency symbol placed before the number
pub fn format_currency(value: f64, symbol: &str) -> String {
    let safe = if value.is_finite() { value } else { 0.0 };
    let cents = (safe.abs() * 100.0).round() as u64;
    let body = format!(
        "{},{:02}",
        group_thousands(cents / 100),
        cents % 100
    );

    if safe < 0.0 && cents > 0 {
        format!("-{} {}", symbol, body)
    } else {
        format!("{} {}", symbol, body)
    }
}

/// Format a quantity (floor area, meter reading) with up to two decimals and
/// no trailing zeros, e.g. `1.234,5` or `50`.
pub fn format_number(value: f64) -> String {
    let safe = if value.is_finite() { value } else { 0.0 };
    let hundredths = (safe.abs() * 100.0).round() as u64;
    let whole = group_thousands(hundredths / 100);
    let frac = hundredths % 100;

    let body = if frac == 0 {
        whole
    } else if frac % 10 == 0 {
        format!("{},{}", whole, frac / 10)
    } else {
        format!("{},{:02}", whole, frac)
    };

    if safe < 0.0 && hundredths > 0 {
        format!("-{}", body)
    } else {
        body
    }
}

/// Format a number the way a decimal-comma spreadsheet expects it:
/// shortest round-trip representation with `.` replaced by `,`.
pub fn decimal_comma(value: f64) -> String {
    value.to_string().replacen('.', ",", 1)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}
