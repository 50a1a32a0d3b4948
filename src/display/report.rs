//! Report formatting utilities for terminal output

use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};

use crate::config::Settings;
use crate::models::format_number;
use crate::models::money::format_currency;

/// Money in the configured currency
pub fn money(value: f64, settings: &Settings) -> String {
    format_currency(value, &settings.currency_symbol)
}

/// Base and heat percentages as shown in labels, e.g. `("30", "70")`
pub fn split_labels(settings: &Settings) -> (String, String) {
    let base = settings.base_ratio() * 100.0;
    (format_number(base), format_number(100.0 - base))
}

/// Render rows as a table; columns listed in `right_aligned` are
/// right-aligned
pub fn table(header: &[&str], rows: Vec<Vec<String>>, right_aligned: &[usize]) -> String {
    let mut builder = Builder::default();
    builder.push_record(header.iter().map(|h| h.to_string()));
    for row in rows {
        builder.push_record(row);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    for col in right_aligned {
        table.modify(Columns::new(*col..*col + 1), Alignment::right());
    }
    table.to_string()
}

/// Format a title underlined with a double rule
pub fn title(text: &str) -> String {
    format!("{}\n{}\n", text, double_separator(text.chars().count()))
}

/// Format a double separator line
pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}
