//! EÜR totals
//!
//! Year filtering and income/expense sums over ledger entries.

use crate::models::{non_negative, parse_loose_number, round2, EntryType, EuerEntry, EuerTotals};

/// Year of an entry, read from the first four characters of its date
pub fn entry_year(entry: &EuerEntry) -> Option<i32> {
    let prefix: String = entry.date.chars().take(4).collect();
    if prefix.chars().count() < 4 {
        return None;
    }

    let year = parse_loose_number(&prefix)?;
    if year.is_finite() && year.fract() == 0.0 {
        Some(year as i32)
    } else {
        None
    }
}

/// Distinct years across entries, newest first. Year 0 is skipped.
pub fn available_years(entries: &[EuerEntry]) -> Vec<i32> {
    let mut years: Vec<i32> = entries
        .iter()
        .filter_map(entry_year)
        .filter(|y| *y != 0)
        .collect();
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();
    years
}

/// Entries dated in `year`
pub fn filter_entries_by_year(entries: &[EuerEntry], year: i32) -> Vec<EuerEntry> {
    entries
        .iter()
        .filter(|e| entry_year(e) == Some(year))
        .cloned()
        .collect()
}

/// Sum income and expense entries.
///
/// The surplus is taken from the unrounded sums and rounded once.
pub fn calculate_euer(entries: &[EuerEntry]) -> EuerTotals {
    let sum_of = |kind: EntryType| -> f64 {
        entries
            .iter()
            .filter(|e| e.entry_type == kind)
            .map(|e| non_negative(e.amount))
            .sum()
    };

    let income = sum_of(EntryType::Income);
    let expense = sum_of(EntryType::Expense);

    EuerTotals {
        income: round2(income),
        expense: round2(expense),
        surplus: round2(income - expense),
    }
}

/// Entries sorted by date string, oldest first (stable)
pub fn sorted_by_date(entries: &[EuerEntry]) -> Vec<EuerEntry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| a.date.cmp(&b.date));
    sorted
}
