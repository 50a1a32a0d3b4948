//! Ledger (EÜR) display formatting

use chrono::Local;

use crate::config::Settings;
use crate::models::{non_negative, EuerEntry};
use crate::services::{sorted_by_date, YearSummary};

use super::report::{money, table, title, truncate};

fn entry_rows(entries: &[EuerEntry], settings: &Settings, with_id: bool) -> Vec<Vec<String>> {
    entries
        .iter()
        .map(|e| {
            let mut row = Vec::with_capacity(6);
            if with_id {
                row.push(e.id.short().to_string());
            }
            row.push(e.date.clone());
            row.push(e.entry_type.to_string());
            row.push(e.category.clone());
            row.push(truncate(&e.description, 40));
            row.push(money(non_negative(e.amount), settings));
            row
        })
        .collect()
}

/// Entry list with short IDs, in stored order
pub fn format_entry_list(entries: &[EuerEntry], settings: &Settings) -> String {
    if entries.is_empty() {
        return "Keine Einträge vorhanden.".to_string();
    }

    table(
        &["ID", "Datum", "Typ", "Kategorie", "Beschreibung", "Betrag"],
        entry_rows(entries, settings, true),
        &[5],
    )
}

/// Totals of one year
pub fn format_year_totals(summary: &YearSummary, settings: &Settings) -> String {
    format!(
        "EÜR {}\n  Einnahmen:  {}\n  Ausgaben:   {}\n  Überschuss: {}\n",
        summary.year,
        money(summary.totals.income, settings),
        money(summary.totals.expense, settings),
        money(summary.totals.surplus, settings),
    )
}

/// Printable EÜR report with entries sorted by date
pub fn format_euer_report(summary: &YearSummary, settings: &Settings) -> String {
    let mut output = title(&format!(
        "Einnahmenüberschussrechnung (EÜR) {}",
        summary.year
    ));

    output.push_str(&format!(
        "Einnahmen: {}\n",
        money(summary.totals.income, settings)
    ));
    output.push_str(&format!(
        "Ausgaben: {}\n",
        money(summary.totals.expense, settings)
    ));
    output.push_str(&format!(
        "Überschuss: {}\n\n",
        money(summary.totals.surplus, settings)
    ));
    output.push_str(&format!(
        "Exportiert am: {}\n\n",
        Local::now().format("%Y-%m-%d %H:%M")
    ));

    let entries = sorted_by_date(&summary.entries);
    if entries.is_empty() {
        output.push_str("Keine Einträge in diesem Jahr.\n");
    } else {
        output.push_str(&table(
            &["Datum", "Typ", "Kategorie", "Beschreibung", "Betrag"],
            entry_rows(&entries, settings, false),
            &[4],
        ));
        output.push('\n');
    }

    output
}
