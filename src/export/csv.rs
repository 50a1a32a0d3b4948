//! CSV export of ledger entries
//!
//! Semicolon separated, every field quoted, amounts with a decimal comma.

use std::io::Write;

use crate::error::BkvResult;
use crate::models::money::decimal_comma;
use crate::models::{non_negative, EuerEntry};

const HEADER: [&str; 5] = ["Datum", "Typ", "Kategorie", "Beschreibung", "Betrag"];

/// Suggested file name for the ledger export of `year`
pub fn default_csv_filename(year: i32) -> String {
    format!("euer-{}.csv", year)
}

/// Write entries in their given order
pub fn export_entries_csv<W: Write>(entries: &[EuerEntry], writer: W) -> BkvResult<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv_writer.write_record(HEADER)?;
    for entry in entries {
        let amount = decimal_comma(non_negative(entry.amount));
        let entry_type = entry.entry_type.to_string();
        csv_writer.write_record([
            entry.date.as_str(),
            entry_type.as_str(),
            entry.category.as_str(),
            entry.description.as_str(),
            amount.as_str(),
        ])?;
    }
    csv_writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntryType;

    fn entry(entry_type: EntryType, description: &str, amount: f64) -> EuerEntry {
        let mut e = EuerEntry::new(entry_type);
        e.date = "2024-01-15".into();
        e.description = description.into();
        e.amount = amount;
        e
    }

    #[test]
    fn test_csv_format() {
        let entries = vec![
            entry(EntryType::Income, "Miete \"Jänner\"", 1200.5),
            entry(EntryType::Expense, "Strom; Gas", 80.0),
        ];
        let mut out = Vec::new();
        export_entries_csv(&entries, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            r#""Datum";"Typ";"Kategorie";"Beschreibung";"Betrag""#
        );
        assert_eq!(
            lines[1],
            r#""2024-01-15";"Einnahme";"Umsatz";"Miete ""Jänner""";"1200,5""#
        );
        assert_eq!(
            lines[2],
            r#""2024-01-15";"Ausgabe";"Betriebsausgabe";"Strom; Gas";"80""#
        );
    }

    #[test]
    fn test_negative_amount_exported_as_zero() {
        let mut out = Vec::new();
        export_entries_csv(&[entry(EntryType::Expense, "", -3.0)], &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains(r#";"0""#));
    }
}
