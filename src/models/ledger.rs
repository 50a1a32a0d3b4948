//! Income/expense ledger (EÜR) models

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::EntryId;

/// Whether an entry is income or an expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Income,
    Expense,
}

impl EntryType {
    /// Parse an entry type from user input (English or German)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" | "einnahme" | "in" => Some(Self::Income),
            "expense" | "ausgabe" | "out" => Some(Self::Expense),
            _ => None,
        }
    }

    /// Category assigned to new entries of this type
    pub fn default_category(&self) -> &'static str {
        match self {
            Self::Income => "Umsatz",
            Self::Expense => "Betriebsausgabe",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Einnahme"),
            Self::Expense => write!(f, "Ausgabe"),
        }
    }
}

/// A single ledger entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EuerEntry {
    /// Unique identifier
    pub id: EntryId,

    /// Booking date as `YYYY-MM-DD`
    pub date: String,

    /// Income or expense
    #[serde(rename = "type")]
    pub entry_type: EntryType,

    /// Free-text category
    pub category: String,

    /// Free-text description
    pub description: String,

    /// Amount (expected non-negative; coerced when totalled)
    pub amount: f64,
}

impl EuerEntry {
    /// Create a new zero-amount entry dated today with the type's default category
    pub fn new(entry_type: EntryType) -> Self {
        Self {
            id: EntryId::new(),
            date: today_iso(),
            entry_type,
            category: entry_type.default_category().to_string(),
            description: String::new(),
            amount: 0.0,
        }
    }
}

/// Ledger state of one ledger document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EuerState {
    pub entries: Vec<EuerEntry>,
}

impl EuerState {
    /// Find an entry by id or id prefix (at least 4 characters, must be unique)
    pub fn find_entry(&self, identifier: &str) -> Option<usize> {
        let needle = identifier.trim();
        if let Some(idx) = self.entries.iter().position(|e| e.id.as_str() == needle) {
            return Some(idx);
        }
        if needle.chars().count() < 4 {
            return None;
        }

        let mut matches = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.id.as_str().starts_with(needle));
        match (matches.next(), matches.next()) {
            (Some((idx, _)), None) => Some(idx),
            _ => None,
        }
    }
}

impl Default for EuerState {
    /// Two zero-amount sample entries dated today
    fn default() -> Self {
        let mut income = EuerEntry::new(EntryType::Income);
        income.description = "Beispiel-Einnahme".to_string();
        let mut expense = EuerEntry::new(EntryType::Expense);
        expense.description = "Beispiel-Ausgabe".to_string();

        Self {
            entries: vec![income, expense],
        }
    }
}

/// Computed ledger totals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EuerTotals {
    pub income: f64,
    pub expense: f64,
    /// Income minus expense
    pub surplus: f64,
}

/// Today's local date as `YYYY-MM-DD`
pub fn today_iso() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_type_parse() {
        assert_eq!(EntryType::parse("income"), Some(EntryType::Income));
        assert_eq!(EntryType::parse("Ausgabe"), Some(EntryType::Expense));
        assert_eq!(EntryType::parse("gift"), None);
    }

    #[test]
    fn test_entry_type_serialization() {
        assert_eq!(serde_json::to_string(&EntryType::Expense).unwrap(), "\"expense\"");
        let entry = EuerEntry::new(EntryType::Income);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "income");
        assert_eq!(json["category"], "Umsatz");
    }

    #[test]
    fn test_default_state_samples() {
        let state = EuerState::default();
        assert_eq!(state.entries.len(), 2);
        assert_eq!(state.entries[0].entry_type, EntryType::Income);
        assert_eq!(state.entries[1].category, "Betriebsausgabe");
        assert!(state.entries.iter().all(|e| e.amount == 0.0));
        assert!(chrono::NaiveDate::parse_from_str(&state.entries[0].date, "%Y-%m-%d").is_ok());
    }

    #[test]
    fn test_find_entry_by_prefix() {
        let mut state = EuerState::default();
        state.entries[0].id = EntryId::from_raw("aaaa-1111");
        state.entries[1].id = EntryId::from_raw("aaab-2222");

        assert_eq!(state.find_entry("aaab"), Some(1));
        assert_eq!(state.find_entry("aaaa-1111"), Some(0));
        assert_eq!(state.find_entry("aaa"), None);
        assert_eq!(state.find_entry("zzzz"), None);
    }
}
