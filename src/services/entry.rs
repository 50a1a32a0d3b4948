//! Ledger entry service
//!
//! Income and expense entries of the current EÜR document.

use chrono::NaiveDate;

use crate::audit::EntityType;
use crate::error::{BkvError, BkvResult};
use crate::models::{EntryType, EuerEntry, EuerState, EuerTotals};
use crate::storage::Storage;

use super::ledger::{available_years, calculate_euer, filter_entries_by_year};

/// Fields of an entry to set; `None` leaves a field untouched
#[derive(Debug, Clone, Default)]
pub struct EntryUpdate {
    pub date: Option<String>,
    pub entry_type: Option<EntryType>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub amount: Option<f64>,
}

/// Totals of one year
#[derive(Debug, Clone)]
pub struct YearSummary {
    pub year: i32,
    pub entries: Vec<EuerEntry>,
    pub totals: EuerTotals,
}

/// Service for ledger entry management
pub struct LedgerService<'a> {
    storage: &'a Storage,
}

impl<'a> LedgerService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// All entries of the current ledger document
    pub fn list(&self) -> BkvResult<Vec<EuerEntry>> {
        let ws = self.storage.ledger.get()?;
        Ok(ws.current().map(|d| d.state.entries.clone()).unwrap_or_default())
    }

    /// Years with entries, newest first; the current year when there are none
    pub fn years(&self) -> BkvResult<Vec<i32>> {
        let years = available_years(&self.list()?);
        if years.is_empty() {
            Ok(vec![current_year()])
        } else {
            Ok(years)
        }
    }

    /// Entries and totals of `year`, defaulting to the newest year
    pub fn summary(&self, year: Option<i32>) -> BkvResult<YearSummary> {
        let year = match year {
            Some(y) => y,
            None => self.years()?.first().copied().unwrap_or_else(current_year),
        };
        let entries = filter_entries_by_year(&self.list()?, year);
        let totals = calculate_euer(&entries);

        Ok(YearSummary {
            year,
            entries,
            totals,
        })
    }

    /// Add an entry at the top of the list.
    ///
    /// Date defaults to today and category to the type's default category.
    pub fn add(&self, entry_type: EntryType, update: EntryUpdate) -> BkvResult<EuerEntry> {
        let mut entry = EuerEntry::new(entry_type);
        apply_update(&mut entry, update)?;

        let created = entry.clone();
        self.modify_state(|state| {
            state.entries.insert(0, entry);
            Ok(())
        })?;

        self.storage.log_create(
            EntityType::LedgerEntry,
            created.id.to_string(),
            Some(entry_label(&created)),
            &created,
        )?;

        Ok(created)
    }

    /// Edit an entry found by ID or unique ID prefix
    pub fn edit(&self, identifier: &str, update: EntryUpdate) -> BkvResult<EuerEntry> {
        let (before, after) = self.modify_state(|state| {
            let idx = find_entry(state, identifier)?;
            let mut entry = state.entries[idx].clone();
            apply_update(&mut entry, update)?;
            let before = std::mem::replace(&mut state.entries[idx], entry.clone());
            Ok((before, entry))
        })?;

        self.storage.log_update(
            EntityType::LedgerEntry,
            after.id.to_string(),
            Some(entry_label(&after)),
            &before,
            &after,
        )?;

        Ok(after)
    }

    /// Remove an entry
    pub fn remove(&self, identifier: &str) -> BkvResult<EuerEntry> {
        let removed = self.modify_state(|state| {
            let idx = find_entry(state, identifier)?;
            Ok(state.entries.remove(idx))
        })?;

        self.storage.log_delete(
            EntityType::LedgerEntry,
            removed.id.to_string(),
            Some(entry_label(&removed)),
            &removed,
        )?;

        Ok(removed)
    }

    fn modify_state<R, F>(&self, f: F) -> BkvResult<R>
    where
        F: FnOnce(&mut EuerState) -> BkvResult<R>,
    {
        let result = self.storage.ledger.update(|ws| {
            let doc = ws
                .current_mut()
                .ok_or_else(|| BkvError::Storage("Workspace has no documents".into()))?;
            let result = f(&mut doc.state)?;
            doc.touch();
            Ok(result)
        })?;
        self.storage.ledger.save()?;
        Ok(result)
    }
}

fn current_year() -> i32 {
    use chrono::Datelike;
    chrono::Local::now().year()
}

fn entry_label(entry: &EuerEntry) -> String {
    format!("{} {}", entry.date, entry.entry_type)
}

fn find_entry(state: &EuerState, identifier: &str) -> BkvResult<usize> {
    state
        .find_entry(identifier)
        .ok_or_else(|| BkvError::entry_not_found(identifier))
}

/// Parse a `YYYY-MM-DD` calendar date
pub fn parse_date(input: &str) -> BkvResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        BkvError::Validation(format!(
            "Invalid date '{}'. Use YYYY-MM-DD format.",
            input.trim()
        ))
    })
}

fn apply_update(entry: &mut EuerEntry, update: EntryUpdate) -> BkvResult<()> {
    if let Some(amount) = update.amount {
        if !amount.is_finite() || amount < 0.0 {
            return Err(BkvError::Validation(format!(
                "Amount must be a non-negative number, got {}",
                amount
            )));
        }
        entry.amount = amount;
    }
    if let Some(date) = update.date {
        entry.date = parse_date(&date)?.format("%Y-%m-%d").to_string();
    }
    if let Some(entry_type) = update.entry_type {
        entry.entry_type = entry_type;
    }
    if let Some(category) = update.category {
        entry.category = category;
    }
    if let Some(description) = update.description {
        entry.description = description;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BkvPaths, Settings};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BkvPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths, &Settings::default()).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn dated(date: &str, amount: f64) -> EntryUpdate {
        EntryUpdate {
            date: Some(date.into()),
            amount: Some(amount),
            ..Default::default()
        }
    }

    #[test]
    fn test_add_entry_defaults() {
        let (_temp, storage) = create_test_storage();
        let service = LedgerService::new(&storage);

        let entry = service
            .add(EntryType::Expense, EntryUpdate::default())
            .unwrap();
        assert_eq!(entry.category, "Betriebsausgabe");
        assert_eq!(entry.amount, 0.0);

        let entries = service.list().unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].id, entry.id);
    }

    #[test]
    fn test_add_entry_validates() {
        let (_temp, storage) = create_test_storage();
        let service = LedgerService::new(&storage);

        let err = service
            .add(EntryType::Income, dated("2024-02-30", 1.0))
            .unwrap_err();
        assert!(err.is_validation());

        let err = service
            .add(EntryType::Income, dated("2024-02-01", -1.0))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(service.list().unwrap().len(), 2);
    }

    #[test]
    fn test_edit_and_remove() {
        let (_temp, storage) = create_test_storage();
        let service = LedgerService::new(&storage);
        let entry = service
            .add(EntryType::Income, dated("2024-03-01", 100.0))
            .unwrap();

        let update = EntryUpdate {
            entry_type: Some(EntryType::Expense),
            description: Some("Reparatur".into()),
            ..Default::default()
        };
        let edited = service.edit(&entry.id.as_str()[..8], update).unwrap();
        assert_eq!(edited.entry_type, EntryType::Expense);
        assert_eq!(edited.amount, 100.0);
        assert_eq!(edited.description, "Reparatur");

        service.remove(entry.id.as_str()).unwrap();
        assert!(service.remove(entry.id.as_str()).unwrap_err().is_not_found());
    }

    #[test]
    fn test_summary_by_year() {
        let (_temp, storage) = create_test_storage();
        let service = LedgerService::new(&storage);
        for entry in service.list().unwrap() {
            service.remove(entry.id.as_str()).unwrap();
        }
        assert_eq!(service.years().unwrap(), vec![current_year()]);

        service
            .add(EntryType::Income, dated("2023-05-01", 1000.0))
            .unwrap();
        service
            .add(EntryType::Expense, dated("2023-06-01", 350.555))
            .unwrap();
        service
            .add(EntryType::Income, dated("2022-01-01", 50.0))
            .unwrap();

        assert_eq!(service.years().unwrap(), vec![2023, 2022]);

        let summary = service.summary(None).unwrap();
        assert_eq!(summary.year, 2023);
        assert_eq!(summary.entries.len(), 2);
        assert_eq!(summary.totals.income, 1000.0);
        assert_eq!(summary.totals.expense, 350.56);
        assert_eq!(summary.totals.surplus, 649.44);

        let summary = service.summary(Some(2022)).unwrap();
        assert_eq!(summary.totals.surplus, 50.0);
    }
}
