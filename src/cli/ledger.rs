//! EÜR ledger CLI commands

use std::io::Write;
use std::path::PathBuf;

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_entry_list, format_euer_report, format_year_totals};
use crate::display::report::money;
use crate::error::{BkvError, BkvResult};
use crate::export::{default_csv_filename, export_entries_csv};
use crate::models::EntryType;
use crate::services::{EntryUpdate, LedgerService};
use crate::storage::Storage;

use super::document::{handle_ledger_document_command, DocumentCommands};
use super::settlement::handle_reset;
use super::{create_output, parse_amount};

/// EÜR subcommands
#[derive(Subcommand)]
pub enum EuerCommands {
    /// Add an income or expense entry
    Add {
        /// Entry type (income/einnahme or expense/ausgabe)
        entry_type: String,
        /// Amount
        amount: String,
        /// Date (YYYY-MM-DD, default: today)
        #[arg(short, long)]
        date: Option<String>,
        /// Category (default: Umsatz / Betriebsausgabe)
        #[arg(short, long)]
        category: Option<String>,
        /// Description
        #[arg(short = 'm', long)]
        description: Option<String>,
    },
    /// Edit an entry
    Edit {
        /// Entry ID or ID prefix
        entry: String,
        /// Entry type
        #[arg(short = 't', long = "type")]
        entry_type: Option<String>,
        /// Amount
        #[arg(short, long)]
        amount: Option<String>,
        /// Date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// Category
        #[arg(short, long)]
        category: Option<String>,
        /// Description
        #[arg(short = 'm', long)]
        description: Option<String>,
    },
    /// Remove an entry
    Remove {
        /// Entry ID or ID prefix
        entry: String,
    },
    /// List entries
    List {
        /// Only entries of this year
        #[arg(short, long)]
        year: Option<i32>,
    },
    /// Show income, expense and surplus of a year (default: newest)
    Summary {
        #[arg(short, long)]
        year: Option<i32>,
    },
    /// List years that have entries
    Years,
    /// Export the entries of a year as CSV
    Csv {
        #[arg(short, long)]
        year: Option<i32>,
        /// Output file (default: euer-<year>.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the EÜR report of a year
    Report {
        #[arg(short, long)]
        year: Option<i32>,
    },
    /// Reset the current ledger document to the sample entries
    Reset,
    /// Manage ledger documents
    #[command(subcommand)]
    Doc(DocumentCommands),
}

fn parse_entry_type(input: &str) -> BkvResult<EntryType> {
    EntryType::parse(input).ok_or_else(|| {
        BkvError::Validation(format!(
            "Invalid entry type: '{}'. Valid types: income, expense",
            input
        ))
    })
}

/// Handle an EÜR command
pub fn handle_euer_command(storage: &Storage, settings: &Settings, cmd: EuerCommands) -> BkvResult<()> {
    let service = LedgerService::new(storage);

    match cmd {
        EuerCommands::Add {
            entry_type,
            amount,
            date,
            category,
            description,
        } => {
            let entry_type = parse_entry_type(&entry_type)?;
            let update = EntryUpdate {
                date,
                entry_type: None,
                category,
                description,
                amount: Some(parse_amount(&amount, "amount")?),
            };
            let entry = service.add(entry_type, update)?;
            println!(
                "Added {}: {} {} ({})",
                entry.entry_type,
                entry.date,
                money(entry.amount, settings),
                entry.category
            );
            println!("  ID: {}", entry.id);
        }

        EuerCommands::Edit {
            entry,
            entry_type,
            amount,
            date,
            category,
            description,
        } => {
            let update = EntryUpdate {
                date,
                entry_type: entry_type.as_deref().map(parse_entry_type).transpose()?,
                category,
                description,
                amount: amount.map(|a| parse_amount(&a, "amount")).transpose()?,
            };
            let entry = service.edit(&entry, update)?;
            println!(
                "Updated entry {}: {} {} {}",
                entry.id.short(),
                entry.date,
                entry.entry_type,
                money(entry.amount, settings)
            );
        }

        EuerCommands::Remove { entry } => {
            let removed = service.remove(&entry)?;
            println!(
                "Removed entry {} ({} {})",
                removed.id.short(),
                removed.date,
                money(removed.amount, settings)
            );
        }

        EuerCommands::List { year } => {
            let entries = match year {
                Some(y) => service.summary(Some(y))?.entries,
                None => service.list()?,
            };
            println!("{}", format_entry_list(&entries, settings));
        }

        EuerCommands::Summary { year } => {
            print!("{}", format_year_totals(&service.summary(year)?, settings));
        }

        EuerCommands::Years => {
            for year in service.years()? {
                println!("{}", year);
            }
        }

        EuerCommands::Csv { year, output } => {
            let summary = service.summary(year)?;
            let output =
                output.unwrap_or_else(|| PathBuf::from(default_csv_filename(summary.year)));
            let mut writer = create_output(&output)?;
            export_entries_csv(&summary.entries, &mut writer)?;
            writer.flush()?;
            println!(
                "Exported {} entries of {} to: {}",
                summary.entries.len(),
                summary.year,
                output.display()
            );
        }

        EuerCommands::Report { year } => {
            print!("{}", format_euer_report(&service.summary(year)?, settings));
        }

        EuerCommands::Reset => handle_reset(storage, true)?,

        EuerCommands::Doc(cmd) => handle_ledger_document_command(storage, settings, cmd)?,
    }

    Ok(())
}
