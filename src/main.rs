use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use betriebskosten::cli::{
    handle_calc, handle_document_command, handle_euer_command, handle_export_command,
    handle_import, handle_meter_command, handle_party_command, handle_report, handle_reset,
    handle_total, DocumentCommands, EuerCommands, ExportCommands, MeterCommands, PartyCommands,
};
use betriebskosten::config::{BkvPaths, Settings};
use betriebskosten::storage::Storage;

#[derive(Parser)]
#[command(
    name = "bkv",
    version,
    about = "Terminal-based operating cost settlement",
    long_about = "Splits a building's operating costs between parties: a base share \
                  by floor area and the heating share by meter readings. Includes a \
                  small EÜR ledger for income and expenses."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory
    Init,

    /// Show current configuration and paths
    Config,

    /// Calculate the shares of all parties
    Calc,

    /// Print the settlement overview or one party's breakdown
    Report {
        /// Party name, ID or position
        #[arg(short, long)]
        party: Option<String>,
    },

    /// Set the total amount to allocate
    Total {
        /// Amount, e.g. 1000 or 1.234,56
        amount: String,
    },

    /// Settlement document management
    #[command(subcommand)]
    Doc(DocumentCommands),

    /// Party management
    #[command(subcommand)]
    Party(PartyCommands),

    /// Heat meter management
    #[command(subcommand)]
    Meter(MeterCommands),

    /// Export the current document
    #[command(subcommand)]
    Export(ExportCommands),

    /// Import a document from a JSON file
    Import {
        /// Path to the JSON file
        file: PathBuf,
        /// Add as a new document instead of replacing the current one
        #[arg(long)]
        new: bool,
    },

    /// Reset the current document to three empty parties
    Reset,

    /// EÜR ledger
    #[command(subcommand)]
    Euer(EuerCommands),

    /// Show recent audit log entries
    Log {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = BkvPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let storage = Storage::new(paths.clone(), &settings)?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing Betriebskosten at: {}", paths.base_dir().display());
            betriebskosten::storage::initialize_storage(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("A settlement with three parties and an EÜR ledger have been created.");
            println!("Run 'bkv party list' to see the parties.");
        }
        Some(Commands::Config) => {
            println!("Betriebskosten Configuration");
            println!("============================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Base share:      {}%", settings.base_ratio() * 100.0);
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Audit enabled:   {}", settings.audit_enabled);
        }
        Some(Commands::Calc) => handle_calc(&storage, &settings)?,
        Some(Commands::Report { party }) => handle_report(&storage, &settings, party)?,
        Some(Commands::Total { amount }) => handle_total(&storage, &settings, &amount)?,
        Some(Commands::Doc(cmd)) => handle_document_command(&storage, &settings, cmd)?,
        Some(Commands::Party(cmd)) => handle_party_command(&storage, &settings, cmd)?,
        Some(Commands::Meter(cmd)) => handle_meter_command(&storage, cmd)?,
        Some(Commands::Export(cmd)) => handle_export_command(&storage, cmd)?,
        Some(Commands::Import { file, new }) => handle_import(&storage, file, new)?,
        Some(Commands::Reset) => handle_reset(&storage, false)?,
        Some(Commands::Euer(cmd)) => handle_euer_command(&storage, &settings, cmd)?,
        Some(Commands::Log { limit }) => match storage.audit() {
            Some(logger) => {
                let entries = logger.read_recent(limit)?;
                if entries.is_empty() {
                    println!("No audit entries.");
                }
                for entry in entries {
                    println!("{}", entry.format_human_readable());
                }
            }
            None => println!("Audit logging is disabled."),
        },
        None => {
            println!("Betriebskosten - operating cost settlement");
            println!();
            println!("Run 'bkv --help' for usage information.");
        }
    }

    Ok(())
}
