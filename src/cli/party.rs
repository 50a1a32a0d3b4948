//! Party and meter CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_party_list;
use crate::display::report::money;
use crate::error::BkvResult;
use crate::models::format_number;
use crate::services::{PartyService, PartyUpdate};
use crate::storage::Storage;

use super::parse_amount;

/// Party subcommands
#[derive(Subcommand)]
pub enum PartyCommands {
    /// Add a party with one meter
    Add {
        /// Party name (default: "Partei <n>")
        name: Option<String>,
        /// Floor area in m²
        #[arg(short, long)]
        sqm: Option<String>,
        /// Prepayment already made
        #[arg(short, long)]
        prepayment: Option<String>,
    },
    /// Edit a party
    Edit {
        /// Party name, ID or position
        party: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// Floor area in m²
        #[arg(short, long)]
        sqm: Option<String>,
        /// Prepayment already made
        #[arg(short, long)]
        prepayment: Option<String>,
    },
    /// Remove a party
    Remove {
        /// Party name, ID or position
        party: String,
    },
    /// List parties of the current document
    List,
}

/// Meter subcommands
#[derive(Subcommand)]
pub enum MeterCommands {
    /// Add a heat meter to a party
    Add {
        /// Party name, ID or position
        party: String,
        /// Meter label (default: "Zähler <n>")
        #[arg(short, long)]
        label: Option<String>,
        /// Meter reading
        #[arg(short, long, default_value = "0")]
        value: String,
    },
    /// Set a meter reading
    Set {
        /// Party name, ID or position
        party: String,
        /// Meter label, ID or position
        meter: String,
        /// Meter reading
        value: String,
        /// New label
        #[arg(short, long)]
        label: Option<String>,
    },
    /// Remove a meter (each party keeps at least one)
    Remove {
        /// Party name, ID or position
        party: String,
        /// Meter label, ID or position
        meter: String,
    },
}

fn party_update(
    name: Option<String>,
    sqm: Option<String>,
    prepayment: Option<String>,
) -> BkvResult<PartyUpdate> {
    Ok(PartyUpdate {
        name,
        sqm: sqm.map(|s| parse_amount(&s, "floor area")).transpose()?,
        prepayment: prepayment
            .map(|p| parse_amount(&p, "prepayment"))
            .transpose()?,
    })
}

/// Handle a party command
pub fn handle_party_command(
    storage: &Storage,
    settings: &Settings,
    cmd: PartyCommands,
) -> BkvResult<()> {
    let service = PartyService::new(storage);

    match cmd {
        PartyCommands::Add {
            name,
            sqm,
            prepayment,
        } => {
            let update = party_update(None, sqm, prepayment)?;
            let party = service.add(name.as_deref(), update)?;
            println!("Added party: {}", party.name);
            println!("  m²:            {}", format_number(party.sqm));
            println!("  Vorauszahlung: {}", money(party.prepayment, settings));
            println!("  ID: {}", party.id);
        }

        PartyCommands::Edit {
            party,
            name,
            sqm,
            prepayment,
        } => {
            if name.is_none() && sqm.is_none() && prepayment.is_none() {
                println!("No changes specified. Use --name, --sqm or --prepayment.");
                return Ok(());
            }
            let update = party_update(name, sqm, prepayment)?;
            let party = service.edit(&party, update)?;
            println!("Updated party: {}", party.name);
        }

        PartyCommands::Remove { party } => {
            let removed = service.remove(&party)?;
            println!("Removed party: {}", removed.name);
        }

        PartyCommands::List => {
            println!("{}", format_party_list(&service.list()?, settings));
        }
    }

    Ok(())
}

/// Handle a meter command
pub fn handle_meter_command(storage: &Storage, cmd: MeterCommands) -> BkvResult<()> {
    let service = PartyService::new(storage);

    match cmd {
        MeterCommands::Add {
            party,
            label,
            value,
        } => {
            let value = parse_amount(&value, "meter value")?;
            let (party, meter) = service.add_meter(&party, label.as_deref(), value)?;
            println!(
                "Added meter '{}' ({}) to {}",
                meter.label,
                format_number(meter.value),
                party.name
            );
        }

        MeterCommands::Set {
            party,
            meter,
            value,
            label,
        } => {
            let value = parse_amount(&value, "meter value")?;
            let (party, meter) = service.set_meter(&party, &meter, value, label.as_deref())?;
            println!(
                "{} / {}: {}",
                party.name,
                meter.label,
                format_number(meter.value)
            );
        }

        MeterCommands::Remove { party, meter } => {
            let (party, removed) = service.remove_meter(&party, &meter)?;
            println!("Removed meter '{}' from {}", removed.label, party.name);
        }
    }

    Ok(())
}
