//! Settlement CLI commands: calculation, printable reports, total amount
//! and reset of the current document.

use crate::config::Settings;
use crate::display::report::money;
use crate::display::{format_calculation, format_overview, format_party_breakdown};
use crate::error::{BkvError, BkvResult};
use crate::services::{summarize, DocumentService};
use crate::storage::Storage;

use super::parse_amount;

/// Show the allocation of the current document
pub fn handle_calc(storage: &Storage, settings: &Settings) -> BkvResult<()> {
    let doc = DocumentService::settlements(storage).current()?;
    let summary = summarize(&doc.state, settings.base_ratio());

    println!("Dokument: {}\n", doc.name);
    print!("{}", format_calculation(&summary, settings));
    Ok(())
}

/// Print the overview, or the breakdown of one party
pub fn handle_report(storage: &Storage, settings: &Settings, party: Option<String>) -> BkvResult<()> {
    let doc = DocumentService::settlements(storage).current()?;
    let summary = summarize(&doc.state, settings.base_ratio());

    match party {
        None => print!("{}", format_overview(&doc.name, &summary, settings)),
        Some(identifier) => {
            let idx = doc
                .state
                .find_party(&identifier)
                .ok_or_else(|| BkvError::party_not_found(&identifier))?;
            print!(
                "{}",
                format_party_breakdown(
                    &doc.state.parties[idx],
                    &summary.result.parties[idx],
                    &summary,
                    settings,
                )
            );
        }
    }
    Ok(())
}

/// Set the total amount of the current document
pub fn handle_total(storage: &Storage, settings: &Settings, amount: &str) -> BkvResult<()> {
    let amount = parse_amount(amount, "total amount")?;
    let doc = DocumentService::settlements(storage).set_total_amount(amount)?;
    println!(
        "Gesamtbetrag von '{}': {}",
        doc.name,
        money(doc.state.total_amount, settings)
    );
    Ok(())
}

/// Reset the current settlement or ledger document to its default state
pub fn handle_reset(storage: &Storage, ledger: bool) -> BkvResult<()> {
    if ledger {
        let doc = DocumentService::ledger(storage).reset()?;
        println!("Reset ledger document: {}", doc.name);
    } else {
        let doc = DocumentService::settlements(storage).reset()?;
        println!("Reset document: {}", doc.name);
    }
    Ok(())
}
