//! Settlement display formatting
//!
//! The overview of all parties and the per-party breakdown, both printable
//! as plain text.

use chrono::Local;

use crate::config::Settings;
use crate::models::{format_number, Party};
use crate::services::{PartyResult, SettlementSummary};

use super::report::{money, split_labels, table, title};

const OVERVIEW_HEADER: [&str; 8] = [
    "Partei",
    "m²",
    "Grundkosten",
    "Zähler-Summe",
    "Heizkosten",
    "Summe",
    "Vorauszahlung",
    "Restbetrag",
];

/// Per-party result table
pub fn format_result_table(summary: &SettlementSummary, settings: &Settings) -> String {
    if summary.result.parties.is_empty() {
        return "Keine Parteien vorhanden.".to_string();
    }

    let rows = summary
        .result
        .parties
        .iter()
        .map(|p| {
            vec![
                p.party_name.clone(),
                format_number(p.sqm),
                money(p.base_share, settings),
                format_number(p.meters_sum),
                money(p.heat_share, settings),
                money(p.total, settings),
                money(p.prepayment, settings),
                money(p.balance, settings),
            ]
        })
        .collect();

    table(&OVERVIEW_HEADER, rows, &[1, 2, 3, 4, 5, 6, 7])
}

/// Warning lines for pools that cannot be allocated
pub fn format_warnings(summary: &SettlementSummary) -> String {
    let mut output = String::new();
    if summary.sqm_warning {
        output.push_str(
            "Warnung: Grundkosten vorhanden, aber keine m² erfasst. Grundkosten werden nicht verteilt.\n",
        );
    }
    if summary.meter_warning {
        output.push_str(
            "Warnung: Heizkosten vorhanden, aber keine Zählerstände erfasst. Heizkosten werden nicht verteilt.\n",
        );
    }
    output
}

/// Compact summary used after a calculation
pub fn format_calculation(summary: &SettlementSummary, settings: &Settings) -> String {
    let (base_pct, heat_pct) = split_labels(settings);
    let mut output = String::new();

    output.push_str(&format!(
        "Gesamtbetrag: {}   Grundkosten ({}%): {}   Heizkosten ({}%): {}\n",
        money(summary.total_amount, settings),
        base_pct,
        money(summary.pools.base_total, settings),
        heat_pct,
        money(summary.pools.heat_total, settings),
    ));
    output.push_str(&format!(
        "m² Summe: {}   Zähler Summe: {}\n\n",
        format_number(summary.result.total_sqm),
        format_number(summary.result.total_meters),
    ));
    output.push_str(&format_result_table(summary, settings));
    output.push('\n');

    let warnings = format_warnings(summary);
    if !warnings.is_empty() {
        output.push('\n');
        output.push_str(&warnings);
    }

    output
}

/// Printable overview of a settlement document
pub fn format_overview(
    document_name: &str,
    summary: &SettlementSummary,
    settings: &Settings,
) -> String {
    let (base_pct, heat_pct) = split_labels(settings);
    let mut output = title(&format!(
        "Betriebskostenabrechnung – Gesamtübersicht ({})",
        document_name
    ));

    output.push_str(&format!("Erstellt am {}\n\n", today()));
    output.push_str(&format!(
        "Gesamtbetrag:           {}\n",
        money(summary.total_amount, settings)
    ));
    output.push_str(&format!(
        "Vorauszahlungen gesamt: {}\n",
        money(summary.total_prepayments, settings)
    ));
    output.push_str(&format!(
        "Nachzahlung gesamt:     {}\n\n",
        money(summary.total_balance, settings)
    ));
    output.push_str(&format!(
        "Grundkosten ({}%): {}   |   Heizkosten ({}%): {}\n",
        base_pct,
        money(summary.pools.base_total, settings),
        heat_pct,
        money(summary.pools.heat_total, settings),
    ));
    output.push_str(&format!(
        "Nachzahlung {}/{}: {} / {}\n",
        base_pct,
        heat_pct,
        money(summary.balance_pools.base_total, settings),
        money(summary.balance_pools.heat_total, settings),
    ));
    output.push_str(&format!(
        "m² Summe: {}   |   Zähler Summe: {}\n\n",
        format_number(summary.result.total_sqm),
        format_number(summary.result.total_meters),
    ));

    output.push_str(&format_result_table(summary, settings));
    output.push('\n');

    let warnings = format_warnings(summary);
    if !warnings.is_empty() {
        output.push('\n');
        output.push_str(&warnings);
    }

    output
}

/// Printable breakdown for one party, including its meters
pub fn format_party_breakdown(
    party: &Party,
    result: &PartyResult,
    summary: &SettlementSummary,
    settings: &Settings,
) -> String {
    let (base_pct, heat_pct) = split_labels(settings);
    let totals = &summary.result;
    let pools = &summary.pools;

    let mut output = title(&format!("Betriebskostenabrechnung – {}", result.party_name));
    output.push_str(&format!("Erstellt am {}\n\n", today()));
    output.push_str(&format!(
        "Gesamtbetrag: {}\n",
        money(summary.total_amount, settings)
    ));
    output.push_str(&format!(
        "Grundkosten ({}%): {}\n",
        base_pct,
        money(pools.base_total, settings)
    ));
    output.push_str(&format!(
        "Heizkosten ({}%): {}\n\n",
        heat_pct,
        money(pools.heat_total, settings)
    ));
    output.push_str(&format!(
        "m² Partei: {} / {}\n",
        format_number(result.sqm),
        format_number(totals.total_sqm)
    ));
    output.push_str(&format!(
        "Zähler Partei: {} / {}\n\n",
        format_number(result.meters_sum),
        format_number(totals.total_meters)
    ));

    let base_formula = if totals.total_sqm > 0.0 {
        format!(
            "{} × ({} / {})",
            money(pools.base_total, settings),
            format_number(result.sqm),
            format_number(totals.total_sqm)
        )
    } else {
        "m² Summe ist 0".to_string()
    };
    let heat_formula = if totals.total_meters > 0.0 {
        format!(
            "{} × ({} / {})",
            money(pools.heat_total, settings),
            format_number(result.meters_sum),
            format_number(totals.total_meters)
        )
    } else {
        "Zähler Summe ist 0".to_string()
    };

    let rows = vec![
        vec![
            "Grundkosten-Anteil".to_string(),
            base_formula,
            money(result.base_share, settings),
        ],
        vec![
            "Heizkosten-Anteil".to_string(),
            heat_formula,
            money(result.heat_share, settings),
        ],
        vec![
            "Summe".to_string(),
            String::new(),
            money(result.total, settings),
        ],
        vec![
            "Vorauszahlung".to_string(),
            String::new(),
            money(result.prepayment, settings),
        ],
        vec![
            "Restbetrag".to_string(),
            format!(
                "{} − {}",
                money(result.total, settings),
                money(result.prepayment, settings)
            ),
            money(result.balance, settings),
        ],
    ];
    output.push_str(&table(&["Posten", "Rechnung", "Betrag"], rows, &[2]));
    output.push_str("\n\n");

    let meter_rows = party
        .meters
        .iter()
        .map(|m| vec![m.label.clone(), format_number(m.value)])
        .collect();
    output.push_str(&table(&["Heiz-Zähler", "Wert"], meter_rows, &[1]));
    output.push('\n');

    output
}

/// Party list with floor area, prepayment and meters
pub fn format_party_list(parties: &[Party], settings: &Settings) -> String {
    if parties.is_empty() {
        return "Keine Parteien vorhanden.".to_string();
    }

    let rows = parties
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let meters = p
                .meters
                .iter()
                .map(|m| format!("{}: {}", m.label, format_number(m.value)))
                .collect::<Vec<_>>()
                .join(", ");
            vec![
                (i + 1).to_string(),
                p.name.clone(),
                format_number(p.sqm),
                money(p.prepayment, settings),
                meters,
                p.id.short().to_string(),
            ]
        })
        .collect();

    table(
        &["#", "Partei", "m²", "Vorauszahlung", "Zähler", "ID"],
        rows,
        &[0, 2, 3],
    )
}

fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}
