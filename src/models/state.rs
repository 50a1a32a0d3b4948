//! Settlement state of a single document
//!
//! Holds the total amount to be split and the parties it is split between.

use serde::{Deserialize, Serialize};

use super::number::{non_negative, round2};
use super::party::Party;

/// Number of parties a fresh document starts with
pub const DEFAULT_PARTY_COUNT: usize = 3;

/// State of one settlement document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    /// Total operating costs to distribute
    pub total_amount: f64,

    /// Parties sharing the costs, in display order
    pub parties: Vec<Party>,
}

impl AppState {
    /// Empty state with no parties
    pub fn empty() -> Self {
        Self {
            total_amount: 0.0,
            parties: Vec::new(),
        }
    }

    /// Total of all prepayments, clamped per party
    pub fn total_prepayments(&self) -> f64 {
        self.parties.iter().map(|p| non_negative(p.prepayment)).sum()
    }

    /// Find a party by name (case-insensitive), id, or 1-based position
    pub fn find_party(&self, identifier: &str) -> Option<usize> {
        let needle = identifier.trim();
        let lower = needle.to_lowercase();

        self.parties
            .iter()
            .position(|p| p.name.to_lowercase() == lower)
            .or_else(|| self.parties.iter().position(|p| p.id.as_str() == needle))
            .or_else(|| {
                needle
                    .parse::<usize>()
                    .ok()
                    .filter(|n| *n >= 1 && *n <= self.parties.len())
                    .map(|n| n - 1)
            })
    }
}

impl Default for AppState {
    /// Fresh state: zero total and three parties "Partei 1" to "Partei 3"
    fn default() -> Self {
        Self {
            total_amount: 0.0,
            parties: (0..DEFAULT_PARTY_COUNT)
                .map(|i| Party::new(Party::default_name(i)))
                .collect(),
        }
    }
}

/// The two cost pools a total amount is split into
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostPools {
    /// Portion allocated by floor area
    pub base_total: f64,

    /// Portion allocated by meter readings
    pub heat_total: f64,
}

impl CostPools {
    /// Split a total amount; `base_ratio` is the floor-area share in `0..=1`.
    ///
    /// Each pool is rounded independently, so the pools may differ from the
    /// total by a cent.
    pub fn from_total(total_amount: f64, base_ratio: f64) -> Self {
        let total = non_negative(total_amount);
        let ratio = if base_ratio.is_finite() {
            base_ratio.clamp(0.0, 1.0)
        } else {
            0.0
        };

        Self {
            base_total: round2(total * ratio),
            heat_total: round2(total * (1.0 - ratio)),
        }
    }
}
