//! Party and heat meter models
//!
//! A party is one cost-sharing unit (e.g. a household). Its floor area drives
//! the base cost share, the sum of its meter readings drives the heat share.

use serde::{Deserialize, Serialize};

use super::ids::{MeterId, PartyId};

/// A heat meter reading belonging to a party
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatMeter {
    /// Unique identifier
    pub id: MeterId,

    /// Free-text label, e.g. "Zähler 1" or "Wohnzimmer"
    pub label: String,

    /// Consumption reading
    pub value: f64,
}

impl HeatMeter {
    /// Create a new meter with a zero reading
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: MeterId::new(),
            label: label.into(),
            value: 0.0,
        }
    }

    /// Default label for the meter at the given zero-based position
    pub fn default_label(index: usize) -> String {
        format!("Zähler {}", index + 1)
    }
}

/// One party among whom the costs are split
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Party {
    /// Unique identifier
    pub id: PartyId,

    /// Display name
    pub name: String,

    /// Floor area in square meters
    pub sqm: f64,

    /// Amount the party already paid in advance
    pub prepayment: f64,

    /// Heat meters; order is only significant for display
    pub meters: Vec<HeatMeter>,
}

impl Party {
    /// Create a new party with zero area, no prepayment and one empty meter
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: PartyId::new(),
            name: name.into(),
            sqm: 0.0,
            prepayment: 0.0,
            meters: vec![HeatMeter::new(HeatMeter::default_label(0))],
        }
    }

    /// Default name for the party at the given zero-based position
    pub fn default_name(index: usize) -> String {
        format!("Partei {}", index + 1)
    }

    /// Append a meter labelled after its position and return a reference to it
    pub fn add_meter(&mut self, label: Option<&str>, value: f64) -> &HeatMeter {
        let label = match label.map(str::trim) {
            Some(l) if !l.is_empty() => l.to_string(),
            _ => HeatMeter::default_label(self.meters.len()),
        };
        let mut meter = HeatMeter::new(label);
        meter.value = value;
        self.meters.push(meter);
        &self.meters[self.meters.len() - 1]
    }

    /// Find a meter by label (case-insensitive), id, or 1-based position
    pub fn find_meter(&self, identifier: &str) -> Option<usize> {
        let needle = identifier.trim();
        let lower = needle.to_lowercase();

        self.meters
            .iter()
            .position(|m| m.label.to_lowercase() == lower)
            .or_else(|| self.meters.iter().position(|m| m.id.as_str() == needle))
            .or_else(|| {
                needle
                    .parse::<usize>()
                    .ok()
                    .filter(|n| *n >= 1 && *n <= self.meters.len())
                    .map(|n| n - 1)
            })
    }

    /// Validate user-supplied values
    pub fn validate(&self) -> Result<(), PartyValidationError> {
        if self.name.trim().is_empty() {
            return Err(PartyValidationError::EmptyName);
        }
        if !self.sqm.is_finite() || self.sqm < 0.0 {
            return Err(PartyValidationError::InvalidSqm(self.sqm));
        }
        if !self.prepayment.is_finite() || self.prepayment < 0.0 {
            return Err(PartyValidationError::InvalidPrepayment(self.prepayment));
        }
        if let Some(m) = self
            .meters
            .iter()
            .find(|m| !m.value.is_finite() || m.value < 0.0)
        {
            return Err(PartyValidationError::InvalidMeterValue(m.value));
        }
        Ok(())
    }
}

/// Validation errors for parties
#[derive(Debug, Clone, PartialEq)]
pub enum PartyValidationError {
    EmptyName,
    InvalidSqm(f64),
    InvalidPrepayment(f64),
    InvalidMeterValue(f64),
}

impl std::fmt::Display for PartyValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Party name cannot be empty"),
            Self::InvalidSqm(v) => write!(f, "Floor area must be a non-negative number, got {}", v),
            Self::InvalidPrepayment(v) => {
                write!(f, "Prepayment must be a non-negative number, got {}", v)
            }
            Self::InvalidMeterValue(v) => {
                write!(f, "Meter value must be a non-negative number, got {}", v)
            }
        }
    }
}

impl std::error::Error for PartyValidationError {}
