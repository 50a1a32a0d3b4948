//! Party service
//!
//! Parties and their heat meters inside the current settlement document.

use crate::audit::EntityType;
use crate::error::{BkvError, BkvResult};
use crate::models::{AppState, HeatMeter, Party};
use crate::storage::Storage;

/// Changes to apply to a party; `None` leaves a field untouched
#[derive(Debug, Clone, Default)]
pub struct PartyUpdate {
    pub name: Option<String>,
    pub sqm: Option<f64>,
    pub prepayment: Option<f64>,
}

/// Service for party and meter management
pub struct PartyService<'a> {
    storage: &'a Storage,
}

impl<'a> PartyService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Parties of the current document
    pub fn list(&self) -> BkvResult<Vec<Party>> {
        let ws = self.storage.settlements.get()?;
        Ok(ws.current().map(|d| d.state.parties.clone()).unwrap_or_default())
    }

    /// Find a party by name, ID or 1-based position
    pub fn find(&self, identifier: &str) -> BkvResult<Party> {
        let mut state = AppState::empty();
        state.parties = self.list()?;
        let idx = find_party(&state, identifier)?;
        Ok(state.parties.swap_remove(idx))
    }

    /// Add a party with one default meter
    pub fn add(&self, name: Option<&str>, update: PartyUpdate) -> BkvResult<Party> {
        let party = self.modify_state(|state| {
            let name = match name.map(str::trim) {
                Some(n) if !n.is_empty() => n.to_string(),
                _ => Party::default_name(state.parties.len()),
            };
            let mut party = Party::new(name);
            apply_update(&mut party, &update)?;
            state.parties.push(party.clone());
            Ok(party)
        })?;

        self.storage.log_create(
            EntityType::Party,
            party.id.to_string(),
            Some(party.name.clone()),
            &party,
        )?;

        Ok(party)
    }

    /// Edit name, floor area or prepayment of a party
    pub fn edit(&self, identifier: &str, update: PartyUpdate) -> BkvResult<Party> {
        let (before, after) = self.modify_state(|state| {
            let idx = find_party(state, identifier)?;
            let mut party = state.parties[idx].clone();
            apply_update(&mut party, &update)?;
            let before = std::mem::replace(&mut state.parties[idx], party.clone());
            Ok((before, party))
        })?;

        self.storage.log_update(
            EntityType::Party,
            after.id.to_string(),
            Some(after.name.clone()),
            &before,
            &after,
        )?;

        Ok(after)
    }

    /// Remove a party
    pub fn remove(&self, identifier: &str) -> BkvResult<Party> {
        let removed = self.modify_state(|state| {
            let idx = find_party(state, identifier)?;
            Ok(state.parties.remove(idx))
        })?;

        self.storage.log_delete(
            EntityType::Party,
            removed.id.to_string(),
            Some(removed.name.clone()),
            &removed,
        )?;

        Ok(removed)
    }

    /// Add a meter to a party. A blank label becomes `Zähler <n>`.
    pub fn add_meter(
        &self,
        party: &str,
        label: Option<&str>,
        value: f64,
    ) -> BkvResult<(Party, HeatMeter)> {
        validate_meter_value(value)?;

        let (party, meter) = self.modify_state(|state| {
            let idx = find_party(state, party)?;
            let meter = state.parties[idx].add_meter(label, value).clone();
            Ok((state.parties[idx].clone(), meter))
        })?;

        self.storage.log_create(
            EntityType::Meter,
            meter.id.to_string(),
            Some(format!("{} / {}", party.name, meter.label)),
            &meter,
        )?;

        Ok((party, meter))
    }

    /// Set the reading of a meter, optionally relabeling it
    pub fn set_meter(
        &self,
        party: &str,
        meter: &str,
        value: f64,
        label: Option<&str>,
    ) -> BkvResult<(Party, HeatMeter)> {
        validate_meter_value(value)?;

        let (party, before, after) = self.modify_state(|state| {
            let p_idx = find_party(state, party)?;
            let m_idx = find_meter(&state.parties[p_idx], meter)?;

            let target = &mut state.parties[p_idx].meters[m_idx];
            let before = target.clone();
            target.value = value;
            if let Some(label) = label.map(str::trim).filter(|l| !l.is_empty()) {
                target.label = label.to_string();
            }
            let after = target.clone();
            Ok((state.parties[p_idx].clone(), before, after))
        })?;

        self.storage.log_update(
            EntityType::Meter,
            after.id.to_string(),
            Some(format!("{} / {}", party.name, after.label)),
            &before,
            &after,
        )?;

        Ok((party, after))
    }

    /// Remove a meter. Every party keeps at least one meter.
    pub fn remove_meter(&self, party: &str, meter: &str) -> BkvResult<(Party, HeatMeter)> {
        let (party, removed) = self.modify_state(|state| {
            let p_idx = find_party(state, party)?;
            let m_idx = find_meter(&state.parties[p_idx], meter)?;
            if state.parties[p_idx].meters.len() <= 1 {
                return Err(BkvError::Validation(format!(
                    "Party '{}' must keep at least one meter",
                    state.parties[p_idx].name
                )));
            }
            let removed = state.parties[p_idx].meters.remove(m_idx);
            Ok((state.parties[p_idx].clone(), removed))
        })?;

        self.storage.log_delete(
            EntityType::Meter,
            removed.id.to_string(),
            Some(format!("{} / {}", party.name, removed.label)),
            &removed,
        )?;

        Ok((party, removed))
    }

    // Closures validate before mutating, so an error leaves the state as it was.
    fn modify_state<R, F>(&self, f: F) -> BkvResult<R>
    where
        F: FnOnce(&mut AppState) -> BkvResult<R>,
    {
        let result = self.storage.settlements.update(|ws| {
            let doc = ws
                .current_mut()
                .ok_or_else(|| BkvError::Storage("Workspace has no documents".into()))?;
            let result = f(&mut doc.state)?;
            doc.touch();
            Ok(result)
        })?;
        self.storage.settlements.save()?;
        Ok(result)
    }
}

fn find_party(state: &AppState, identifier: &str) -> BkvResult<usize> {
    state
        .find_party(identifier)
        .ok_or_else(|| BkvError::party_not_found(identifier))
}

fn find_meter(party: &Party, identifier: &str) -> BkvResult<usize> {
    party
        .find_meter(identifier)
        .ok_or_else(|| BkvError::meter_not_found(identifier))
}

fn validate_meter_value(value: f64) -> BkvResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(BkvError::Validation(format!(
            "Meter value must be a non-negative number, got {}",
            value
        )));
    }
    Ok(())
}

fn apply_update(party: &mut Party, update: &PartyUpdate) -> BkvResult<()> {
    if let Some(name) = &update.name {
        party.name = name.trim().to_string();
    }
    if let Some(sqm) = update.sqm {
        party.sqm = sqm;
    }
    if let Some(prepayment) = update.prepayment {
        party.prepayment = prepayment;
    }

    party
        .validate()
        .map_err(|e| BkvError::Validation(e.to_string()))
}
