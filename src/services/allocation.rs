//! Allocation engine
//!
//! Splits the base pool by floor area and the heat pool by meter readings.
//! Each share is rounded on its own, so per-party totals may drift from the
//! pool totals by a cent.

use serde::Serialize;

use crate::models::{non_negative, round2, Party, PartyId};

/// Share of one party in a calculation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartyResult {
    pub party_id: PartyId,
    pub party_name: String,
    pub sqm: f64,
    pub meters_sum: f64,
    pub base_share: f64,
    pub heat_share: f64,
    pub total: f64,
    pub prepayment: f64,
    /// Positive: the party owes money. Negative: the party gets a refund.
    pub balance: f64,
}

/// Result of allocating both pools over all parties
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationResult {
    pub total_sqm: f64,
    pub total_meters: f64,
    pub parties: Vec<PartyResult>,
}

fn meters_sum(party: &Party) -> f64 {
    party.meters.iter().map(|m| non_negative(m.value)).sum()
}

/// Allocate `base_total` and `heat_total` over `parties`.
///
/// Total over all inputs: negative or non-finite values count as 0. When no
/// floor area (or no meter reading) is recorded anywhere, every base (or
/// heat) share is 0.
pub fn calculate(parties: &[Party], base_total: f64, heat_total: f64) -> CalculationResult {
    let total_sqm: f64 = parties.iter().map(|p| non_negative(p.sqm)).sum();
    let total_meters: f64 = parties.iter().map(meters_sum).sum();

    let base_total = non_negative(base_total);
    let heat_total = non_negative(heat_total);

    let results = parties
        .iter()
        .map(|party| {
            let sqm = non_negative(party.sqm);
            let meters_sum = meters_sum(party);
            let prepayment = non_negative(party.prepayment);

            let base_share = if total_sqm > 0.0 {
                base_total * sqm / total_sqm
            } else {
                0.0
            };
            let heat_share = if total_meters > 0.0 {
                heat_total * meters_sum / total_meters
            } else {
                0.0
            };

            let base_share = round2(base_share);
            let heat_share = round2(heat_share);
            let total = round2(base_share + heat_share);

            PartyResult {
                party_id: party.id.clone(),
                party_name: party.name.clone(),
                sqm,
                meters_sum,
                base_share,
                heat_share,
                total,
                prepayment: round2(prepayment),
                balance: round2(total - prepayment),
            }
        })
        .collect();

    CalculationResult {
        total_sqm,
        total_meters,
        parties: results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn party(name: &str, sqm: f64, meters: &[f64], prepayment: f64) -> Party {
        let mut party = Party::new(name);
        party.sqm = sqm;
        party.prepayment = prepayment;
        party.meters.clear();
        for value in meters {
            party.add_meter(None, *value);
        }
        party
    }

    #[test]
    fn test_two_party_example() {
        let parties = vec![
            party("A", 50.0, &[100.0], 0.0),
            party("B", 50.0, &[300.0], 0.0),
        ];
        let result = calculate(&parties, 300.0, 700.0);

        assert_eq!(result.total_sqm, 100.0);
        assert_eq!(result.total_meters, 400.0);

        let a = &result.parties[0];
        assert_eq!((a.base_share, a.heat_share, a.total), (150.0, 175.0, 325.0));
        let b = &result.parties[1];
        assert_eq!((b.base_share, b.heat_share, b.total), (150.0, 525.0, 675.0));
        assert_eq!(b.party_name, "B");
        assert_eq!(b.party_id, parties[1].id);
    }

    #[test]
    fn test_meters_summed_per_party() {
        let parties = vec![
            party("A", 10.0, &[10.0, 30.0], 0.0),
            party("B", 10.0, &[60.0], 0.0),
        ];
        let result = calculate(&parties, 0.0, 100.0);

        assert_eq!(result.parties[0].meters_sum, 40.0);
        assert_eq!(result.parties[0].heat_share, 40.0);
        assert_eq!(result.parties[1].heat_share, 60.0);
    }

    #[test]
    fn test_zero_floor_area_collapses_base_shares() {
        let parties = vec![party("A", 0.0, &[1.0], 0.0), party("B", 0.0, &[3.0], 0.0)];
        let result = calculate(&parties, 300.0, 400.0);

        assert!(result.parties.iter().all(|p| p.base_share == 0.0));
        assert_eq!(result.parties[0].heat_share, 100.0);
        assert_eq!(result.parties[1].heat_share, 300.0);
    }

    #[test]
    fn test_zero_meters_collapses_heat_shares() {
        let parties = vec![party("A", 20.0, &[0.0], 0.0), party("B", 60.0, &[0.0], 0.0)];
        let result = calculate(&parties, 100.0, 500.0);

        assert!(result.parties.iter().all(|p| p.heat_share == 0.0));
        assert_eq!(result.parties[0].base_share, 25.0);
        assert_eq!(result.parties[1].base_share, 75.0);
    }

    #[test]
    fn test_negative_and_non_finite_inputs_clamped() {
        let parties = vec![
            party("A", -30.0, &[-5.0, f64::NAN], -10.0),
            party("B", 10.0, &[f64::INFINITY, 5.0], 0.0),
        ];
        let result = calculate(&parties, -100.0, f64::NAN);

        assert_eq!(result.total_sqm, 10.0);
        assert_eq!(result.total_meters, 5.0);
        for p in &result.parties {
            assert_eq!(p.base_share, 0.0);
            assert_eq!(p.heat_share, 0.0);
            assert_eq!(p.total, 0.0);
            assert_eq!(p.balance, 0.0);
        }
        assert_eq!(result.parties[0].sqm, 0.0);
        assert_eq!(result.parties[0].prepayment, 0.0);
    }

    #[test]
    fn test_balance_signs() {
        let parties = vec![
            party("owes", 10.0, &[1.0], 100.0),
            party("refund", 10.0, &[1.0], 400.0),
            party("settled", 10.0, &[1.0], 200.0),
        ];
        let result = calculate(&parties, 300.0, 300.0);

        assert_eq!(result.parties[0].total, 200.0);
        assert_eq!(result.parties[0].balance, 100.0);
        assert_eq!(result.parties[1].balance, -200.0);
        assert_eq!(result.parties[2].balance, 0.0);
    }

    #[test]
    fn test_shares_rounded_independently() {
        let parties = vec![
            party("A", 1.0, &[1.0], 0.0),
            party("B", 1.0, &[1.0], 0.0),
            party("C", 1.0, &[1.0], 0.0),
        ];
        let result = calculate(&parties, 100.0, 0.0);

        assert!(result.parties.iter().all(|p| p.base_share == 33.33));
        let sum: f64 = result.parties.iter().map(|p| p.base_share).sum();
        assert!((sum - 100.0).abs() <= 0.01 * parties.len() as f64);
    }

    #[test]
    fn test_order_preserved_and_empty_input() {
        let parties = vec![party("X", 1.0, &[1.0], 0.0), party("Y", 2.0, &[1.0], 0.0)];
        let names: Vec<_> = calculate(&parties, 1.0, 1.0)
            .parties
            .into_iter()
            .map(|p| p.party_name)
            .collect();
        assert_eq!(names, vec!["X", "Y"]);

        let empty = calculate(&[], 100.0, 100.0);
        assert!(empty.parties.is_empty());
        assert_eq!(empty.total_sqm, 0.0);
    }
}
