//! Settlement summary for one document

use serde::Serialize;

use crate::models::{non_negative, round2, AppState, CostPools};

use super::allocation::{calculate, CalculationResult};

/// Everything the overview shows for a settlement document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettlementSummary {
    pub total_amount: f64,
    pub pools: CostPools,
    pub total_prepayments: f64,
    /// `total_amount - total_prepayments`, rounded
    pub total_balance: f64,
    /// The balance split with the same ratio as the cost pools
    pub balance_pools: CostPools,
    pub result: CalculationResult,
    /// Base costs exist but no floor area was recorded
    pub sqm_warning: bool,
    /// Heat costs exist but no meter reading was recorded
    pub meter_warning: bool,
}

/// Summarize `state`, splitting the total with `base_ratio` (0.0..=1.0)
pub fn summarize(state: &AppState, base_ratio: f64) -> SettlementSummary {
    let total_amount = non_negative(state.total_amount);
    let pools = CostPools::from_total(total_amount, base_ratio);

    let total_prepayments = state.total_prepayments();
    let total_balance = round2(total_amount - total_prepayments);
    let balance_pools = split_signed(total_balance, base_ratio);

    let result = calculate(&state.parties, pools.base_total, pools.heat_total);
    let sqm_warning = pools.base_total > 0.0 && result.total_sqm <= 0.0;
    let meter_warning = pools.heat_total > 0.0 && result.total_meters <= 0.0;

    SettlementSummary {
        total_amount,
        pools,
        total_prepayments,
        total_balance,
        balance_pools,
        result,
        sqm_warning,
        meter_warning,
    }
}

// The balance may be negative, so it cannot go through `CostPools::from_total`.
fn split_signed(amount: f64, base_ratio: f64) -> CostPools {
    let ratio = if base_ratio.is_finite() {
        base_ratio.clamp(0.0, 1.0)
    } else {
        0.0
    };
    CostPools {
        base_total: round2(amount * ratio),
        heat_total: round2(amount * (1.0 - ratio)),
    }
}
