//! Compounding projection: expected value per trade, daily growth, and the
//! projected-value table.
//!
//! Everything here is a pure function of `ProjectionAssumptions`. Identical
//! inputs always produce bit-identical outputs.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::assumptions::ProjectionAssumptions;
use super::breakeven::{compute_breakeven, BreakevenError, BreakevenResult};
use super::horizon::{Horizon, DAYS_PER_MONTH};

/// Projected account value for one starting tier at one horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierValue {
    pub tier: f64,
    pub value: f64,
}

/// One row of the projection table. `values_by_tier` follows tier order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRow {
    pub horizon: Horizon,
    pub days_elapsed: u32,
    pub values_by_tier: Vec<TierValue>,
}

impl ProjectionRow {
    pub fn value_for(&self, tier: f64) -> Option<f64> {
        self.values_by_tier
            .iter()
            .find(|tv| tv.tier == tier)
            .map(|tv| tv.value)
    }
}

/// Expected value of one trade as a fraction of position size.
///
/// `(win_rate * avg_win_pct - (1 - win_rate) * avg_loss_pct) / 100`
pub fn position_expected_value(a: &ProjectionAssumptions) -> f64 {
    (a.win_rate() * a.avg_win_pct() - (1.0 - a.win_rate()) * a.avg_loss_pct()) / 100.0
}

/// Expected equity growth per trade: position EV scaled by the Kelly fraction.
pub fn expected_value_per_trade(a: &ProjectionAssumptions) -> f64 {
    position_expected_value(a) * a.kelly_fraction_of_equity()
}

/// `(1 + ev_per_trade) ^ trades_per_day`. Always positive for valid assumptions.
pub fn daily_growth_factor(a: &ProjectionAssumptions) -> f64 {
    (1.0 + expected_value_per_trade(a)).powf(f64::from(a.trades_per_day()))
}

/// Fractional growth over `days` of compounding (`0.032` = 3.2 %).
pub fn growth_over_days(a: &ProjectionAssumptions, days: f64) -> f64 {
    daily_growth_factor(a).powf(days) - 1.0
}

/// Fractional growth over one 30-day month.
pub fn monthly_growth_rate(a: &ProjectionAssumptions) -> f64 {
    growth_over_days(a, DAYS_PER_MONTH as f64)
}

/// Projected value of `tier` after `days` of compounding.
pub fn project_value(a: &ProjectionAssumptions, tier: f64, days: f64) -> f64 {
    tier * daily_growth_factor(a).powf(days)
}

/// Profit (projected value minus starting capital) at a horizon.
pub fn profit_at(a: &ProjectionAssumptions, tier: f64, horizon: Horizon) -> f64 {
    project_value(a, tier, horizon.days() as f64) - tier
}

/// The full projection table, one row per horizon in configured order.
pub fn compute_projection(a: &ProjectionAssumptions) -> Vec<ProjectionRow> {
    let factor = daily_growth_factor(a);
    debug!(
        daily_factor = factor,
        tiers = a.capital_tiers().len(),
        horizons = a.horizons().len(),
        "computing projection"
    );

    a.horizons()
        .iter()
        .map(|&horizon| {
            let days = horizon.days();
            let growth = factor.powf(days as f64);
            ProjectionRow {
                horizon,
                days_elapsed: days,
                values_by_tier: a
                    .capital_tiers()
                    .iter()
                    .map(|&tier| TierValue {
                        tier,
                        value: tier * growth,
                    })
                    .collect(),
            }
        })
        .collect()
}

/// Assumptions plus the reference purchase price, as the page consumes them.
///
/// Holds no mutable state; construct a new engine when assumptions change.
/// Breakeven is computed once here, since it is the only fallible figure.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionEngine {
    assumptions: ProjectionAssumptions,
    purchase_price: f64,
    breakeven: Vec<BreakevenResult>,
}

impl ProjectionEngine {
    pub fn new(
        assumptions: ProjectionAssumptions,
        purchase_price: f64,
    ) -> Result<Self, BreakevenError> {
        let breakeven = compute_breakeven(&assumptions, purchase_price)?;
        Ok(Self {
            assumptions,
            purchase_price,
            breakeven,
        })
    }

    pub fn assumptions(&self) -> &ProjectionAssumptions {
        &self.assumptions
    }

    pub fn purchase_price(&self) -> f64 {
        self.purchase_price
    }

    pub fn expected_value_per_trade(&self) -> f64 {
        expected_value_per_trade(&self.assumptions)
    }

    pub fn daily_growth_factor(&self) -> f64 {
        daily_growth_factor(&self.assumptions)
    }

    pub fn monthly_growth_rate(&self) -> f64 {
        monthly_growth_rate(&self.assumptions)
    }

    pub fn projection(&self) -> Vec<ProjectionRow> {
        compute_projection(&self.assumptions)
    }

    pub fn breakeven(&self) -> &[BreakevenResult] {
        &self.breakeven
    }
}
