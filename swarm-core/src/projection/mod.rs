//! Compounding-return projection model.
//!
//! From a validated set of assumptions, derives the projected account value
//! for every capital tier at every horizon, and the time each tier needs to
//! recover a fixed purchase price.

pub mod assumptions;
pub mod breakeven;
pub mod engine;
pub mod format;
pub mod horizon;

pub use assumptions::{AssumptionsConfig, AssumptionsError, ProjectionAssumptions};
pub use breakeven::{compute_breakeven, Breakeven, BreakevenError, BreakevenResult};
pub use engine::{
    compute_projection, daily_growth_factor, expected_value_per_trade, growth_over_days,
    monthly_growth_rate, position_expected_value, profit_at, project_value, ProjectionEngine,
    ProjectionRow, TierValue,
};
pub use horizon::{Horizon, HorizonParseError, DAYS_PER_MONTH, DAYS_PER_WEEK, DAYS_PER_YEAR};
