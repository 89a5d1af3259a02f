//! Validated financial assumptions for the projection model.
//!
//! `AssumptionsConfig` is the plain, serializable input. `ProjectionAssumptions`
//! can only be obtained by validating one, so the engine never computes
//! against invalid numbers. Deserializing `ProjectionAssumptions` directly runs
//! the same validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::engine::{daily_growth_factor, project_value};
use super::horizon::Horizon;

/// Configuration errors, rejected at construction and never clamped.
#[derive(Debug, Error, PartialEq)]
pub enum AssumptionsError {
    #[error("win_rate must lie in [0, 1], got {0}")]
    WinRateOutOfRange(f64),

    #[error("{field} must be a finite, non-negative percentage, got {value}")]
    InvalidPercentage { field: &'static str, value: f64 },

    #[error("kelly_fraction_of_equity must lie in (0, 1], got {0}")]
    KellyOutOfRange(f64),

    #[error("trades_per_day must be positive")]
    ZeroTradesPerDay,

    #[error("capital_tiers must not be empty")]
    EmptyCapitalTiers,

    #[error("capital tier {0} must be a finite, positive amount")]
    NonPositiveTier(f64),

    #[error("capital tiers must be distinct and ascending: {previous} is followed by {next}")]
    TiersNotAscending { previous: f64, next: f64 },

    #[error("horizons must not be empty")]
    EmptyHorizons,

    #[error("horizons must be strictly time-ordered: {previous} is followed by {next}")]
    HorizonsNotIncreasing { previous: Horizon, next: Horizon },

    #[error("a losing trade would wipe out equity (loss of {0:.4} of equity per trade)")]
    LossWipesEquity(f64),

    #[error("daily growth factor must be finite and positive, got {0}")]
    DegenerateGrowth(f64),

    #[error("projected value of tier {tier} overflows by {horizon}")]
    ProjectionOverflow { tier: f64, horizon: Horizon },
}

/// Raw, unvalidated assumptions as they appear in a config file.
///
/// `avg_win_pct` and `avg_loss_pct` are percentages of position size
/// (`1.8` means 1.8 %).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssumptionsConfig {
    pub win_rate: f64,
    pub avg_win_pct: f64,
    pub avg_loss_pct: f64,
    pub kelly_fraction_of_equity: f64,
    pub trades_per_day: u32,
    pub capital_tiers: Vec<f64>,
    pub horizons: Vec<Horizon>,
}

impl Default for AssumptionsConfig {
    /// The figures quoted on the page.
    fn default() -> Self {
        Self {
            win_rate: 0.75,
            avg_win_pct: 1.8,
            avg_loss_pct: 1.1,
            kelly_fraction_of_equity: 0.02,
            trades_per_day: 5,
            capital_tiers: vec![1_000.0, 10_000.0, 25_000.0, 100_000.0, 500_000.0],
            horizons: Horizon::page_schedule(),
        }
    }
}

impl AssumptionsConfig {
    pub fn validate(self) -> Result<ProjectionAssumptions, AssumptionsError> {
        ProjectionAssumptions::new(self)
    }
}

/// Immutable, validated assumptions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AssumptionsConfig", into = "AssumptionsConfig")]
pub struct ProjectionAssumptions {
    config: AssumptionsConfig,
}

impl ProjectionAssumptions {
    pub fn new(config: AssumptionsConfig) -> Result<Self, AssumptionsError> {
        if !(0.0..=1.0).contains(&config.win_rate) {
            return Err(AssumptionsError::WinRateOutOfRange(config.win_rate));
        }
        check_percentage("avg_win_pct", config.avg_win_pct)?;
        check_percentage("avg_loss_pct", config.avg_loss_pct)?;

        let kelly = config.kelly_fraction_of_equity;
        if !(kelly > 0.0 && kelly <= 1.0) {
            return Err(AssumptionsError::KellyOutOfRange(kelly));
        }

        if config.trades_per_day == 0 {
            return Err(AssumptionsError::ZeroTradesPerDay);
        }

        if config.capital_tiers.is_empty() {
            return Err(AssumptionsError::EmptyCapitalTiers);
        }
        if let Some(&bad) = config
            .capital_tiers
            .iter()
            .find(|t| !(t.is_finite() && **t > 0.0))
        {
            return Err(AssumptionsError::NonPositiveTier(bad));
        }
        if let Some(w) = config.capital_tiers.windows(2).find(|w| w[0] >= w[1]) {
            return Err(AssumptionsError::TiersNotAscending {
                previous: w[0],
                next: w[1],
            });
        }

        if config.horizons.is_empty() {
            return Err(AssumptionsError::EmptyHorizons);
        }
        if let Some(w) = config
            .horizons
            .windows(2)
            .find(|w| w[0].days() >= w[1].days())
        {
            return Err(AssumptionsError::HorizonsNotIncreasing {
                previous: w[0],
                next: w[1],
            });
        }

        // The worst single trade must leave some equity, so the per-trade
        // multiplier (and every power of it) stays positive.
        let worst_loss = config.avg_loss_pct / 100.0 * kelly;
        if worst_loss >= 1.0 {
            return Err(AssumptionsError::LossWipesEquity(worst_loss));
        }

        let assumptions = Self { config };
        let factor = daily_growth_factor(&assumptions);
        if !(factor.is_finite() && factor > 0.0) {
            return Err(AssumptionsError::DegenerateGrowth(factor));
        }
        // Tiers and horizons are ascending, so the last cell is the largest.
        let (tier, horizon) = (assumptions.last_tier(), assumptions.last_horizon());
        if !project_value(&assumptions, tier, f64::from(horizon.days())).is_finite() {
            return Err(AssumptionsError::ProjectionOverflow { tier, horizon });
        }

        Ok(assumptions)
    }

    /// The page's figures, which always validate.
    pub fn page_defaults() -> Self {
        Self {
            config: AssumptionsConfig::default(),
        }
    }

    pub fn win_rate(&self) -> f64 {
        self.config.win_rate
    }

    pub fn avg_win_pct(&self) -> f64 {
        self.config.avg_win_pct
    }

    pub fn avg_loss_pct(&self) -> f64 {
        self.config.avg_loss_pct
    }

    pub fn kelly_fraction_of_equity(&self) -> f64 {
        self.config.kelly_fraction_of_equity
    }

    pub fn trades_per_day(&self) -> u32 {
        self.config.trades_per_day
    }

    pub fn capital_tiers(&self) -> &[f64] {
        &self.config.capital_tiers
    }

    pub fn horizons(&self) -> &[Horizon] {
        &self.config.horizons
    }

    fn last_tier(&self) -> f64 {
        self.config.capital_tiers.last().copied().unwrap_or_default()
    }

    fn last_horizon(&self) -> Horizon {
        self.config.horizons.last().copied().unwrap_or(Horizon::Day(0))
    }

    pub fn config(&self) -> &AssumptionsConfig {
        &self.config
    }

    /// Content hash of the assumption set.
    ///
    /// Two sets with the same fingerprint produce identical projections, so a
    /// changed fingerprint is the signal to discard results and recompute.
    pub fn fingerprint(&self) -> String {
        let json = serde_json::to_string(&self.config).unwrap_or_default();
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }
}

impl TryFrom<AssumptionsConfig> for ProjectionAssumptions {
    type Error = AssumptionsError;

    fn try_from(config: AssumptionsConfig) -> Result<Self, Self::Error> {
        Self::new(config)
    }
}

impl From<ProjectionAssumptions> for AssumptionsConfig {
    fn from(a: ProjectionAssumptions) -> Self {
        a.config
    }
}

fn check_percentage(field: &'static str, value: f64) -> Result<(), AssumptionsError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(AssumptionsError::InvalidPercentage { field, value })
    }
}
