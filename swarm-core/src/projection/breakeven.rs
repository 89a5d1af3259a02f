//! Breakeven: elapsed time until compounded profit covers the purchase price.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::assumptions::ProjectionAssumptions;
use super::engine::daily_growth_factor;

#[derive(Debug, Error, PartialEq)]
pub enum BreakevenError {
    #[error("purchase price must be a finite, non-negative amount, got {0}")]
    InvalidPurchasePrice(f64),
}

/// Breakeven duration, or the explicit marker that it never happens.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "days", rename_all = "snake_case")]
pub enum Breakeven {
    /// Continuous elapsed days (not rounded to whole days).
    Days(f64),
    /// Growth is non-positive; profit never reaches the price.
    NotApplicable,
}

impl Breakeven {
    pub fn days(&self) -> Option<f64> {
        match *self {
            Breakeven::Days(d) => Some(d),
            Breakeven::NotApplicable => None,
        }
    }

    pub fn is_applicable(&self) -> bool {
        matches!(self, Breakeven::Days(_))
    }

    pub fn hours(&self) -> Option<f64> {
        self.days().map(|d| d * 24.0)
    }

    /// As a `chrono` duration, millisecond precision.
    pub fn as_duration(&self) -> Option<chrono::TimeDelta> {
        let millis = self.days()? * 86_400_000.0;
        if millis > i64::MAX as f64 {
            return None;
        }
        chrono::TimeDelta::try_milliseconds(millis.round() as i64)
    }

    /// Card-style label: `~18 hours`, `~8 days`, `~7 months`, or `n/a`.
    pub fn humanize(&self) -> String {
        let Some(days) = self.days() else {
            return "n/a".to_string();
        };
        let hours = days * 24.0;
        if hours < 1.0 {
            "< 1 hour".to_string()
        } else if hours < 23.5 {
            plural(hours.round(), "hour")
        } else if days < 59.5 {
            plural(days.round(), "day")
        } else {
            plural((days / 30.0).round(), "month")
        }
    }
}

impl fmt::Display for Breakeven {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.humanize())
    }
}

fn plural(n: f64, unit: &str) -> String {
    if n == 1.0 {
        format!("~1 {unit}")
    } else {
        format!("~{n:.0} {unit}s")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreakevenResult {
    pub tier: f64,
    pub elapsed_to_recover: Breakeven,
}

/// Smallest continuous day count `d` with `tier * factor^d - tier >= price`,
/// for every tier in order.
///
/// `d = ln(1 + price / tier) / ln(factor)`. When `factor <= 1` every tier is
/// `NotApplicable`.
pub fn compute_breakeven(
    a: &ProjectionAssumptions,
    purchase_price: f64,
) -> Result<Vec<BreakevenResult>, BreakevenError> {
    if !(purchase_price.is_finite() && purchase_price >= 0.0) {
        return Err(BreakevenError::InvalidPurchasePrice(purchase_price));
    }

    let factor = daily_growth_factor(a);
    let log_factor = factor.ln();

    Ok(a.capital_tiers()
        .iter()
        .map(|&tier| {
            let elapsed = if factor <= 1.0 || !(log_factor.is_finite() && log_factor > 0.0) {
                Breakeven::NotApplicable
            } else {
                Breakeven::Days((purchase_price / tier).ln_1p() / log_factor)
            };
            BreakevenResult {
                tier,
                elapsed_to_recover: elapsed,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::assumptions::AssumptionsConfig;

    #[test]
    fn humanize_buckets() {
        assert_eq!(Breakeven::NotApplicable.humanize(), "n/a");
        assert_eq!(Breakeven::Days(0.01).humanize(), "< 1 hour");
        assert_eq!(Breakeven::Days(0.75).humanize(), "~18 hours");
        assert_eq!(Breakeven::Days(1.2 / 24.0).humanize(), "~1 hour");
        assert_eq!(Breakeven::Days(8.2).humanize(), "~8 days");
        assert_eq!(Breakeven::Days(207.7).humanize(), "~7 months");
    }

    #[test]
    fn duration_conversion() {
        let d = Breakeven::Days(1.5).as_duration().unwrap();
        assert_eq!(d.num_hours(), 36);
        assert!(Breakeven::NotApplicable.as_duration().is_none());
        assert!(Breakeven::Days(1e300).as_duration().is_none());
    }

    #[test]
    fn zero_price_is_immediate() {
        let a = ProjectionAssumptions::page_defaults();
        let results = compute_breakeven(&a, 0.0).unwrap();
        assert!(results
            .iter()
            .all(|r| r.elapsed_to_recover == Breakeven::Days(0.0)));
    }

    #[test]
    fn rejects_invalid_price() {
        let a = ProjectionAssumptions::page_defaults();
        assert_eq!(
            compute_breakeven(&a, -5.0),
            Err(BreakevenError::InvalidPurchasePrice(-5.0))
        );
        assert!(compute_breakeven(&a, f64::NAN).is_err());
    }

    #[test]
    fn losing_system_never_breaks_even() {
        let a = AssumptionsConfig {
            win_rate: 0.0,
            ..AssumptionsConfig::default()
        }
        .validate()
        .unwrap();
        let results = compute_breakeven(&a, 25_000.0).unwrap();
        assert!(results
            .iter()
            .all(|r| r.elapsed_to_recover == Breakeven::NotApplicable));
    }

    #[test]
    fn serializes_with_explicit_marker() {
        let json = serde_json::to_string(&Breakeven::NotApplicable).unwrap();
        assert_eq!(json, r#"{"kind":"not_applicable"}"#);
        let json = serde_json::to_string(&Breakeven::Days(2.5)).unwrap();
        assert_eq!(json, r#"{"kind":"days","days":2.5}"#);
    }
}
