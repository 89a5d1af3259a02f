//! Named reporting horizons and the day-count convention.
//!
//! Every horizon converts to an elapsed day count before exponentiation:
//! a day is 1, a week 7, a month 30, and a year twelve months (360).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

pub const DAYS_PER_WEEK: u32 = 7;
pub const DAYS_PER_MONTH: u32 = 30;
pub const DAYS_PER_YEAR: u32 = 12 * DAYS_PER_MONTH;

#[derive(Debug, Error, PartialEq)]
pub enum HorizonParseError {
    #[error("expected \"<Unit> <N>\" (e.g. \"Month 6\"), got {0:?}")]
    Malformed(String),

    #[error("unknown horizon unit {0:?} (expected Day, Week, Month, or Year)")]
    UnknownUnit(String),

    #[error("horizon count must be a positive integer, got {0:?}")]
    InvalidCount(String),
}

/// A named point in elapsed time at which projected values are reported.
///
/// Serialized as its display form, e.g. `"Month 6"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Horizon {
    Day(u32),
    Week(u32),
    Month(u32),
    Year(u32),
}

impl Horizon {
    /// Elapsed days under the fixed convention.
    pub fn days(&self) -> u32 {
        match *self {
            Horizon::Day(n) => n,
            Horizon::Week(n) => n.saturating_mul(DAYS_PER_WEEK),
            Horizon::Month(n) => n.saturating_mul(DAYS_PER_MONTH),
            Horizon::Year(n) => n.saturating_mul(DAYS_PER_YEAR),
        }
    }

    pub fn count(&self) -> u32 {
        match *self {
            Horizon::Day(n) | Horizon::Week(n) | Horizon::Month(n) | Horizon::Year(n) => n,
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Horizon::Day(_) => "Day",
            Horizon::Week(_) => "Week",
            Horizon::Month(_) => "Month",
            Horizon::Year(_) => "Year",
        }
    }

    /// The page's reporting schedule: months 1, 3, 6, 9, 12, 18, 24.
    pub fn page_schedule() -> Vec<Horizon> {
        [1, 3, 6, 9, 12, 18, 24]
            .into_iter()
            .map(Horizon::Month)
            .collect()
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.unit(), self.count())
    }
}

impl FromStr for Horizon {
    type Err = HorizonParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let (Some(unit), Some(count), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(HorizonParseError::Malformed(s.to_string()));
        };

        let n: u32 = count
            .parse()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| HorizonParseError::InvalidCount(count.to_string()))?;

        let unit_lower = unit.to_ascii_lowercase();
        match unit_lower.strip_suffix('s').unwrap_or(unit_lower.as_str()) {
            "day" => Ok(Horizon::Day(n)),
            "week" => Ok(Horizon::Week(n)),
            "month" => Ok(Horizon::Month(n)),
            "year" => Ok(Horizon::Year(n)),
            _ => Err(HorizonParseError::UnknownUnit(unit.to_string())),
        }
    }
}

impl TryFrom<String> for Horizon {
    type Error = HorizonParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Horizon> for String {
    fn from(h: Horizon) -> Self {
        h.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_count_convention() {
        assert_eq!(Horizon::Day(3).days(), 3);
        assert_eq!(Horizon::Week(2).days(), 14);
        assert_eq!(Horizon::Month(6).days(), 180);
        assert_eq!(Horizon::Year(2).days(), 720);
    }

    #[test]
    fn parse_and_display() {
        let h: Horizon = "Month 18".parse().unwrap();
        assert_eq!(h, Horizon::Month(18));
        assert_eq!(h.to_string(), "Month 18");
        assert_eq!("days 4".parse::<Horizon>().unwrap(), Horizon::Day(4));
        assert_eq!("  YEAR   1 ".parse::<Horizon>().unwrap(), Horizon::Year(1));
    }

    #[test]
    fn parse_errors() {
        assert!(matches!(
            "Month".parse::<Horizon>(),
            Err(HorizonParseError::Malformed(_))
        ));
        assert!(matches!(
            "Month 0".parse::<Horizon>(),
            Err(HorizonParseError::InvalidCount(_))
        ));
        assert!(matches!(
            "Month -2".parse::<Horizon>(),
            Err(HorizonParseError::InvalidCount(_))
        ));
        assert!(matches!(
            "Fortnight 2".parse::<Horizon>(),
            Err(HorizonParseError::UnknownUnit(_))
        ));
        for doubled in ["Dayss 3", "monthsss 1"] {
            assert!(matches!(
                doubled.parse::<Horizon>(),
                Err(HorizonParseError::UnknownUnit(_))
            ));
        }
        assert!(matches!(
            "Month 2 extra".parse::<Horizon>(),
            Err(HorizonParseError::Malformed(_))
        ));
    }

    #[test]
    fn serde_uses_display_form() {
        let json = serde_json::to_string(&Horizon::Week(3)).unwrap();
        assert_eq!(json, "\"Week 3\"");
        let back: Horizon = serde_json::from_str("\"Month 12\"").unwrap();
        assert_eq!(back, Horizon::Month(12));
        assert!(serde_json::from_str::<Horizon>("\"Month zero\"").is_err());
    }

    #[test]
    fn page_schedule_is_time_ordered() {
        let schedule = Horizon::page_schedule();
        assert_eq!(schedule.len(), 7);
        assert!(schedule.windows(2).all(|w| w[0].days() < w[1].days()));
    }
}
