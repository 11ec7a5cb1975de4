//! Pay period model.
//!
//! This module contains the [`PayPeriod`] enumeration: the cadence over which a
//! salary figure is quoted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// The cadence over which a salary is quoted.
///
/// The variants are ordered from the shortest to the longest period, which is
/// also the row order of an [`EquivalenceMatrix`](super::EquivalenceMatrix).
/// Whether a period is usable at all is decided by configuration; see
/// [`PayPeriodConverter`](crate::calculation::PayPeriodConverter).
///
/// # Example
///
/// ```
/// use salary_equivalence::models::PayPeriod;
///
/// let period: PayPeriod = "Monthly".parse().unwrap();
/// assert_eq!(period, PayPeriod::Monthly);
/// assert_eq!(period.to_string(), "monthly");
/// assert!("fortnightly".parse::<PayPeriod>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayPeriod {
    /// Paid per hour worked.
    Hourly,
    /// Paid per working day.
    Daily,
    /// Paid per calendar month.
    Monthly,
    /// Paid per year.
    Yearly,
}

impl PayPeriod {
    /// All periods, shortest first.
    pub const ALL: [PayPeriod; 4] = [
        PayPeriod::Hourly,
        PayPeriod::Daily,
        PayPeriod::Monthly,
        PayPeriod::Yearly,
    ];

    /// Returns the lower-case name used on the wire and in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            PayPeriod::Hourly => "hourly",
            PayPeriod::Daily => "daily",
            PayPeriod::Monthly => "monthly",
            PayPeriod::Yearly => "yearly",
        }
    }
}

impl fmt::Display for PayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PayPeriod {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hourly" => Ok(PayPeriod::Hourly),
            "daily" => Ok(PayPeriod::Daily),
            "monthly" => Ok(PayPeriod::Monthly),
            "yearly" | "annual" | "annually" => Ok(PayPeriod::Yearly),
            _ => Err(EngineError::InvalidPeriod {
                period: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("HOURLY".parse::<PayPeriod>().unwrap(), PayPeriod::Hourly);
        assert_eq!(" daily ".parse::<PayPeriod>().unwrap(), PayPeriod::Daily);
        assert_eq!("annual".parse::<PayPeriod>().unwrap(), PayPeriod::Yearly);
    }

    #[test]
    fn test_parse_unknown_period_returns_invalid_period() {
        match "weekly".parse::<PayPeriod>() {
            Err(EngineError::InvalidPeriod { period }) => assert_eq!(period, "weekly"),
            other => panic!("Expected InvalidPeriod, got {:?}", other),
        }
    }

    #[test]
    fn test_display_matches_parse() {
        for period in PayPeriod::ALL {
            assert_eq!(period.to_string().parse::<PayPeriod>().unwrap(), period);
        }
    }

    #[test]
    fn test_periods_order_shortest_first() {
        let mut periods = vec![PayPeriod::Yearly, PayPeriod::Hourly, PayPeriod::Monthly];
        periods.sort();
        assert_eq!(
            periods,
            vec![PayPeriod::Hourly, PayPeriod::Monthly, PayPeriod::Yearly]
        );
    }

    #[test]
    fn test_serialize_lowercase() {
        assert_eq!(
            serde_json::to_string(&PayPeriod::Monthly).unwrap(),
            "\"monthly\""
        );
        let period: PayPeriod = serde_json::from_str("\"yearly\"").unwrap();
        assert_eq!(period, PayPeriod::Yearly);
    }
}
