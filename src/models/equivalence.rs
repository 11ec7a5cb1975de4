//! Equivalence result models for the Salary Equivalence Engine.
//!
//! This module contains the [`EquivalenceMatrix`] produced by the engine and
//! the [`EquivalenceResult`] envelope returned over HTTP, including its audit
//! trace.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Currency, PayPeriod, SalaryObservation};

/// The full period × currency grid of salary figures for one observation.
///
/// Rows are pay periods (shortest first), columns are currencies. Every cell
/// is derived from the single yearly figure of its currency.
///
/// # Example
///
/// ```
/// use salary_equivalence::models::{Currency, EquivalenceMatrix, PayPeriod};
/// use rust_decimal::Decimal;
///
/// let pln = Currency::new("PLN").unwrap();
/// let mut matrix = EquivalenceMatrix::default();
/// matrix.insert(PayPeriod::Yearly, pln.clone(), Decimal::new(120000, 0));
///
/// assert_eq!(matrix.get(PayPeriod::Yearly, &pln), Some(Decimal::new(120000, 0)));
/// assert_eq!(matrix.get(PayPeriod::Hourly, &pln), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EquivalenceMatrix {
    cells: BTreeMap<PayPeriod, BTreeMap<Currency, Decimal>>,
}

impl EquivalenceMatrix {
    /// Sets the value of one cell.
    pub fn insert(&mut self, period: PayPeriod, currency: Currency, value: Decimal) {
        self.cells.entry(period).or_default().insert(currency, value);
    }

    /// Returns the value of one cell, if present.
    pub fn get(&self, period: PayPeriod, currency: &Currency) -> Option<Decimal> {
        self.cells.get(&period).and_then(|row| row.get(currency)).copied()
    }

    /// Returns one row of the matrix.
    pub fn row(&self, period: PayPeriod) -> Option<&BTreeMap<Currency, Decimal>> {
        self.cells.get(&period)
    }

    /// Returns the periods present, shortest first.
    pub fn periods(&self) -> impl Iterator<Item = PayPeriod> + '_ {
        self.cells.keys().copied()
    }

    /// Iterates over every cell as `(period, currency, value)`.
    pub fn iter(&self) -> impl Iterator<Item = (PayPeriod, &Currency, Decimal)> {
        self.cells.iter().flat_map(|(period, row)| {
            row.iter()
                .map(move |(currency, value)| (*period, currency, *value))
        })
    }

    /// Returns the number of cells.
    pub fn len(&self) -> usize {
        self.cells.values().map(BTreeMap::len).sum()
    }

    /// Returns true if the matrix has no cells.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a copy with every cell rounded to `dp` decimal places.
    ///
    /// Rounding is a presentation concern; the engine itself never rounds.
    /// Midpoints round away from zero, so `0.125` shows as `0.13`.
    pub fn rounded(&self, dp: u32) -> Self {
        let cells = self
            .cells
            .iter()
            .map(|(period, row)| {
                let row = row
                    .iter()
                    .map(|(currency, value)| {
                        let value =
                            value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
                        (currency.clone(), value)
                    })
                    .collect();
                (*period, row)
            })
            .collect();
        Self { cells }
    }
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag inputs worth a second look that do not stop the calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The calculation steps in order.
    pub steps: Vec<AuditStep>,
    /// Warnings raised while calculating.
    pub warnings: Vec<AuditWarning>,
    /// Wall-clock duration of the calculation in microseconds.
    pub duration_us: u64,
}

/// The complete result of an equivalence calculation, as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquivalenceResult {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that produced the result.
    pub engine_version: String,
    /// The observation the matrix was derived from.
    pub observation: SalaryObservation,
    /// The period × currency grid.
    pub matrix: EquivalenceMatrix,
    /// Decimal places the matrix was rounded to, if the caller asked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rounded_to: Option<u32>,
    /// The audit trace.
    pub audit_trace: AuditTrace,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn ccy(code: &str) -> Currency {
        Currency::new(code).unwrap()
    }

    fn sample_matrix() -> EquivalenceMatrix {
        let mut matrix = EquivalenceMatrix::default();
        matrix.insert(PayPeriod::Yearly, ccy("PLN"), dec("120000"));
        matrix.insert(PayPeriod::Yearly, ccy("EUR"), dec("27600"));
        matrix.insert(PayPeriod::Hourly, ccy("PLN"), dec("57.692307692307692307692307692"));
        matrix
    }

    #[test]
    fn test_len_counts_cells() {
        let matrix = sample_matrix();
        assert_eq!(matrix.len(), 3);
        assert!(!matrix.is_empty());
        assert!(EquivalenceMatrix::default().is_empty());
    }

    #[test]
    fn test_periods_are_shortest_first() {
        let periods: Vec<PayPeriod> = sample_matrix().periods().collect();
        assert_eq!(periods, vec![PayPeriod::Hourly, PayPeriod::Yearly]);
    }

    #[test]
    fn test_serialize_nested_period_currency_shape() {
        let json = serde_json::to_value(sample_matrix()).unwrap();
        assert_eq!(json["yearly"]["PLN"], "120000");
        assert_eq!(json["yearly"]["EUR"], "27600");
        assert!(json["hourly"]["PLN"].as_str().unwrap().starts_with("57.69"));
    }

    #[test]
    fn test_deserialize_nested_shape() {
        let json = r#"{"monthly": {"USD": "2500"}}"#;
        let matrix: EquivalenceMatrix = serde_json::from_str(json).unwrap();
        assert_eq!(matrix.get(PayPeriod::Monthly, &ccy("USD")), Some(dec("2500")));
    }

    #[test]
    fn test_rounded_leaves_original_untouched() {
        let matrix = sample_matrix();
        let rounded = matrix.rounded(2);
        assert_eq!(rounded.get(PayPeriod::Hourly, &ccy("PLN")), Some(dec("57.69")));
        assert_eq!(
            matrix.get(PayPeriod::Hourly, &ccy("PLN")),
            Some(dec("57.692307692307692307692307692"))
        );
    }

    #[test]
    fn test_rounded_midpoint_goes_away_from_zero() {
        let mut matrix = EquivalenceMatrix::default();
        matrix.insert(PayPeriod::Daily, ccy("GBP"), dec("0.125"));
        matrix.insert(PayPeriod::Daily, ccy("EUR"), dec("0.135"));
        let rounded = matrix.rounded(2);
        assert_eq!(rounded.get(PayPeriod::Daily, &ccy("GBP")), Some(dec("0.13")));
        assert_eq!(rounded.get(PayPeriod::Daily, &ccy("EUR")), Some(dec("0.14")));
    }
}
