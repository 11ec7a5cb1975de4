//! Pay period conversion functionality.
//!
//! This module translates an amount quoted over one pay period into any other
//! pay period within a single currency. Every factor comes from one shared
//! [`WorkingTimeAssumptions`] value, so no two conversions can disagree about
//! how long a month is.

use std::collections::BTreeSet;

use rust_decimal::Decimal;

use crate::config::WorkingTimeAssumptions;
use crate::error::{EngineError, EngineResult};
use crate::models::PayPeriod;

/// Converts amounts between pay periods.
///
/// All conversions pass through the canonical yearly figure:
///
/// | period  | periods per year          |
/// |---------|---------------------------|
/// | hourly  | `hours_per_year`          |
/// | daily   | `working_days_per_year`   |
/// | monthly | `months_per_year`         |
/// | yearly  | `1`                       |
///
/// `to_yearly` multiplies by that factor and `from_yearly` divides by it.
/// Periods outside the converter's supported set are rejected with
/// [`EngineError::InvalidPeriod`].
///
/// # Example
///
/// ```
/// use salary_equivalence::calculation::PayPeriodConverter;
/// use salary_equivalence::models::PayPeriod;
/// use rust_decimal::Decimal;
///
/// let converter = PayPeriodConverter::default();
/// let yearly = converter.to_yearly(Decimal::new(10000, 0), PayPeriod::Monthly).unwrap();
/// assert_eq!(yearly, Decimal::new(120000, 0));
///
/// let hourly = converter.from_yearly(yearly, PayPeriod::Hourly).unwrap();
/// assert_eq!(hourly.round_dp(2), Decimal::new(5769, 2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayPeriodConverter {
    assumptions: WorkingTimeAssumptions,
    supported: BTreeSet<PayPeriod>,
}

impl Default for PayPeriodConverter {
    fn default() -> Self {
        Self::from_validated(WorkingTimeAssumptions::default(), PayPeriod::ALL)
    }
}

impl PayPeriodConverter {
    /// Creates a converter supporting only the given periods.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] if `assumptions` fails
    /// [`WorkingTimeAssumptions::validate`].
    pub fn new(
        assumptions: WorkingTimeAssumptions,
        supported: impl IntoIterator<Item = PayPeriod>,
    ) -> EngineResult<Self> {
        assumptions.validate()?;
        Ok(Self::from_validated(assumptions, supported))
    }

    /// Creates a converter supporting every [`PayPeriod`].
    pub fn with_all_periods(assumptions: WorkingTimeAssumptions) -> EngineResult<Self> {
        Self::new(assumptions, PayPeriod::ALL)
    }

    pub(crate) fn from_validated(
        assumptions: WorkingTimeAssumptions,
        supported: impl IntoIterator<Item = PayPeriod>,
    ) -> Self {
        Self {
            assumptions,
            supported: supported.into_iter().collect(),
        }
    }

    /// Returns the working-time assumptions in use.
    pub fn assumptions(&self) -> &WorkingTimeAssumptions {
        &self.assumptions
    }

    /// Returns the supported periods, shortest first.
    pub fn supported_periods(&self) -> impl Iterator<Item = PayPeriod> + '_ {
        self.supported.iter().copied()
    }

    /// Returns true if `period` is supported.
    pub fn supports(&self, period: PayPeriod) -> bool {
        self.supported.contains(&period)
    }

    /// Fails with [`EngineError::InvalidPeriod`] if `period` is not supported.
    pub fn ensure_supported(&self, period: PayPeriod) -> EngineResult<()> {
        if self.supports(period) {
            Ok(())
        } else {
            Err(EngineError::InvalidPeriod {
                period: period.to_string(),
            })
        }
    }

    /// Returns how many `period`s make up one year.
    pub fn periods_per_year(&self, period: PayPeriod) -> EngineResult<Decimal> {
        self.ensure_supported(period)?;
        Ok(match period {
            PayPeriod::Hourly => self.assumptions.hours_per_year(),
            PayPeriod::Daily => self.assumptions.working_days_per_year(),
            PayPeriod::Monthly => self.assumptions.months_per_year,
            PayPeriod::Yearly => Decimal::ONE,
        })
    }

    /// Converts an amount quoted per `period` into its yearly equivalent.
    pub fn to_yearly(&self, amount: Decimal, period: PayPeriod) -> EngineResult<Decimal> {
        let factor = self.periods_per_year(period)?;
        if period == PayPeriod::Yearly {
            return Ok(amount);
        }
        amount
            .checked_mul(factor)
            .ok_or_else(|| EngineError::CalculationError {
                message: format!("overflow converting {} {} to yearly", amount, period),
            })
    }

    /// Converts a yearly amount into the amount quoted per `period`.
    ///
    /// This is the exact inverse of [`to_yearly`](Self::to_yearly).
    pub fn from_yearly(&self, yearly: Decimal, period: PayPeriod) -> EngineResult<Decimal> {
        let factor = self.periods_per_year(period)?;
        if period == PayPeriod::Yearly {
            return Ok(yearly);
        }
        yearly
            .checked_div(factor)
            .ok_or_else(|| EngineError::CalculationError {
                message: format!("cannot convert {} yearly to {}", yearly, period),
            })
    }

    /// Converts an amount directly between two periods via the yearly figure.
    pub fn convert(&self, amount: Decimal, from: PayPeriod, to: PayPeriod) -> EngineResult<Decimal> {
        if from == to {
            self.ensure_supported(from)?;
            return Ok(amount);
        }
        let yearly = self.to_yearly(amount, from)?;
        self.from_yearly(yearly, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_hourly_to_yearly_uses_2080_hours() {
        let converter = PayPeriodConverter::default();
        assert_eq!(
            converter.to_yearly(dec("50"), PayPeriod::Hourly).unwrap(),
            dec("104000")
        );
    }

    #[test]
    fn test_daily_to_yearly_uses_260_days() {
        let converter = PayPeriodConverter::default();
        assert_eq!(
            converter.to_yearly(dec("400"), PayPeriod::Daily).unwrap(),
            dec("104000")
        );
    }

    #[test]
    fn test_monthly_to_yearly() {
        let converter = PayPeriodConverter::default();
        assert_eq!(
            converter.to_yearly(dec("8000"), PayPeriod::Monthly).unwrap(),
            dec("96000")
        );
    }

    #[test]
    fn test_yearly_is_unchanged() {
        let converter = PayPeriodConverter::default();
        let amount = dec("123456.789");
        assert_eq!(converter.to_yearly(amount, PayPeriod::Yearly).unwrap(), amount);
        assert_eq!(converter.from_yearly(amount, PayPeriod::Yearly).unwrap(), amount);
    }

    #[test]
    fn test_from_yearly_inverts_each_period() {
        let converter = PayPeriodConverter::default();
        let yearly = dec("104000");
        assert_eq!(converter.from_yearly(yearly, PayPeriod::Hourly).unwrap(), dec("50"));
        assert_eq!(converter.from_yearly(yearly, PayPeriod::Daily).unwrap(), dec("400"));
        assert_eq!(
            converter.from_yearly(dec("96000"), PayPeriod::Monthly).unwrap(),
            dec("8000")
        );
    }

    #[test]
    fn test_monthly_to_hourly_matches_hours_per_month() {
        let converter = PayPeriodConverter::default();
        let hourly = converter
            .convert(dec("10000"), PayPeriod::Monthly, PayPeriod::Hourly)
            .unwrap();
        let expected = dec("10000") / converter.assumptions().hours_per_month();
        assert_eq!(hourly.round_dp(10), expected.round_dp(10));
        assert_eq!(hourly.round_dp(2), dec("57.69"));
    }

    #[test]
    fn test_unsupported_period_returns_invalid_period() {
        let converter = PayPeriodConverter::new(
            WorkingTimeAssumptions::default(),
            [PayPeriod::Hourly, PayPeriod::Monthly, PayPeriod::Yearly],
        )
        .unwrap();

        match converter.to_yearly(dec("400"), PayPeriod::Daily) {
            Err(EngineError::InvalidPeriod { period }) => assert_eq!(period, "daily"),
            other => panic!("Expected InvalidPeriod, got {:?}", other),
        }
        assert!(matches!(
            converter.from_yearly(dec("400"), PayPeriod::Daily),
            Err(EngineError::InvalidPeriod { .. })
        ));
    }

    #[test]
    fn test_custom_assumptions_flow_through() {
        let assumptions = WorkingTimeAssumptions {
            hours_per_week: dec("37.5"),
            ..WorkingTimeAssumptions::default()
        };
        let converter = PayPeriodConverter::with_all_periods(assumptions).unwrap();
        assert_eq!(
            converter.to_yearly(dec("20"), PayPeriod::Hourly).unwrap(),
            dec("39000")
        );
    }

    #[test]
    fn test_overflow_is_reported() {
        let converter = PayPeriodConverter::default();
        let result = converter.to_yearly(Decimal::MAX, PayPeriod::Hourly);
        assert!(matches!(result, Err(EngineError::CalculationError { .. })));
    }

    #[test]
    fn test_zero_stays_zero() {
        let converter = PayPeriodConverter::default();
        for period in PayPeriod::ALL {
            assert_eq!(converter.to_yearly(Decimal::ZERO, period).unwrap(), Decimal::ZERO);
            assert_eq!(converter.from_yearly(Decimal::ZERO, period).unwrap(), Decimal::ZERO);
        }
    }

    #[test]
    fn test_new_rejects_invalid_assumptions() {
        let zero_months = WorkingTimeAssumptions {
            months_per_year: Decimal::ZERO,
            ..WorkingTimeAssumptions::default()
        };
        assert!(matches!(
            PayPeriodConverter::with_all_periods(zero_months),
            Err(EngineError::InvalidConfig { .. })
        ));

        let oversized = WorkingTimeAssumptions {
            hours_per_week: dec("100000000000000000000"),
            weeks_per_year: dec("100000000000000000000"),
            ..WorkingTimeAssumptions::default()
        };
        assert!(matches!(
            PayPeriodConverter::new(oversized, [PayPeriod::Hourly]),
            Err(EngineError::InvalidConfig { .. })
        ));
    }
}
