//! Salary observation model.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::EngineResult;

use super::{Currency, MonetaryAmount, PayPeriod};

/// A salary exactly as the user entered it, e.g. "8000 PLN / monthly".
///
/// This is the sole input to an equivalence request. The fields are private,
/// so every observation in existence has passed amount validation.
///
/// # Example
///
/// ```
/// use salary_equivalence::models::{Currency, PayPeriod, SalaryObservation};
/// use rust_decimal::Decimal;
///
/// let observation = SalaryObservation::new(
///     Decimal::new(8000, 0),
///     Currency::new("PLN").unwrap(),
///     PayPeriod::Monthly,
/// )
/// .unwrap();
/// assert_eq!(observation.period(), PayPeriod::Monthly);
/// assert_eq!(observation.to_string(), "8000 PLN / monthly");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalaryObservation {
    #[serde(flatten)]
    money: MonetaryAmount,
    period: PayPeriod,
}

impl SalaryObservation {
    /// Creates an observation, rejecting negative amounts.
    pub fn new(amount: Decimal, currency: Currency, period: PayPeriod) -> EngineResult<Self> {
        Ok(Self {
            money: MonetaryAmount::new(amount, currency)?,
            period,
        })
    }

    /// Creates an observation from an already validated amount.
    pub fn from_amount(money: MonetaryAmount, period: PayPeriod) -> Self {
        Self { money, period }
    }

    /// Returns the observed amount.
    pub fn amount(&self) -> Decimal {
        self.money.amount()
    }

    /// Returns the currency the salary was quoted in.
    pub fn currency(&self) -> &Currency {
        self.money.currency()
    }

    /// Returns the period the salary was quoted over.
    pub fn period(&self) -> PayPeriod {
        self.period
    }

    /// Returns the amount together with its currency.
    pub fn money(&self) -> &MonetaryAmount {
        &self.money
    }
}

impl std::fmt::Display for SalaryObservation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {}", self.money, self.period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    #[test]
    fn test_negative_amount_is_rejected() {
        let result = SalaryObservation::new(
            Decimal::NEGATIVE_ONE,
            Currency::new("PLN").unwrap(),
            PayPeriod::Monthly,
        );
        assert!(matches!(result, Err(EngineError::InvalidAmount { .. })));
    }

    #[test]
    fn test_serialize_flattens_amount() {
        let observation = SalaryObservation::new(
            Decimal::new(10000, 0),
            Currency::new("PLN").unwrap(),
            PayPeriod::Monthly,
        )
        .unwrap();
        let json = serde_json::to_value(&observation).unwrap();
        assert_eq!(json["amount"], "10000");
        assert_eq!(json["currency"], "PLN");
        assert_eq!(json["period"], "monthly");
    }
}
