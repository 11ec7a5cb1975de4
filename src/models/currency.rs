//! Currency and monetary amount models.
//!
//! This module contains the [`Currency`] code type and the [`MonetaryAmount`]
//! value that pairs a non-negative amount with its currency.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A three-letter currency code such as `PLN` or `EUR`.
///
/// Codes are normalized to upper case on construction, so `"eur"` and
/// `"EUR"` are the same currency. Which codes a deployment accepts is
/// configuration (see [`crate::config::EngineConfig::currencies`]); this type
/// only guarantees the code is well formed.
///
/// # Example
///
/// ```
/// use salary_equivalence::models::Currency;
///
/// let eur: Currency = "eur".parse().unwrap();
/// assert_eq!(eur.code(), "EUR");
/// assert!("EURO".parse::<Currency>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency(String);

impl Currency {
    /// Creates a currency from a code, validating its shape.
    pub fn new(code: &str) -> EngineResult<Self> {
        let trimmed = code.trim();
        if trimmed.len() == 3 && trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(Self(trimmed.to_ascii_uppercase()))
        } else {
            Err(EngineError::InvalidCurrency {
                code: code.to_string(),
            })
        }
    }

    /// Builds a currency from a code known to be well formed.
    pub(crate) fn from_static(code: &'static str) -> Self {
        debug_assert!(code.len() == 3 && code.chars().all(|c| c.is_ascii_uppercase()));
        Self(code.to_string())
    }

    /// Returns the upper-case currency code.
    pub fn code(&self) -> &str {
        &self.0
    }
}

impl FromStr for Currency {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Currency {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.0
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A non-negative amount of money in a given currency.
///
/// Negative amounts are rejected, not clamped. Zero is a legitimate value.
///
/// # Example
///
/// ```
/// use salary_equivalence::models::{Currency, MonetaryAmount};
/// use rust_decimal::Decimal;
///
/// let pln = Currency::new("PLN").unwrap();
/// let amount = MonetaryAmount::new(Decimal::new(8000, 0), pln.clone()).unwrap();
/// assert_eq!(amount.currency(), &pln);
///
/// assert!(MonetaryAmount::new(Decimal::new(-1, 0), pln).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonetaryAmount {
    amount: Decimal,
    currency: Currency,
}

impl MonetaryAmount {
    /// Creates an amount, rejecting negative values.
    pub fn new(amount: Decimal, currency: Currency) -> EngineResult<Self> {
        validate_amount(amount)?;
        Ok(Self { amount, currency })
    }

    /// Creates an amount from a floating point value.
    ///
    /// `NaN` and infinities are rejected with [`EngineError::InvalidAmount`].
    pub fn from_f64(amount: f64, currency: Currency) -> EngineResult<Self> {
        Self::new(decimal_from_f64(amount)?, currency)
    }

    /// Returns the numeric amount.
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the currency of the amount.
    pub fn currency(&self) -> &Currency {
        &self.currency
    }
}

impl fmt::Display for MonetaryAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount.normalize(), self.currency)
    }
}

/// Rejects negative amounts.
pub(crate) fn validate_amount(amount: Decimal) -> EngineResult<()> {
    if amount < Decimal::ZERO {
        return Err(EngineError::InvalidAmount {
            amount: amount.to_string(),
            message: "amount must not be negative".to_string(),
        });
    }
    Ok(())
}

/// Converts a float to a decimal, rejecting non-finite values.
pub(crate) fn decimal_from_f64(value: f64) -> EngineResult<Decimal> {
    if !value.is_finite() {
        return Err(EngineError::InvalidAmount {
            amount: value.to_string(),
            message: "amount must be a finite number".to_string(),
        });
    }
    Decimal::try_from(value).map_err(|e| EngineError::InvalidAmount {
        amount: value.to_string(),
        message: e.to_string(),
    })
}
