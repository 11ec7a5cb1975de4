//! Exchange rate table model.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::Currency;

/// A snapshot of exchange rates relative to one common base currency.
///
/// Each entry is the number of units of that currency worth one unit of the
/// base, so the base itself is always `1`. Tables are supplied fresh by the
/// caller for every request; nothing in this crate caches or persists them.
///
/// Validation is lazy: a missing or non-positive rate is only an error when a
/// conversion actually needs it.
///
/// # Example
///
/// ```
/// use salary_equivalence::models::{Currency, ExchangeRateTable};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let table = ExchangeRateTable::with_base(
///     Currency::new("PLN").unwrap(),
///     [(Currency::new("EUR").unwrap(), Decimal::from_str("0.23").unwrap())],
/// )
/// .unwrap();
///
/// assert_eq!(table.rate(&Currency::new("PLN").unwrap()).unwrap(), Decimal::ONE);
/// assert!(table.rate(&Currency::new("USD").unwrap()).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExchangeRateTable {
    rates: BTreeMap<Currency, Decimal>,
}

impl ExchangeRateTable {
    /// Creates a table from raw entries without a declared base.
    pub fn new(rates: impl IntoIterator<Item = (Currency, Decimal)>) -> Self {
        Self {
            rates: rates.into_iter().collect(),
        }
    }

    /// Creates a table relative to `base`, inserting the base at `1`.
    ///
    /// Returns [`EngineError::InvalidExchangeRate`] if the entries already give
    /// the base a rate other than `1`.
    pub fn with_base(
        base: Currency,
        rates: impl IntoIterator<Item = (Currency, Decimal)>,
    ) -> EngineResult<Self> {
        let mut table = Self::new(rates);
        match table.rates.get(&base) {
            Some(rate) if *rate != Decimal::ONE => {
                return Err(EngineError::InvalidExchangeRate {
                    currency: base.to_string(),
                    rate: *rate,
                });
            }
            Some(_) => {}
            None => {
                table.rates.insert(base, Decimal::ONE);
            }
        }
        Ok(table)
    }

    /// Returns the rate for `currency`.
    ///
    /// # Errors
    ///
    /// - [`EngineError::MissingExchangeRate`] if the currency has no entry.
    /// - [`EngineError::InvalidExchangeRate`] if its rate is zero or negative.
    pub fn rate(&self, currency: &Currency) -> EngineResult<Decimal> {
        let rate = self
            .rates
            .get(currency)
            .copied()
            .ok_or_else(|| EngineError::MissingExchangeRate {
                currency: currency.to_string(),
            })?;

        if rate <= Decimal::ZERO {
            return Err(EngineError::InvalidExchangeRate {
                currency: currency.to_string(),
                rate,
            });
        }

        Ok(rate)
    }

    /// Returns true if the table has an entry for `currency`.
    pub fn contains(&self, currency: &Currency) -> bool {
        self.rates.contains_key(currency)
    }

    /// Returns the currency quoted at exactly `1`, if any.
    pub fn base(&self) -> Option<&Currency> {
        self.rates
            .iter()
            .find(|(_, rate)| **rate == Decimal::ONE)
            .map(|(currency, _)| currency)
    }

    /// Iterates over the entries in currency order.
    pub fn iter(&self) -> impl Iterator<Item = (&Currency, &Decimal)> {
        self.rates.iter()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Returns true if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl FromIterator<(Currency, Decimal)> for ExchangeRateTable {
    fn from_iter<I: IntoIterator<Item = (Currency, Decimal)>>(iter: I) -> Self {
        Self::new(iter)
    }
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

    #[test]
    fn test_missing_rate_names_currency() {
        let table = ExchangeRateTable::new([(ccy("PLN"), Decimal::ONE)]);
        match table.rate(&ccy("GBP")) {
            Err(EngineError::MissingExchangeRate { currency }) => assert_eq!(currency, "GBP"),
            other => panic!("Expected MissingExchangeRate, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_and_negative_rates_are_invalid() {
        let table = ExchangeRateTable::new([(ccy("EUR"), Decimal::ZERO), (ccy("USD"), dec("-1"))]);
        assert!(matches!(
            table.rate(&ccy("EUR")),
            Err(EngineError::InvalidExchangeRate { .. })
        ));
        match table.rate(&ccy("USD")) {
            Err(EngineError::InvalidExchangeRate { currency, rate }) => {
                assert_eq!(currency, "USD");
                assert_eq!(rate, dec("-1"));
            }
            other => panic!("Expected InvalidExchangeRate, got {:?}", other),
        }
    }

    #[test]
    fn test_with_base_inserts_base_at_one() {
        let table = ExchangeRateTable::with_base(ccy("PLN"), [(ccy("EUR"), dec("0.23"))]).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.base(), Some(&ccy("PLN")));
    }

    #[test]
    fn test_with_base_rejects_conflicting_base_rate() {
        let result = ExchangeRateTable::with_base(ccy("PLN"), [(ccy("PLN"), dec("1.1"))]);
        assert!(matches!(
            result,
            Err(EngineError::InvalidExchangeRate { .. })
        ));
    }

    #[test]
    fn test_deserialize_from_json_object() {
        let table: ExchangeRateTable =
            serde_json::from_str(r#"{"PLN": 1, "EUR": "0.23", "usd": 0.25}"#).unwrap();
        assert_eq!(table.rate(&ccy("EUR")).unwrap(), dec("0.23"));
        assert_eq!(table.rate(&ccy("USD")).unwrap(), dec("0.25"));
    }

    #[test]
    fn test_deserialize_rejects_malformed_currency_key() {
        let result = serde_json::from_str::<ExchangeRateTable>(r#"{"EURO": 1}"#);
        assert!(result.is_err());
    }
}
