//! Currency conversion functionality.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{Currency, ExchangeRateTable};

/// Converts `amount` from one currency to another.
///
/// Both rates are read from `rates`, which quotes every currency against a
/// common base: `amount × rate[to] / rate[from]`. When `from == to` the amount
/// is returned untouched and the table is not consulted at all, so the
/// identity holds even for a currency the table does not list.
///
/// # Errors
///
/// - [`EngineError::MissingExchangeRate`] naming the source or target currency
///   (the source is checked first) when it has no entry.
/// - [`EngineError::InvalidExchangeRate`] when a needed rate is not positive.
/// - [`EngineError::CalculationError`] on decimal overflow.
///
/// # Examples
///
/// ```
/// use salary_equivalence::calculation::convert_currency;
/// use salary_equivalence::models::{Currency, ExchangeRateTable};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let pln = Currency::new("PLN").unwrap();
/// let eur = Currency::new("EUR").unwrap();
/// let rates = ExchangeRateTable::new([
///     (pln.clone(), Decimal::ONE),
///     (eur.clone(), Decimal::from_str("0.23").unwrap()),
/// ]);
///
/// let converted = convert_currency(Decimal::new(120000, 0), &pln, &eur, &rates).unwrap();
/// assert_eq!(converted, Decimal::new(27600, 0));
/// ```
pub fn convert_currency(
    amount: Decimal,
    from: &Currency,
    to: &Currency,
    rates: &ExchangeRateTable,
) -> EngineResult<Decimal> {
    if from == to {
        return Ok(amount);
    }

    let from_rate = rates.rate(from)?;
    let to_rate = rates.rate(to)?;

    amount
        .checked_mul(to_rate)
        .and_then(|scaled| scaled.checked_div(from_rate))
        .ok_or_else(|| EngineError::CalculationError {
            message: format!("overflow converting {} {} to {}", amount, from, to),
        })
}
