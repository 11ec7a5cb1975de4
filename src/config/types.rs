//! Configuration types for salary equivalence.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::PayPeriodConverter;
use crate::error::{EngineError, EngineResult};
use crate::models::{Currency, PayPeriod};

/// The working-time constants that relate pay periods to each other.
///
/// This is the one place period arithmetic gets its numbers from. Derived
/// quantities (hours per year, weeks per month, ...) are computed from the
/// four base constants and never chosen independently.
///
/// # Example
///
/// ```
/// use salary_equivalence::config::WorkingTimeAssumptions;
/// use rust_decimal::Decimal;
///
/// let assumptions = WorkingTimeAssumptions::default();
/// assert_eq!(assumptions.hours_per_year(), Decimal::new(2080, 0));
/// assert_eq!(assumptions.working_days_per_year(), Decimal::new(260, 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingTimeAssumptions {
    /// Contracted hours in one working week.
    pub hours_per_week: Decimal,
    /// Paid weeks in one year.
    pub weeks_per_year: Decimal,
    /// Months in one year.
    pub months_per_year: Decimal,
    /// Working days in one week.
    pub days_per_week: Decimal,
}

impl Default for WorkingTimeAssumptions {
    fn default() -> Self {
        Self {
            hours_per_week: Decimal::new(40, 0),
            weeks_per_year: Decimal::new(52, 0),
            months_per_year: Decimal::new(12, 0),
            days_per_week: Decimal::new(5, 0),
        }
    }
}

impl WorkingTimeAssumptions {
    // The derived quantities below assume `validate` has passed.

    /// `hours_per_week × weeks_per_year`.
    pub fn hours_per_year(&self) -> Decimal {
        self.hours_per_week * self.weeks_per_year
    }

    /// `hours_per_year / months_per_year`.
    pub fn hours_per_month(&self) -> Decimal {
        self.hours_per_year() / self.months_per_year
    }

    /// `weeks_per_year / months_per_year`.
    pub fn weeks_per_month(&self) -> Decimal {
        self.weeks_per_year / self.months_per_year
    }

    /// `weeks_per_year × days_per_week`.
    pub fn working_days_per_year(&self) -> Decimal {
        self.weeks_per_year * self.days_per_week
    }

    /// `hours_per_week / days_per_week`.
    pub fn hours_per_day(&self) -> Decimal {
        self.hours_per_week / self.days_per_week
    }

    /// Checks that every constant is strictly positive and that every derived
    /// quantity fits in a `Decimal`.
    pub fn validate(&self) -> EngineResult<()> {
        let fields = [
            ("hours_per_week", self.hours_per_week),
            ("weeks_per_year", self.weeks_per_year),
            ("months_per_year", self.months_per_year),
            ("days_per_week", self.days_per_week),
        ];
        for (name, value) in fields {
            if value <= Decimal::ZERO {
                return Err(EngineError::InvalidConfig {
                    message: format!("{} must be positive, got {}", name, value),
                });
            }
        }

        let out_of_range = |name: &str| EngineError::InvalidConfig {
            message: format!("{} is out of range for the configured constants", name),
        };
        let hours_per_year = self
            .hours_per_week
            .checked_mul(self.weeks_per_year)
            .ok_or_else(|| out_of_range("hours_per_year"))?;
        hours_per_year
            .checked_div(self.months_per_year)
            .ok_or_else(|| out_of_range("hours_per_month"))?;
        self.weeks_per_year
            .checked_div(self.months_per_year)
            .ok_or_else(|| out_of_range("weeks_per_month"))?;
        self.weeks_per_year
            .checked_mul(self.days_per_week)
            .ok_or_else(|| out_of_range("working_days_per_year"))?;
        self.hours_per_week
            .checked_div(self.days_per_week)
            .ok_or_else(|| out_of_range("hours_per_day"))?;
        Ok(())
    }
}

/// Contents of `working_time.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkingTimeConfig {
    /// The working-time constants.
    #[serde(flatten)]
    pub assumptions: WorkingTimeAssumptions,
    /// The pay periods this deployment supports.
    pub supported_periods: Vec<PayPeriod>,
}

/// Contents of `currencies.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrenciesConfig {
    /// The currency exchange-rate tables are usually quoted against.
    pub base_currency: Currency,
    /// The currencies offered to users, in display order.
    pub currencies: Vec<Currency>,
}

/// The complete engine configuration.
///
/// Aggregates the working-time assumptions and the configured currency and
/// period sets. The currency and period sets are data rather than code, so
/// extending them never touches engine logic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    working_time: WorkingTimeAssumptions,
    supported_periods: Vec<PayPeriod>,
    base_currency: Currency,
    currencies: Vec<Currency>,
}

impl Default for EngineConfig {
    /// PLN, EUR, USD and GBP with every pay period and the 40h/52w/12m/5d week.
    fn default() -> Self {
        let currencies: Vec<Currency> = ["PLN", "EUR", "USD", "GBP"]
            .into_iter()
            .map(Currency::from_static)
            .collect();
        Self {
            working_time: WorkingTimeAssumptions::default(),
            supported_periods: PayPeriod::ALL.to_vec(),
            base_currency: currencies[0].clone(),
            currencies,
        }
    }
}

impl EngineConfig {
    /// Creates a validated configuration from its component parts.
    ///
    /// Periods are sorted shortest first; currencies keep their given order.
    pub fn new(
        working_time: WorkingTimeAssumptions,
        supported_periods: Vec<PayPeriod>,
        base_currency: Currency,
        currencies: Vec<Currency>,
    ) -> EngineResult<Self> {
        working_time.validate()?;

        let mut periods = supported_periods;
        periods.sort();
        let before = periods.len();
        periods.dedup();
        if periods.is_empty() {
            return Err(EngineError::InvalidConfig {
                message: "at least one pay period must be supported".to_string(),
            });
        }
        if periods.len() != before {
            return Err(EngineError::InvalidConfig {
                message: "supported_periods contains duplicates".to_string(),
            });
        }

        if currencies.is_empty() {
            return Err(EngineError::InvalidConfig {
                message: "at least one currency must be configured".to_string(),
            });
        }
        for (i, currency) in currencies.iter().enumerate() {
            if currencies[..i].contains(currency) {
                return Err(EngineError::InvalidConfig {
                    message: format!("currency {} is listed more than once", currency),
                });
            }
        }
        if !currencies.contains(&base_currency) {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "base currency {} is not in the configured currency list",
                    base_currency
                ),
            });
        }

        Ok(Self {
            working_time,
            supported_periods: periods,
            base_currency,
            currencies,
        })
    }

    /// Returns the working-time assumptions.
    pub fn working_time(&self) -> &WorkingTimeAssumptions {
        &self.working_time
    }

    /// Returns the supported pay periods, shortest first.
    pub fn supported_periods(&self) -> &[PayPeriod] {
        &self.supported_periods
    }

    /// Returns the base currency.
    pub fn base_currency(&self) -> &Currency {
        &self.base_currency
    }

    /// Returns the configured currencies in display order.
    pub fn currencies(&self) -> &[Currency] {
        &self.currencies
    }

    /// Returns true if `currency` is in the configured set.
    pub fn is_supported_currency(&self, currency: &Currency) -> bool {
        self.currencies.contains(currency)
    }

    /// Returns a period converter bound to this configuration.
    pub fn period_converter(&self) -> PayPeriodConverter {
        // Validated in `new`
        PayPeriodConverter::from_validated(
            self.working_time,
            self.supported_periods.iter().copied(),
        )
    }
}
