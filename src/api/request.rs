//! Request types for the Salary Equivalence Engine API.
//!
//! Currency codes and period names arrive as plain strings and are resolved
//! against the loaded configuration here, so a bad code surfaces as an engine
//! error with a precise code instead of a generic JSON rejection.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::EquivalenceTargets;
use crate::config::ConfigLoader;
use crate::error::EngineResult;
use crate::models::{Currency, ExchangeRateTable, PayPeriod, SalaryObservation, validate_amount};

/// Request body for the `/equivalence` endpoint.
///
/// A zero `amount` is accepted and yields an all-zero matrix. Forms that use
/// `0` to mean "salary not known yet" should keep that meaning on their side:
/// the engine reports the zero as a warning, not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquivalenceRequest {
    /// The observed amount. Accepts a JSON number or a decimal string.
    pub amount: Decimal,
    /// The currency the amount is quoted in (e.g. "PLN").
    pub currency: String,
    /// The period the amount covers (e.g. "monthly").
    pub period: String,
    /// Exchange rates against the configured base currency.
    ///
    /// The base currency may be omitted; it is always taken to be `1`.
    pub rates: BTreeMap<String, Decimal>,
    /// Currencies to show. Defaults to every configured currency.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_currencies: Option<Vec<String>>,
    /// Periods to show. Defaults to every supported period.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_periods: Option<Vec<String>>,
    /// Round the matrix to this many decimal places for display. Midpoints
    /// round away from zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round_dp: Option<u32>,
}

/// An [`EquivalenceRequest`] resolved into domain types.
#[derive(Debug, Clone)]
pub struct ResolvedEquivalence {
    /// The observation to expand.
    pub observation: SalaryObservation,
    /// The requested grid.
    pub targets: EquivalenceTargets,
    /// The rate table, with the base currency filled in.
    pub rates: ExchangeRateTable,
}

impl EquivalenceRequest {
    /// Resolves codes and names against `config`.
    ///
    /// The observed currency and every target must be configured. Rate keys
    /// only need to be well formed, since callers often send a full feed.
    pub fn resolve(&self, config: &ConfigLoader) -> EngineResult<ResolvedEquivalence> {
        // A negative amount is reported before any lookup
        validate_amount(self.amount)?;
        let currency = config.get_currency(&self.currency)?;
        let period = config.get_period(&self.period)?;
        let observation = SalaryObservation::new(self.amount, currency, period)?;

        let mut targets = EquivalenceTargets::from_config(config.config());
        if let Some(codes) = &self.target_currencies {
            targets.currencies = codes
                .iter()
                .map(|code| config.get_currency(code))
                .collect::<EngineResult<_>>()?;
        }
        if let Some(names) = &self.target_periods {
            targets.periods = names
                .iter()
                .map(|name| config.get_period(name))
                .collect::<EngineResult<_>>()?;
        }

        let entries = self
            .rates
            .iter()
            .map(|(code, rate)| Ok((Currency::new(code)?, *rate)))
            .collect::<EngineResult<Vec<_>>>()?;
        let rates = ExchangeRateTable::with_base(config.config().base_currency().clone(), entries)?;

        Ok(ResolvedEquivalence {
            observation,
            targets,
            rates,
        })
    }
}

/// Request body for the `/salary/parse` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryParseRequest {
    /// Free-text salary, e.g. "$100,000 - $120,000".
    pub text: String,
    /// Currency to assume when the text names none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_currency: Option<String>,
    /// Period to assume when the text names none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_period: Option<String>,
}

impl SalaryParseRequest {
    /// Resolves the optional defaults against `config`.
    pub fn defaults(&self, config: &ConfigLoader) -> EngineResult<(Option<Currency>, Option<PayPeriod>)> {
        let currency = self
            .default_currency
            .as_deref()
            .map(|code| config.get_currency(code))
            .transpose()?;
        let period = self
            .default_period
            .as_deref()
            .map(|name| config.get_period(name))
            .transpose()?;
        Ok((currency, period))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_request() -> EquivalenceRequest {
        serde_json::from_str(
            r#"{
                "amount": "8000",
                "currency": "pln",
                "period": "monthly",
                "rates": { "EUR": "0.23", "USD": 0.25, "GBP": "0.2" }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_deserialize_minimal_request() {
        let request = sample_request();
        assert_eq!(request.amount, dec("8000"));
        assert_eq!(request.rates["USD"], dec("0.25"));
        assert!(request.target_currencies.is_none());
        assert!(request.round_dp.is_none());
    }

    #[test]
    fn test_resolve_defaults_to_full_grid() {
        let config = ConfigLoader::default();
        let resolved = sample_request().resolve(&config).unwrap();

        assert_eq!(resolved.observation.currency().code(), "PLN");
        assert_eq!(resolved.observation.period(), PayPeriod::Monthly);
        assert_eq!(resolved.targets.currencies.len(), 4);
        assert_eq!(resolved.targets.periods.len(), 4);
        assert_eq!(
            resolved.rates.rate(&Currency::new("PLN").unwrap()).unwrap(),
            Decimal::ONE
        );
    }

    #[test]
    fn test_resolve_rejects_unconfigured_target() {
        let config = ConfigLoader::default();
        let mut request = sample_request();
        request.target_currencies = Some(vec!["CHF".to_string()]);

        match request.resolve(&config) {
            Err(EngineError::UnsupportedCurrency { code }) => assert_eq!(code, "CHF"),
            other => panic!("Expected UnsupportedCurrency, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_rejects_negative_amount() {
        let config = ConfigLoader::default();
        let mut request = sample_request();
        request.amount = dec("-1");
        assert!(matches!(
            request.resolve(&config),
            Err(EngineError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_negative_amount_reported_before_currency() {
        let config = ConfigLoader::default();
        let mut request = sample_request();
        request.amount = dec("-1");
        request.currency = "ZLOTY".to_string();
        assert!(matches!(
            request.resolve(&config),
            Err(EngineError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_resolve_rejects_malformed_rate_key() {
        let config = ConfigLoader::default();
        let mut request = sample_request();
        request.rates.insert("EURO".to_string(), dec("0.23"));
        assert!(matches!(
            request.resolve(&config),
            Err(EngineError::InvalidCurrency { .. })
        ));
    }

    #[test]
    fn test_parse_request_defaults() {
        let config = ConfigLoader::default();
        let request = SalaryParseRequest {
            text: "100k".to_string(),
            default_currency: Some("usd".to_string()),
            default_period: Some("yearly".to_string()),
        };
        let (currency, period) = request.defaults(&config).unwrap();
        assert_eq!(currency.unwrap().code(), "USD");
        assert_eq!(period, Some(PayPeriod::Yearly));
    }
}
