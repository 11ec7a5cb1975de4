//! Equivalence matrix construction.
//!
//! This module combines the pay period and currency converters into the full
//! period × currency matrix for one salary observation.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::models::{
    AuditStep, AuditWarning, Currency, EquivalenceMatrix, ExchangeRateTable, PayPeriod,
    SalaryObservation,
};

use super::currency::convert_currency;
use super::pay_period::PayPeriodConverter;

/// The currencies and periods an equivalence matrix should cover.
///
/// Both sets are ordered, so the matrix always lists periods shortest first
/// and currencies alphabetically regardless of request order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EquivalenceTargets {
    /// Columns of the matrix.
    pub currencies: BTreeSet<Currency>,
    /// Rows of the matrix.
    pub periods: BTreeSet<PayPeriod>,
}

impl EquivalenceTargets {
    /// Creates targets from any collections of currencies and periods.
    pub fn new(
        currencies: impl IntoIterator<Item = Currency>,
        periods: impl IntoIterator<Item = PayPeriod>,
    ) -> Self {
        Self {
            currencies: currencies.into_iter().collect(),
            periods: periods.into_iter().collect(),
        }
    }

    /// Targets every configured currency and every supported period.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            config.currencies().iter().cloned(),
            config.supported_periods().iter().copied(),
        )
    }
}

/// The result of building an equivalence matrix.
#[derive(Debug, Clone)]
pub struct EquivalenceMatrixResult {
    /// The period × currency grid.
    pub matrix: EquivalenceMatrix,
    /// The canonical yearly figure for each target currency.
    pub yearly_by_currency: BTreeMap<Currency, Decimal>,
    /// The audit steps recording how the matrix was derived.
    pub audit_steps: Vec<AuditStep>,
    /// Warnings raised while building the matrix.
    pub warnings: Vec<AuditWarning>,
}

/// Builds the equivalence matrix for a salary observation.
///
/// The observation is normalized once to a yearly figure in its own
/// currency. That figure is converted into every target currency, and each
/// currency's yearly figure is then expanded into every target period. No
/// cell is derived from the raw observation directly, so for every currency
/// `C` and period `P`:
///
/// ```text
/// from_yearly(matrix[yearly][C], P) == matrix[P][C]
/// ```
///
/// An amount of zero is valid and yields an all-zero matrix. Values are
/// returned unrounded.
///
/// # Errors
///
/// - [`EngineError::InvalidPeriod`](crate::error::EngineError::InvalidPeriod)
///   if the observation's period or any target period is unsupported. This is
///   checked before any arithmetic.
/// - Any error from [`convert_currency`], unchanged.
///
/// The operation is all-or-nothing: on error no partial matrix is returned.
///
/// # Examples
///
/// ```
/// use salary_equivalence::calculation::{
///     build_equivalence_matrix, EquivalenceTargets, PayPeriodConverter,
/// };
/// use salary_equivalence::models::{Currency, ExchangeRateTable, PayPeriod, SalaryObservation};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let pln = Currency::new("PLN").unwrap();
/// let eur = Currency::new("EUR").unwrap();
/// let observation =
///     SalaryObservation::new(Decimal::new(10000, 0), pln.clone(), PayPeriod::Monthly).unwrap();
/// let rates = ExchangeRateTable::new([
///     (pln.clone(), Decimal::ONE),
///     (eur.clone(), Decimal::from_str("0.23").unwrap()),
/// ]);
/// let targets = EquivalenceTargets::new([pln.clone(), eur.clone()], [PayPeriod::Yearly]);
///
/// let result = build_equivalence_matrix(
///     &observation,
///     &targets,
///     &rates,
///     &PayPeriodConverter::default(),
/// )
/// .unwrap();
///
/// assert_eq!(result.matrix.get(PayPeriod::Yearly, &eur), Some(Decimal::new(27600, 0)));
/// ```
pub fn build_equivalence_matrix(
    observation: &SalaryObservation,
    targets: &EquivalenceTargets,
    rates: &ExchangeRateTable,
    converter: &PayPeriodConverter,
) -> EngineResult<EquivalenceMatrixResult> {
    converter.ensure_supported(observation.period())?;
    for period in &targets.periods {
        converter.ensure_supported(*period)?;
    }

    let mut audit_steps = Vec::new();
    let mut warnings = Vec::new();
    let mut step_number: u32 = 1;

    if observation.amount().is_zero() {
        warnings.push(AuditWarning {
            code: "ZERO_AMOUNT".to_string(),
            message: "Amount is 0; every cell of the matrix is 0".to_string(),
            severity: "low".to_string(),
        });
    }

    // Step 1: the canonical yearly figure in the source currency
    let source = observation.currency();
    let yearly = converter.to_yearly(observation.amount(), observation.period())?;
    let factor = converter.periods_per_year(observation.period())?;
    audit_steps.push(AuditStep {
        step_number,
        rule_id: "normalize_to_yearly".to_string(),
        rule_name: "Normalize To Yearly".to_string(),
        input: serde_json::json!({
            "amount": observation.amount().to_string(),
            "currency": source.code(),
            "period": observation.period().as_str()
        }),
        output: serde_json::json!({
            "yearly": yearly.to_string(),
            "periods_per_year": factor.to_string()
        }),
        reasoning: format!(
            "{} {} x {} {} periods per year = {} {} yearly",
            observation.amount().normalize(),
            source,
            factor.normalize(),
            observation.period(),
            yearly.normalize(),
            source
        ),
    });
    step_number += 1;

    // Step 2: one yearly figure per target currency
    let mut yearly_by_currency = BTreeMap::new();
    for target in &targets.currencies {
        let converted = convert_currency(yearly, source, target, rates)?;

        let reasoning = if source == target {
            format!("{} is the source currency; no conversion", target)
        } else {
            format!(
                "{} {} x {} / {} = {} {}",
                yearly.normalize(),
                source,
                rates.rate(target)?.normalize(),
                rates.rate(source)?.normalize(),
                converted.normalize(),
                target
            )
        };
        audit_steps.push(AuditStep {
            step_number,
            rule_id: "currency_conversion".to_string(),
            rule_name: "Currency Conversion".to_string(),
            input: serde_json::json!({
                "yearly": yearly.to_string(),
                "from": source.code(),
                "to": target.code()
            }),
            output: serde_json::json!({
                "yearly": converted.to_string()
            }),
            reasoning,
        });
        step_number += 1;

        yearly_by_currency.insert(target.clone(), converted);
    }

    // Step 3: expand every currency's yearly figure into each period
    let mut matrix = EquivalenceMatrix::default();
    for period in &targets.periods {
        for (currency, currency_yearly) in &yearly_by_currency {
            let value = converter.from_yearly(*currency_yearly, *period)?;
            matrix.insert(*period, currency.clone(), value);
        }
    }
    audit_steps.push(AuditStep {
        step_number,
        rule_id: "period_expansion".to_string(),
        rule_name: "Period Expansion".to_string(),
        input: serde_json::json!({
            "currencies": targets.currencies.iter().map(Currency::code).collect::<Vec<_>>(),
            "periods": targets.periods.iter().map(PayPeriod::as_str).collect::<Vec<_>>()
        }),
        output: serde_json::json!({
            "cells": matrix.len()
        }),
        reasoning: format!(
            "Expanded {} yearly figure(s) into {} period(s)",
            yearly_by_currency.len(),
            targets.periods.len()
        ),
    });

    debug!(
        observation = %observation,
        cells = matrix.len(),
        "Built equivalence matrix"
    );

    Ok(EquivalenceMatrixResult {
        matrix,
        yearly_by_currency,
        audit_steps,
        warnings,
    })
}
