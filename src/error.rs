//! Error types for the Salary Equivalence Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every condition that can stop a conversion.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the Salary Equivalence Engine.
///
/// Every fallible operation in the crate returns this error type. Errors are
/// detected at the point of use and propagated unchanged; a failed request
/// never yields a partially filled matrix.
///
/// # Example
///
/// ```
/// use salary_equivalence::error::EngineError;
///
/// let error = EngineError::MissingExchangeRate {
///     currency: "CHF".to_string(),
/// };
/// assert_eq!(error.to_string(), "No exchange rate supplied for currency CHF");
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    /// The amount was negative or not a finite number.
    #[error("Invalid amount '{amount}': {message}")]
    InvalidAmount {
        /// The rejected amount, as given by the caller.
        amount: String,
        /// Why the amount was rejected.
        message: String,
    },

    /// The pay period is unknown or not supported by the active configuration.
    #[error("Invalid pay period: {period}")]
    InvalidPeriod {
        /// The period that was rejected.
        period: String,
    },

    /// A currency needed for a conversion is absent from the rate table.
    #[error("No exchange rate supplied for currency {currency}")]
    MissingExchangeRate {
        /// The currency without a rate.
        currency: String,
    },

    /// The rate table holds a non-positive rate.
    #[error("Invalid exchange rate for {currency}: {rate} (rates must be positive)")]
    InvalidExchangeRate {
        /// The currency whose rate is invalid.
        currency: String,
        /// The offending rate.
        rate: Decimal,
    },

    /// A currency code is not a three-letter alphabetic code.
    #[error("Invalid currency code: '{code}'")]
    InvalidCurrency {
        /// The malformed code.
        code: String,
    },

    /// A well-formed currency code outside the configured currency set.
    #[error("Currency not supported: {code}")]
    UnsupportedCurrency {
        /// The unsupported code.
        code: String,
    },

    /// Free-text salary could not be parsed.
    #[error("Could not parse salary '{input}': {message}")]
    SalaryParseError {
        /// The text that failed to parse.
        input: String,
        /// A description of the failure.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds inconsistent values.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// A description of the inconsistency.
        message: String,
    },

    /// A general calculation error occurred (e.g. decimal overflow).
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
