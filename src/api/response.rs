//! Response types for the Salary Equivalence Engine API.
//!
//! This module defines the success bodies that are not plain domain models,
//! the error response structure, and the mapping from engine errors to HTTP
//! status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::config::WorkingTimeAssumptions;
use crate::error::EngineError;
use crate::models::{Currency, PayPeriod, SalaryObservation};
use crate::salary_text::ParsedSalary;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }

    fn internal(error: ApiError) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::InvalidAmount { .. } => {
                Self::bad_request(ApiError::new("INVALID_AMOUNT", message))
            }
            EngineError::InvalidPeriod { .. } => Self::bad_request(ApiError::with_details(
                "INVALID_PERIOD",
                message,
                "Supported periods are listed by GET /options",
            )),
            EngineError::MissingExchangeRate { currency } => {
                Self::bad_request(ApiError::with_details(
                    "MISSING_EXCHANGE_RATE",
                    message,
                    format!("Add a rate for '{}' to the request's rates table", currency),
                ))
            }
            EngineError::InvalidExchangeRate { .. } => {
                Self::bad_request(ApiError::new("INVALID_EXCHANGE_RATE", message))
            }
            EngineError::InvalidCurrency { .. } => Self::bad_request(ApiError::with_details(
                "INVALID_CURRENCY",
                message,
                "Currency codes are three letters, e.g. 'PLN'",
            )),
            EngineError::UnsupportedCurrency { .. } => Self::bad_request(ApiError::with_details(
                "UNSUPPORTED_CURRENCY",
                message,
                "Supported currencies are listed by GET /options",
            )),
            EngineError::SalaryParseError { .. } => {
                Self::bad_request(ApiError::new("SALARY_PARSE_ERROR", message))
            }
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidConfig { .. } => Self::internal(ApiError::with_details(
                "CONFIG_ERROR",
                "Configuration error",
                message,
            )),
            EngineError::CalculationError { message } => Self::internal(ApiError::with_details(
                "CALCULATION_ERROR",
                "Calculation failed",
                message,
            )),
        }
    }
}

/// Response body for the `/salary/parse` endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct SalaryParseResponse {
    /// What the text said.
    pub parsed: ParsedSalary,
    /// The midpoint observation, when currency and period are known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observation: Option<SalaryObservation>,
}

/// Response body for the `/options` endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct OptionsResponse {
    /// The currency exchange rates are quoted against.
    pub base_currency: Currency,
    /// Currencies the engine offers.
    pub currencies: Vec<Currency>,
    /// Pay periods the engine offers, shortest first.
    pub periods: Vec<PayPeriod>,
    /// The constants period conversion uses.
    pub working_time: WorkingTimeAssumptions,
}
