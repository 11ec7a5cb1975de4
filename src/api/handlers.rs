//! HTTP request handlers for the Salary Equivalence Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{PayPeriodConverter, build_equivalence_matrix};
use crate::error::EngineResult;
use crate::models::{AuditStep, AuditTrace, EquivalenceResult};
use crate::salary_text::parse_salary_text;

use super::request::{EquivalenceRequest, ResolvedEquivalence, SalaryParseRequest};
use super::response::{ApiError, ApiErrorResponse, OptionsResponse, SalaryParseResponse};
use super::state::AppState;

/// The largest scale a `Decimal` can carry.
const MAX_ROUND_DP: u32 = 28;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/equivalence", post(equivalence_handler))
        .route("/salary/parse", post(salary_parse_handler))
        .route("/options", get(options_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(error: ApiErrorResponse) -> Response {
    json_response(error.status, error.error)
}

/// Turns a JSON extraction failure into a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's description of the problem
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}

/// Handler for POST /equivalence endpoint.
///
/// Expands one salary observation into the requested period × currency grid.
async fn equivalence_handler(
    State(state): State<AppState>,
    payload: Result<Json<EquivalenceRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing equivalence request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    if let Some(dp) = request.round_dp {
        if dp > MAX_ROUND_DP {
            warn!(correlation_id = %correlation_id, round_dp = dp, "round_dp out of range");
            return json_response(
                StatusCode::BAD_REQUEST,
                ApiError::validation_error(format!(
                    "round_dp must be at most {}, got {}",
                    MAX_ROUND_DP,
                    dp
                )),
            );
        }
    }

    let resolved = match request.resolve(state.config()) {
        Ok(resolved) => resolved,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Rejected equivalence request"
            );
            return error_response(err.into());
        }
    };

    let start_time = Instant::now();
    match perform_equivalence(&resolved, request.round_dp, state.converter()) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                observation = %result.observation,
                cells = result.matrix.len(),
                warnings = result.audit_trace.warnings.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Equivalence completed successfully"
            );
            json_response(StatusCode::OK, result)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Equivalence failed"
            );
            error_response(err.into())
        }
    }
}

/// Builds the matrix and wraps it with identifiers and the audit trace.
fn perform_equivalence(
    resolved: &ResolvedEquivalence,
    round_dp: Option<u32>,
    converter: &PayPeriodConverter,
) -> EngineResult<EquivalenceResult> {
    let start_time = Instant::now();

    let built = build_equivalence_matrix(
        &resolved.observation,
        &resolved.targets,
        &resolved.rates,
        converter,
    )?;
    let mut steps = built.audit_steps;

    let matrix = match round_dp {
        Some(dp) => {
            let step_number = steps.last().map_or(1, |step| step.step_number + 1);
            steps.push(AuditStep {
                step_number,
                rule_id: "presentation_rounding".to_string(),
                rule_name: "Presentation Rounding".to_string(),
                input: serde_json::json!({ "round_dp": dp }),
                output: serde_json::json!({ "cells": built.matrix.len() }),
                reasoning: format!("Rounded every cell to {} decimal places for display", dp),
            });
            built.matrix.rounded(dp)
        }
        None => built.matrix,
    };

    Ok(EquivalenceResult {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        observation: resolved.observation.clone(),
        matrix,
        rounded_to: round_dp,
        audit_trace: AuditTrace {
            steps,
            warnings: built.warnings,
            duration_us: start_time.elapsed().as_micros() as u64,
        },
    })
}

/// Handler for POST /salary/parse endpoint.
///
/// Parses free text such as "$100,000 - $120,000" and, when currency and
/// period are known or defaulted, returns the midpoint observation too.
async fn salary_parse_handler(
    State(state): State<AppState>,
    payload: Result<Json<SalaryParseRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing salary parse request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let config = state.config();
    let outcome = request.defaults(config).and_then(|defaults| {
        parse_salary_text(&request.text, config.config()).map(|parsed| (defaults, parsed))
    });
    let ((default_currency, default_period), parsed) = match outcome {
        Ok(parsed) => parsed,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Salary parse failed"
            );
            return error_response(err.into());
        }
    };

    let observation = parsed
        .to_observation(default_currency.as_ref(), default_period)
        .ok()
        .filter(|observation| {
            config.config().is_supported_currency(observation.currency())
                && state.converter().supports(observation.period())
        });

    info!(
        correlation_id = %correlation_id,
        min = %parsed.min,
        resolved = observation.is_some(),
        "Salary parsed"
    );

    json_response(
        StatusCode::OK,
        SalaryParseResponse {
            parsed,
            observation,
        },
    )
}

/// Handler for GET /options endpoint.
async fn options_handler(State(state): State<AppState>) -> impl IntoResponse {
    let config = state.config();
    Json(OptionsResponse {
        base_currency: config.config().base_currency().clone(),
        currencies: config.currencies().to_vec(),
        periods: config.supported_periods().to_vec(),
        working_time: *config.working_time(),
    })
}
