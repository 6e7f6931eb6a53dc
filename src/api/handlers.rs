//! HTTP request handlers for the payroll API.
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
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::calculate_payroll;
use crate::config::TaxYearConfig;
use crate::error::PayrollResult;
use crate::models::{AuditTrace, AuditWarning, CalculationResult, PayrollInput};

use super::request::CalculationRequest;
use super::response::{ApiError, ApiErrorResponse, HealthResponse, TaxYearsResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/tax-years", get(tax_years_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

fn error_response(api_error: ApiErrorResponse) -> Response {
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}

/// Handler for POST /calculate endpoint.
///
/// Accepts a calculation request and returns the salary breakdown.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
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
            return error_response(ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error,
            });
        }
    };

    let config = state.config();
    let tax_year = match config.resolve_tax_year(request.tax_year) {
        Ok(tax_year) => tax_year,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                tax_year = ?request.tax_year,
                "Tax year not found"
            );
            return error_response(err.into());
        }
    };

    let input = request.into_input(tax_year);

    let start_time = Instant::now();
    match perform_calculation(&input, tax_year) {
        Ok(result) => {
            let duration = start_time.elapsed();
            match &result.breakdown {
                Some(breakdown) => info!(
                    correlation_id = %correlation_id,
                    tax_year = tax_year.year,
                    gross_annual = %breakdown.gross_annual,
                    net_annual = %breakdown.net_annual,
                    moving_residency = input.moving_residency,
                    duration_us = duration.as_micros(),
                    "Calculation completed successfully"
                ),
                None => info!(
                    correlation_id = %correlation_id,
                    "Zero salary, nothing to compute"
                ),
            }
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(result),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Calculation failed"
            );
            error_response(err.into())
        }
    }
}

/// Runs the payroll calculation and wraps it in a [`CalculationResult`].
fn perform_calculation(
    input: &PayrollInput,
    tax_year: &TaxYearConfig,
) -> PayrollResult<CalculationResult> {
    let start_time = Instant::now();

    let (breakdown, distribution, steps, warnings) = match calculate_payroll(input, tax_year)? {
        Some(calculation) => (
            Some(calculation.breakdown),
            calculation.distribution,
            calculation.audit_steps,
            calculation.warnings,
        ),
        None => (
            None,
            Vec::new(),
            Vec::new(),
            vec![AuditWarning {
                code: "NO_INCOME".to_string(),
                message: "Gross salary is zero; no breakdown was produced".to_string(),
                severity: "low".to_string(),
            }],
        ),
    };

    let duration_us = start_time.elapsed().as_micros() as u64;

    Ok(CalculationResult {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        tax_year: tax_year.year,
        input: input.clone(),
        breakdown,
        distribution,
        audit_trace: AuditTrace {
            steps,
            warnings,
            duration_us,
        },
    })
}

/// Handler for GET /tax-years endpoint.
async fn tax_years_handler(State(state): State<AppState>) -> Json<TaxYearsResponse> {
    let config = state.config();
    Json(TaxYearsResponse {
        jurisdiction: config.jurisdiction().clone(),
        tax_years: config.config().tax_years().to_vec(),
    })
}

/// Handler for GET /health endpoint.
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
