//! HTTP request handlers for the Payroll Engine API.
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
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{calculate_hourly_rate, compute};
use crate::models::{format_eur, standard_entries};

use super::request::{CalculationRequest, StandardScheduleRequest};
use super::response::{
    ApiError, ApiErrorResponse, HealthResponse, PayGradeResponse, StandardScheduleResponse,
    TaxClassResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/timesheet/standard", post(standard_schedule_handler))
        .route("/pay-grades", get(pay_grades_handler))
        .route("/tax-classes", get(tax_classes_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Handler for POST /calculate endpoint.
///
/// Accepts a calculation request and returns the payroll result. The
/// request's `month` is the calendar month, 1 to 12.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let start_time = Instant::now();
    let result = request.period().and_then(|period| {
        compute(
            &request.entries,
            request.pay_grade_index,
            request.tax_class_index,
            period,
            state.ruleset(),
        )
    });

    match result {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                period = %result.period,
                pay_grade = %result.pay_grade,
                entries_count = request.entries.len(),
                gross_total = %result.gross_total,
                net_total = %result.net_total,
                duration_us = start_time.elapsed().as_micros(),
                "Calculation completed successfully"
            );
            json_response(StatusCode::OK, result)
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

/// Handler for POST /timesheet/standard endpoint.
///
/// Returns a 06:00 to 14:00 entry for every Monday to Friday of the month.
async fn standard_schedule_handler(
    State(state): State<AppState>,
    payload: Result<Json<StandardScheduleRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing standard schedule request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    match request.period() {
        Ok(period) => {
            let entries = standard_entries(period, state.ruleset().standard_schedule());
            info!(
                correlation_id = %correlation_id,
                period = %period,
                days = entries.len(),
                "Standard schedule generated"
            );
            json_response(StatusCode::OK, StandardScheduleResponse { period, entries })
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Invalid period");
            error_response(err.into())
        }
    }
}

/// Handler for GET /pay-grades endpoint.
async fn pay_grades_handler(State(state): State<AppState>) -> Response {
    let ruleset = state.ruleset();
    let pay_grades: Vec<PayGradeResponse> = ruleset
        .pay_grades()
        .iter()
        .enumerate()
        .map(|(index, grade)| PayGradeResponse {
            index,
            code: grade.code.clone(),
            monthly_base_salary: grade.monthly_base_salary,
            hourly_rate: calculate_hourly_rate(grade, ruleset.working_time(), 1).rate,
            display: format_eur(grade.monthly_base_salary),
        })
        .collect();
    json_response(StatusCode::OK, pay_grades)
}

/// Handler for GET /tax-classes endpoint.
async fn tax_classes_handler(State(state): State<AppState>) -> Response {
    let tax_classes: Vec<TaxClassResponse> = state
        .ruleset()
        .tax_classes()
        .iter()
        .enumerate()
        .map(|(index, class)| TaxClassResponse {
            index,
            code: class.code.to_string(),
            name: class.name.clone(),
            allowance: class.allowance,
            rate: class.rate,
        })
        .collect();
    json_response(StatusCode::OK, tax_classes)
}

/// Handler for GET /health endpoint.
async fn health_handler(State(state): State<AppState>) -> Response {
    json_response(
        StatusCode::OK,
        HealthResponse {
            status: "ok".to_string(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            ruleset: state.ruleset().metadata().code.clone(),
        },
    )
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(api_error: ApiErrorResponse) -> Response {
    json_response(api_error.status, api_error.error)
}

fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
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

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    // ==========================================================================
    // API-001: valid request returns 200 with a result
    // ==========================================================================
    #[tokio::test]
    async fn test_api_001_valid_request_returns_200() {
        let app = create_router(AppState::default());
        let response = app
            .oneshot(post_json(
                "/calculate",
                r#"{"year": 2025, "month": 3, "pay_grade_index": 0, "tax_class_index": 0,
                    "entries": {"3": {"start": "06:00", "end": "14:00"}}}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["pay_grade"], "E5");
        assert_eq!(json["worked_hours"], "6");
        assert_eq!(json["is_estimate"], false);
    }

    // ==========================================================================
    // API-002: malformed JSON returns 400
    // ==========================================================================
    #[tokio::test]
    async fn test_api_002_malformed_json_returns_400() {
        let app = create_router(AppState::default());
        let response = app
            .oneshot(post_json("/calculate", "{not json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "MALFORMED_JSON");
    }

    // ==========================================================================
    // API-003: missing field returns 400 validation error
    // ==========================================================================
    #[tokio::test]
    async fn test_api_003_missing_field_returns_400() {
        let app = create_router(AppState::default());
        let response = app
            .oneshot(post_json(
                "/calculate",
                r#"{"year": 2025, "month": 3, "tax_class_index": 0}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert!(json["message"].as_str().unwrap().contains("pay_grade_index"));
    }

    // ==========================================================================
    // API-004: unknown pay grade index returns 400
    // ==========================================================================
    #[tokio::test]
    async fn test_api_004_unknown_pay_grade_returns_400() {
        let app = create_router(AppState::default());
        let response = app
            .oneshot(post_json(
                "/calculate",
                r#"{"year": 2025, "month": 3, "pay_grade_index": 99, "tax_class_index": 0}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "OUT_OF_RANGE");
    }

    #[tokio::test]
    async fn test_invalid_month_returns_400() {
        let app = create_router(AppState::default());
        let response = app
            .oneshot(post_json("/timesheet/standard", r#"{"year": 2025, "month": 0}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "INVALID_PERIOD");
    }

    #[tokio::test]
    async fn test_health() {
        let app = create_router(AppState::default());
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["ruleset"], "igm_hessen_2025");
    }
}
