//! Response types for the Payroll Engine API.
//!
//! This module defines the reference table and time sheet responses, the
//! error response structures and error handling for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{DayEntries, PayMonth};

/// One row of the pay grade table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayGradeResponse {
    /// Position in the table, used as `pay_grade_index`.
    pub index: usize,
    /// The pay grade code, e.g. `"E5"`.
    pub code: String,
    /// The fixed monthly base salary.
    pub monthly_base_salary: Decimal,
    /// The hourly rate derived from the salary.
    pub hourly_rate: Decimal,
    /// The salary formatted for display, e.g. `"3189.00 €"`.
    pub display: String,
}

/// One row of the tax class table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxClassResponse {
    /// Position in the table, used as `tax_class_index`.
    pub index: usize,
    /// The tax class code, e.g. `"III"`.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Monthly allowance.
    pub allowance: Decimal,
    /// Tax rate in percent.
    pub rate: Decimal,
}

/// The standard schedule for a month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardScheduleResponse {
    /// The month the entries belong to.
    pub period: PayMonth,
    /// One entry per weekday.
    pub entries: DayEntries,
}

/// Response of the `/health` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"`.
    pub status: String,
    /// The engine version.
    pub engine_version: String,
    /// The code of the loaded ruleset.
    pub ruleset: String,
}

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

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidConfig { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            },
            EngineError::Validation { day, .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "VALIDATION_ERROR",
                    message,
                    format!("Correct the entry for day {} and resubmit", day),
                ),
            },
            EngineError::OutOfRange { table, len, .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "OUT_OF_RANGE",
                    message,
                    format!("Valid {} indices are 0 to {}", table, len.saturating_sub(1)),
                ),
            },
            EngineError::InvalidPeriod { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("INVALID_PERIOD", message),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_validation_error_maps_to_400() {
        let api_error: ApiErrorResponse = EngineError::Validation {
            day: 4,
            message: "end time '25:00' is not a valid HH:MM time".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "VALIDATION_ERROR");
        assert!(api_error.error.message.contains("day 4"));
    }

    #[test]
    fn test_out_of_range_lists_valid_indices() {
        let api_error: ApiErrorResponse = EngineError::OutOfRange {
            table: "tax class",
            index: 6,
            len: 6,
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "OUT_OF_RANGE");
        assert_eq!(
            api_error.error.details.as_deref(),
            Some("Valid tax class indices are 0 to 5")
        );
    }

    #[test]
    fn test_config_errors_map_to_500() {
        let api_error: ApiErrorResponse = EngineError::InvalidConfig {
            message: "no pay grades".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "CONFIG_ERROR");
    }
}
