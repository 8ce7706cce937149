//! Response types for the payroll API.
//!
//! Every failure is returned as an [`ApiError`] body with a status chosen by
//! [`ApiErrorResponse`].

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

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

    /// An unknown employee or period.
    pub fn not_found(resource: &str, id: &str) -> Self {
        Self::with_details(
            "NOT_FOUND",
            format!("{} not found: {}", resource, id),
            format!("No {} is stored under '{}'", resource, id),
        )
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
    /// A 404 for `resource` identified by `id`.
    pub fn not_found(resource: &str, id: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            error: ApiError::not_found(resource, id),
        }
    }

    /// A 400 carrying `error`.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
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
        let (status, code) = match &error {
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidConfig { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR")
            }
            EngineError::InvalidEmployee { .. } => (StatusCode::BAD_REQUEST, "INVALID_EMPLOYEE"),
            EngineError::InvalidPeriodKey { .. } => {
                (StatusCode::BAD_REQUEST, "INVALID_PERIOD_KEY")
            }
            EngineError::EmployeeAlreadyExists { .. } => {
                (StatusCode::CONFLICT, "EMPLOYEE_ALREADY_EXISTS")
            }
            EngineError::PeriodAlreadyExists { .. } => {
                (StatusCode::CONFLICT, "PERIOD_ALREADY_EXISTS")
            }
            EngineError::StorageRead { .. } | EngineError::StorageWrite { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR")
            }
            EngineError::CorruptSnapshot { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CORRUPT_SNAPSHOT")
            }
        };

        let error = match error {
            EngineError::InvalidEmployee { field, .. } => ApiError::with_details(
                code,
                message,
                format!("Check the '{}' field of the employee record", field),
            ),
            _ => ApiError::new(code, message),
        };

        ApiErrorResponse { status, error }
    }
}

/// Body of `GET /totals`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalsResponse {
    /// Number of stored periods.
    pub periods: usize,
    /// Sum of every period's net total.
    pub net_total: Decimal,
}
