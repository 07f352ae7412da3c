//! Error handling for the AgriWise advisory server
//!
//! Maps engine errors onto HTTP status codes with a consistent JSON body

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::{AdvisoryError, ComputationError, DecodeError, LoanAssessment, ValidationError};
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Loan validation failure; the error record is returned as the body
    #[error("Loan application rejected")]
    LoanRejected(Box<LoanAssessment>),

    #[error("Image of {size} bytes exceeds the {limit} byte limit")]
    PayloadTooLarge { size: usize, limit: usize },

    #[error("Image decoding timed out")]
    DecodeTimeout,

    #[error(transparent)]
    Computation(#[from] ComputationError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<AdvisoryError> for AppError {
    fn from(err: AdvisoryError) -> Self {
        match err {
            AdvisoryError::Decode(e) => AppError::Decode(e),
            AdvisoryError::Validation(e) => AppError::Validation(e),
            AdvisoryError::Computation(e) => AppError::Computation(e),
        }
    }
}

/// Bodies that are not JSON, or not the expected shape, fail as a whole
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(ValidationError::new("body", rejection.body_text()))
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ErrorDetail {
    fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            field: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::Decode(e) => (StatusCode::BAD_REQUEST, ErrorDetail::new("DECODE_ERROR", e.to_string())),
            AppError::Validation(e) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    field: Some(e.field.clone()),
                    ..ErrorDetail::new("VALIDATION_ERROR", e.message.clone())
                },
            ),
            AppError::LoanRejected(record) => {
                tracing::info!("Loan application rejected: {:?}", record.error);
                return (StatusCode::BAD_REQUEST, Json(record)).into_response();
            }
            AppError::PayloadTooLarge { .. } => (
                StatusCode::PAYLOAD_TOO_LARGE,
                ErrorDetail::new("PAYLOAD_TOO_LARGE", self.to_string()),
            ),
            AppError::DecodeTimeout => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorDetail::new("DECODE_TIMEOUT", "Image analysis took too long, please retry"),
            ),
            AppError::Computation(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail::new("COMPUTATION_ERROR", e.to_string()),
            ),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail::new("INTERNAL_ERROR", "An internal server error occurred"),
            ),
        };

        // Log the error for debugging; client faults stay at debug
        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
