//! Error handling for the application

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::pricing::calculators::FeeError;
use crate::pricing::responses::ErrorResponse;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Malformed request body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed request body: {0}")]
    Rejection(#[from] JsonRejection),

    #[error(transparent)]
    Fee(#[from] FeeError),

    #[error("Submission not acknowledged: {0}")]
    NotAcknowledged(&'static str),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    fn error_type(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation_error",
            AppError::Json(_) | AppError::Rejection(_) => "malformed_body",
            AppError::Fee(FeeError::NoStudents) => "no_students",
            AppError::NotAcknowledged(_) => "not_acknowledged",
            AppError::Config(_) => "configuration_error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) | AppError::Json(_) | AppError::Rejection(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Fee(_) | AppError::NotAcknowledged(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Config(msg) => {
                tracing::error!("Configuration error: {}", msg);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ErrorResponse {
            error_type: self.error_type().to_string(),
            message: self.to_string(),
            details: None,
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
