//! HTTP error handling and conversion.
//!
//! This module provides error types for the REST API and implements
//! conversion from application errors to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use sitemap_application::ApplicationError;
use sitemap_domain::ValidationError;
use std::fmt;
use thiserror::Error;
use tracing::error;

/// API-specific error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Application layer error
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// Validation error
    #[error("{0}")]
    Validation(String),

    /// Bad request
    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Application(err) => StatusCode::from_u16(err.http_status())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Get error code for API response
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Application(err) => err.error_code(),
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::BadRequest(_) => "BAD_REQUEST",
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Application(ApplicationError::ValidationFailed(message)) => message.clone(),
            Self::Application(ApplicationError::UpstreamFailure { message, .. }) => {
                message.clone()
            }
            Self::Application(ApplicationError::Internal(_)) => {
                "An internal error occurred".to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Standardized error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code
    pub error: String,

    /// Human-readable message
    pub message: String,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Missing resources answer with an empty body
        if status == StatusCode::NOT_FOUND {
            return status.into_response();
        }

        if status.is_server_error() {
            error!(status = %status, error = %self, "Request failed");
        }

        let body = ErrorResponse::new(self.error_code(), self.message());

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
