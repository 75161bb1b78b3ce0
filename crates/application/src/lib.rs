//! Application layer for the sitemap proxy
//!
//! This crate orchestrates the enrichment use cases over the outbound ports
//! implemented by the infrastructure layer.
//!
//! ## Architecture
//!
//! The application layer sits between the domain and infrastructure layers.
//! It owns the port traits (`RouteApiPort`, `UserApiPort`, `TodoApiPort`) and
//! the services that drive them.
//!
//! ## Modules
//!
//! - `services` - Route enrichment and directory read-through services

pub mod services;

// Re-export commonly used types
pub use services::{
    RouteApiPort, RouteService, ServiceConfig, TodoApiPort, TodoService, UserApiPort, UserService,
};

use sitemap_domain::ValidationError;
use thiserror::Error;

/// Application-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApplicationError {
    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// An upstream call failed, timed out or returned an unusable payload
    #[error("Upstream failure from {service}: {message}")]
    UpstreamFailure { service: String, message: String },

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    pub fn upstream(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::UpstreamFailure {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Get HTTP status code for this error
    pub fn http_status(&self) -> u16 {
        match self {
            ApplicationError::NotFound(_) => 404,
            ApplicationError::ValidationFailed(_) => 400,
            ApplicationError::UpstreamFailure { .. } => 502,
            ApplicationError::Internal(_) => 500,
        }
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            ApplicationError::NotFound(_) => "NOT_FOUND",
            ApplicationError::ValidationFailed(_) => "VALIDATION_ERROR",
            ApplicationError::UpstreamFailure { .. } => "UPSTREAM_FAILURE",
            ApplicationError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<ValidationError> for ApplicationError {
    fn from(err: ValidationError) -> Self {
        ApplicationError::ValidationFailed(err.to_string())
    }
}

pub type ApplicationResult<T> = Result<T, ApplicationError>;
