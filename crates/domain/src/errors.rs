//! Error types for the sitemap proxy domain.
//!
//! The domain only ever fails at construction time: every entity and value
//! object validates its input eagerly and reports a [`ValidationError`].

/// Validation errors raised while constructing domain values
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Field validation failed
    #[error("Field validation failed: {field} - {message}")]
    FieldValidation { field: String, message: String },

    /// Invalid email address
    #[error("Invalid email format: {0}")]
    InvalidEmail(String),

    /// Invalid pagination parameters
    #[error("Invalid pagination: {0}")]
    InvalidPagination(String),
}

impl ValidationError {
    /// Shorthand for a field-level validation failure
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FieldValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Name of the offending field, when the error is field-scoped
    pub fn field_name(&self) -> Option<&str> {
        match self {
            Self::FieldValidation { field, .. } => Some(field),
            Self::InvalidEmail(_) => Some("email"),
            Self::InvalidPagination(_) => None,
        }
    }
}

/// Result type for domain construction
pub type ValidationResult<T> = Result<T, ValidationError>;
