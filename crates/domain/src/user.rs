//! User directory types.

use crate::errors::{ValidationError, ValidationResult};
use crate::identifiers::UserId;
use crate::route::next_update_timestamp;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9+_.-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap()
});

/// Normalised (lower-cased) email address
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    pub fn parse(value: &str) -> ValidationResult<Self> {
        let value = value.trim();
        if value.is_empty() {
            return Err(ValidationError::field("email", "cannot be null or empty"));
        }
        if !EMAIL_REGEX.is_match(value) {
            return Err(ValidationError::InvalidEmail(value.to_string()));
        }
        Ok(Self(value.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// User from the upstream directory
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    id: UserId,
    name: String,
    email: Email,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        email: Email,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> ValidationResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::field("name", "cannot be null or empty"));
        }
        Ok(Self {
            id,
            name,
            email,
            created_at,
            updated_at,
        })
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn with_updated_name(&self, name: impl Into<String>) -> ValidationResult<Self> {
        let mut updated = Self::new(
            self.id.clone(),
            name,
            self.email.clone(),
            self.created_at,
            self.updated_at,
        )?;
        updated.updated_at = next_update_timestamp(self.updated_at);
        Ok(updated)
    }

    pub fn with_updated_email(&self, email: Email) -> Self {
        Self {
            email,
            updated_at: next_update_timestamp(self.updated_at),
            ..self.clone()
        }
    }
}
