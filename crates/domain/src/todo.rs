//! Todo items from the upstream directory.

use crate::errors::{ValidationError, ValidationResult};
use crate::identifiers::TodoId;
use serde::Serialize;

/// A todo item owned by a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Todo {
    pub id: TodoId,
    pub user_id: u64,
    pub title: String,
    pub completed: bool,
}

impl Todo {
    pub fn new(
        id: TodoId,
        user_id: u64,
        title: impl Into<String>,
        completed: bool,
    ) -> ValidationResult<Self> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ValidationError::field("title", "cannot be null or empty"));
        }
        Ok(Self {
            id,
            user_id,
            title,
            completed,
        })
    }
}
