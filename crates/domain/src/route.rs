//! Route entity.
//!
//! A [`Route`] is produced by the remote-lookup mapping layer from an upstream
//! payload and is never persisted locally. It is immutable: every change goes
//! through a copy-producing transformation that also refreshes `updated_at`.

use crate::errors::{ValidationError, ValidationResult};
use crate::identifiers::RouteId;
use chrono::{DateTime, Duration, Utc};
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

/// Open, insertion-ordered metadata map attached to a route
pub type RouteMetadata = IndexMap<String, serde_json::Value>;

/// Raw field values used to construct a [`Route`]
#[derive(Debug, Clone)]
pub struct NewRoute {
    pub id: RouteId,
    pub path: String,
    pub name: String,
    pub description: Option<String>,
    pub method: String,
    pub tags: IndexSet<String>,
    pub metadata: RouteMetadata,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A route published by the upstream registry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    id: RouteId,
    path: String,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    method: String,
    tags: IndexSet<String>,
    metadata: RouteMetadata,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Route {
    /// Build a route, rejecting blank `path`, `name` or `method`
    pub fn new(fields: NewRoute) -> ValidationResult<Self> {
        require_non_blank("path", &fields.path)?;
        require_non_blank("name", &fields.name)?;
        require_non_blank("method", &fields.method)?;

        Ok(Self {
            id: fields.id,
            path: fields.path,
            name: fields.name,
            description: fields.description,
            method: fields.method,
            tags: fields.tags,
            metadata: fields.metadata,
            active: fields.active,
            created_at: fields.created_at,
            updated_at: fields.updated_at,
        })
    }

    pub fn id(&self) -> &RouteId {
        &self.id
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn tags(&self) -> &IndexSet<String> {
        &self.tags
    }

    pub fn metadata(&self) -> &RouteMetadata {
        &self.metadata
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Copy of this route with a new active flag
    pub fn with_active_status(&self, active: bool) -> Self {
        Self {
            active,
            updated_at: next_update_timestamp(self.updated_at),
            ..self.clone()
        }
    }

    /// Copy of this route with its metadata replaced
    pub fn with_updated_metadata(&self, metadata: RouteMetadata) -> Self {
        Self {
            metadata,
            updated_at: next_update_timestamp(self.updated_at),
            ..self.clone()
        }
    }

    /// Copy of this route with `extra` overlaid on the existing metadata.
    ///
    /// Keys already present keep their position but take the new value.
    pub fn with_merged_metadata(&self, extra: RouteMetadata) -> Self {
        let mut combined = self.metadata.clone();
        combined.extend(extra);
        self.with_updated_metadata(combined)
    }

    /// Copy of this route with a new description
    pub fn with_updated_description(&self, description: Option<String>) -> Self {
        Self {
            description,
            updated_at: next_update_timestamp(self.updated_at),
            ..self.clone()
        }
    }

    /// Merge a freshly observed active flag into this route.
    ///
    /// The route is returned untouched (same `updated_at`) when the flag
    /// already matches.
    pub fn reconcile_active_status(self, observed: bool) -> Self {
        if self.active == observed {
            self
        } else {
            self.with_active_status(observed)
        }
    }
}

fn require_non_blank(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::field(field, "cannot be null or empty"));
    }
    Ok(())
}

/// Timestamp for a mutation, strictly later than `previous` even when the
/// clock has not moved (or moved backwards).
pub(crate) fn next_update_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}
