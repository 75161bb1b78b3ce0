//! Strongly-typed identifier types for the sitemap proxy domain.
//!
//! Upstream services hand out opaque identifiers (numeric strings for the
//! JSONPlaceholder directory, arbitrary strings for the route registry), so
//! every id is a validated string newtype rather than a UUID. Distinct types
//! keep a `RouteId` from being passed where a `UserId` is expected.

use crate::errors::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $field:literal, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Create an ID from a raw string, rejecting blank values
            pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err(ValidationError::field($field, "cannot be null or empty"));
                }
                Ok(Self(value))
            }

            /// Create a new random ID
            #[inline]
            pub fn generate() -> Self {
                Self(Uuid::now_v7().to_string())
            }

            /// Get the underlying string value
            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Convert into the underlying string value
            #[inline]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }
    };
}

define_id!(RouteId, "route_id", "Identifier of a route in the upstream registry");

define_id!(UserId, "user_id", "Identifier of a user in the upstream directory");

define_id!(TodoId, "todo_id", "Identifier of a todo item in the upstream directory");
