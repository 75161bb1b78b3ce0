//! Sitemap Proxy Domain Types
//!
//! This crate provides the core domain model for the sitemap proxy: the
//! routes republished from the upstream registry and the users and todos
//! republished from the upstream directory. Nothing here performs I/O; every
//! type validates its input when constructed and is otherwise immutable.
//!
//! ## Architecture
//!
//! - **identifiers**: Validated string identifiers for all entities
//! - **route**: The route entity and its copy-producing transformations
//! - **filter**: Query specification for route listings
//! - **user**: Users and email addresses
//! - **todo**: Todo items
//! - **errors**: Validation errors raised at construction time
//!
//! ## Usage
//!
//! ```rust
//! use sitemap_domain::{RouteFilter, RouteId};
//!
//! let id = RouteId::parse("r1").unwrap();
//! assert_eq!(id.as_str(), "r1");
//!
//! let filter = RouteFilter::paginated(0, 50).unwrap().with_method("GET");
//! assert_eq!(filter.method(), Some("GET"));
//! assert!(RouteFilter::paginated(-1, 50).is_err());
//! ```

#![warn(clippy::all)]

pub mod errors;
pub mod filter;
pub mod identifiers;
pub mod route;
pub mod todo;
pub mod user;

// Re-export commonly used types
pub use errors::{ValidationError, ValidationResult};
pub use filter::{RouteFilter, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
pub use identifiers::*;
pub use route::{NewRoute, Route, RouteMetadata};
pub use todo::Todo;
pub use user::{Email, User};
