//! Testing utilities for the sitemap proxy
//!
//! This crate provides:
//! - Test fixtures for routes, users and todos
//! - Builder patterns for precise test data construction
//! - In-memory implementations of the outbound ports with failure and
//!   latency injection
//!
//! # Examples
//!
//! ```
//! use sitemap_testing::{builders::*, fixtures::*};
//!
//! let route = RouteBuilder::new()
//!     .with_id("r1")
//!     .with_path("/api/users")
//!     .inactive()
//!     .build();
//! assert!(!route.is_active());
//!
//! let routes = create_test_routes(3);
//! assert_eq!(routes.len(), 3);
//! ```

pub mod builders;
pub mod fixtures;
pub mod mocks;

// Re-export commonly used types
pub use builders::*;
pub use fixtures::*;
pub use mocks::*;

// Re-export testing dependencies for convenience
pub use fake;
pub use proptest;
pub use wiremock;
