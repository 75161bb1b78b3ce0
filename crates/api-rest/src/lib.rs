//! Sitemap Proxy REST API
//!
//! Axum HTTP surface over the application services. It exposes the enriched
//! route sitemap and proxies the user/todo directory, with OpenAPI
//! documentation and uniform error responses.
//!
//! ## Architecture
//!
//! - **app**: Router assembly, middleware stack and OpenAPI document
//! - **routes**: HTTP route handlers organized by upstream resource
//! - **middleware**: Request ID propagation and request logging
//! - **extractors**: Query-string extractors for route listings
//! - **responses**: The `{ success, data }` response wrapper
//! - **error**: HTTP error mapping
//! - **state**: Shared state holding the type-erased services
//!
//! ## Usage
//!
//! ```rust,no_run
//! use sitemap_api_rest::{create_app, AppState};
//! use sitemap_common::AppConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = AppConfig::load()?;
//!     let address = config.server_address();
//!     let app = create_app(AppState::from_config(config)?);
//!
//!     let listener = tokio::net::TcpListener::bind(address).await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod app;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod responses;
pub mod routes;
pub mod state;

// Re-export commonly used types
pub use app::{create_app, ApiDoc};
pub use error::{ApiError, ApiResult};
pub use state::AppState;
