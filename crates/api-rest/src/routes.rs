//! HTTP route handlers.
//!
//! This module organizes all endpoints by upstream resource.

pub mod health;
pub mod sitemap;
pub mod todos;
pub mod users;

use crate::state::AppState;
use axum::Router;

// Re-export for convenience
pub use health::routes as health_routes;

/// Every proxied endpoint under `/api`
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/sitemap", sitemap::routes())
        .merge(users::routes())
        .merge(todos::routes())
}
