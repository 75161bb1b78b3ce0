//! Infrastructure layer for the sitemap proxy
//!
//! This crate implements the application ports over HTTP:
//! - [`ExternalRouteApiAdapter`] for the route registry
//! - [`UserApiAdapter`] and [`TodoApiAdapter`] for the user/todo directory
//!
//! Nothing is persisted locally; every call is proxied upstream through one
//! shared `reqwest` client carrying the configured connect and read timeouts.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use sitemap_common::UpstreamConfig;
//! use sitemap_infrastructure::UpstreamAdapters;
//!
//! let config = UpstreamConfig::default();
//! let adapters = UpstreamAdapters::from_config(&config).unwrap();
//! ```

pub mod external_api;

// Re-export commonly used types
pub use external_api::{
    build_http_client, ExternalApiError, ExternalApiResult, ExternalRouteApiAdapter,
    TodoApiAdapter, UpstreamClient, UserApiAdapter,
};

use sitemap_common::UpstreamConfig;
use tracing::info;

/// Every upstream adapter, sharing one HTTP client
#[derive(Clone, Debug)]
pub struct UpstreamAdapters {
    pub routes: ExternalRouteApiAdapter,
    pub users: UserApiAdapter,
    pub todos: TodoApiAdapter,
}

impl UpstreamAdapters {
    pub fn from_config(config: &UpstreamConfig) -> ExternalApiResult<Self> {
        let http = build_http_client(config)?;

        info!(
            routes_base_url = %config.routes_base_url,
            directory_base_url = %config.directory_base_url,
            connect_timeout_seconds = config.connect_timeout_seconds,
            read_timeout_seconds = config.read_timeout_seconds,
            "Upstream adapters configured"
        );

        Ok(Self {
            routes: ExternalRouteApiAdapter::new(http.clone(), &config.routes_base_url)?,
            users: UserApiAdapter::new(http.clone(), &config.directory_base_url)?,
            todos: TodoApiAdapter::new(http, &config.directory_base_url)?,
        })
    }
}
