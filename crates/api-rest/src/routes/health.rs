//! Health check endpoints.

use crate::{responses::ApiResponse, state::AppState};
use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,

    /// Service uptime in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uptime: Option<u64>,
}

/// Readiness check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReadinessResponse {
    /// Overall readiness status
    pub ready: bool,

    /// Upstream services the proxy forwards to
    pub upstreams: Vec<UpstreamTarget>,
}

/// A configured upstream
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpstreamTarget {
    pub name: String,
    pub base_url: String,
}

/// Health check routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
}

/// Basic health check
///
/// Returns service status and version information.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let response = HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime: Some(state.started_at.elapsed().as_secs()),
    };

    Json(ApiResponse::success(response))
}

/// Readiness check
///
/// Lists the upstreams requests are forwarded to. The proxy holds no local
/// resources, so it is ready once the router is serving.
#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    responses(
        (status = 200, description = "Service readiness status", body = ReadinessResponse)
    )
)]
pub async fn ready(State(state): State<AppState>) -> Json<ApiResponse<ReadinessResponse>> {
    let upstream = &state.config.upstream;
    let upstreams = vec![
        UpstreamTarget {
            name: "route-registry".to_string(),
            base_url: upstream.routes_base_url.clone(),
        },
        UpstreamTarget {
            name: "directory".to_string(),
            base_url: upstream.directory_base_url.clone(),
        },
    ];

    Json(ApiResponse::success(ReadinessResponse {
        ready: true,
        upstreams,
    }))
}
