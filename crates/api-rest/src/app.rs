//! Application builder.
//!
//! This module assembles all routes, middleware, and state into an Axum
//! router.

use crate::{
    middleware::{logging_middleware, request_id_middleware},
    routes::{self, health, sitemap, todos, users},
    state::AppState,
};
use axum::{http::HeaderValue, middleware, Router};
use sitemap_common::ServerConfig;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::warn;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// OpenAPI document for the proxy
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Sitemap Proxy API",
        version = "1.0.0",
        description = "Route sitemap enriched with live status and metadata, plus a user/todo directory proxy",
        license(name = "MIT"),
    ),
    paths(
        health::health,
        health::ready,
        sitemap::get_route,
        sitemap::list_routes,
        sitemap::list_active_routes,
        sitemap::list_routes_by_method,
        sitemap::list_routes_by_tags,
        users::get_user,
        todos::list_todos,
        todos::get_todo,
    ),
    components(schemas(
        health::HealthResponse,
        health::ReadinessResponse,
        health::UpstreamTarget,
        sitemap::RouteResponse,
        users::UserResponse,
        todos::TodoResponse,
    )),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "sitemap", description = "Enriched route sitemap"),
        (name = "users", description = "User directory"),
        (name = "todos", description = "Todo directory"),
    )
)]
pub struct ApiDoc;

/// Create the main application router
pub fn create_app(state: AppState) -> Router {
    let server = state.config.server.clone();

    let mut app = Router::new()
        .merge(routes::health_routes())
        .nest("/api", routes::api_routes())
        .with_state(state);

    if server.enable_swagger {
        app = app.merge(
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()),
        );
    }

    app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CompressionLayer::new())
            .layer(build_cors_layer(&server))
            .layer(TimeoutLayer::new(std::time::Duration::from_secs(
                server.request_timeout_seconds,
            )))
            .layer(middleware::from_fn(request_id_middleware))
            .layer(middleware::from_fn(logging_middleware)),
    )
}

/// Build CORS layer from configuration
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.cors_allowed_origins.iter().any(|origin| origin == "*") {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    cors.allow_origin(AllowOrigin::list(origins))
}
