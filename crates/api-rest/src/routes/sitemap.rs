//! Sitemap endpoints.
//!
//! Routes are republished from the upstream registry. A single route is
//! fully enriched; listings are reconciled with the live status of every
//! route in the page.

use crate::{
    error::{ApiError, ApiResult},
    extractors::{route_filter::split_tags, FilterQuery, PageQuery, RouteFilterParams, RouteListQuery},
    responses::ApiResponse,
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sitemap_domain::{Route, RouteFilter, RouteId, RouteMetadata};
use tracing::debug;
use utoipa::{IntoParams, ToSchema};

/// Route as served to clients
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteResponse {
    pub id: String,
    pub path: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub method: String,
    pub tags: Vec<String>,
    #[schema(value_type = Object)]
    pub metadata: RouteMetadata,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Route> for RouteResponse {
    fn from(route: Route) -> Self {
        Self {
            id: route.id().to_string(),
            path: route.path().to_string(),
            name: route.name().to_string(),
            description: route.description().map(str::to_string),
            method: route.method().to_string(),
            tags: route.tags().iter().cloned().collect(),
            metadata: route.metadata().clone(),
            is_active: route.is_active(),
            created_at: route.created_at().to_rfc3339(),
            updated_at: route.updated_at().to_rfc3339(),
        }
    }
}

/// Query for the by-tags listing
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TagsQuery {
    /// Comma-separated tags (required)
    pub tags: Option<String>,
}

/// Sitemap routes, mounted under `/api/sitemap`
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/routes", get(list_routes))
        .route("/routes/active", get(list_active_routes))
        .route("/routes/method/:method", get(list_routes_by_method))
        .route("/routes/tags", get(list_routes_by_tags))
        .route("/routes/:id", get(get_route))
}

async fn enrich_page(state: &AppState, filter: RouteFilter) -> ApiResult<Vec<RouteResponse>> {
    let routes = state.route_service.get_all_routes(&filter).await?;
    debug!(count = routes.len(), page = filter.page(), "Serving route page");
    Ok(routes.into_iter().map(Into::into).collect())
}

/// Get route by ID
///
/// Base record and live status are fetched concurrently, then decorated
/// with upstream metadata when available.
#[utoipa::path(
    get,
    path = "/api/sitemap/routes/{id}",
    tag = "sitemap",
    params(
        ("id" = String, Path, description = "Route ID"),
    ),
    responses(
        (status = 200, description = "Enriched route", body = RouteResponse),
        (status = 404, description = "Route not found"),
        (status = 502, description = "Upstream failure"),
    )
)]
pub async fn get_route(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<RouteResponse>>> {
    let id = RouteId::parse(id)?;
    let route = state.route_service.get_route_by_id(&id).await?;

    Ok(Json(ApiResponse::success(route.into())))
}

/// List routes
///
/// Every predicate is forwarded to the registry; each route in the page is
/// reconciled with its live status.
#[utoipa::path(
    get,
    path = "/api/sitemap/routes",
    tag = "sitemap",
    params(RouteListQuery),
    responses(
        (status = 200, description = "Reconciled routes, in registry order", body = [RouteResponse]),
        (status = 400, description = "Invalid filter"),
        (status = 502, description = "Upstream failure"),
    )
)]
pub async fn list_routes(
    State(state): State<AppState>,
    FilterQuery(filter): FilterQuery,
) -> ApiResult<Json<ApiResponse<Vec<RouteResponse>>>> {
    Ok(Json(ApiResponse::success(enrich_page(&state, filter).await?)))
}

/// List routes the registry marks active
#[utoipa::path(
    get,
    path = "/api/sitemap/routes/active",
    tag = "sitemap",
    params(RouteFilterParams),
    responses(
        (status = 200, description = "Reconciled routes", body = [RouteResponse]),
        (status = 400, description = "Invalid pagination"),
        (status = 502, description = "Upstream failure"),
    )
)]
pub async fn list_active_routes(
    State(state): State<AppState>,
    PageQuery(filter): PageQuery,
) -> ApiResult<Json<ApiResponse<Vec<RouteResponse>>>> {
    let filter = filter.with_active_status(true);
    Ok(Json(ApiResponse::success(enrich_page(&state, filter).await?)))
}

/// List routes by HTTP method
///
/// The method is matched upper-cased.
#[utoipa::path(
    get,
    path = "/api/sitemap/routes/method/{method}",
    tag = "sitemap",
    params(
        ("method" = String, Path, description = "HTTP method"),
        RouteFilterParams,
    ),
    responses(
        (status = 200, description = "Reconciled routes", body = [RouteResponse]),
        (status = 400, description = "Invalid pagination"),
        (status = 502, description = "Upstream failure"),
    )
)]
pub async fn list_routes_by_method(
    State(state): State<AppState>,
    Path(method): Path<String>,
    PageQuery(filter): PageQuery,
) -> ApiResult<Json<ApiResponse<Vec<RouteResponse>>>> {
    let filter = filter.with_method(method.trim().to_uppercase());
    Ok(Json(ApiResponse::success(enrich_page(&state, filter).await?)))
}

/// List routes carrying the given tags
#[utoipa::path(
    get,
    path = "/api/sitemap/routes/tags",
    tag = "sitemap",
    params(TagsQuery, RouteFilterParams),
    responses(
        (status = 200, description = "Reconciled routes", body = [RouteResponse]),
        (status = 400, description = "Missing tags or invalid pagination"),
        (status = 502, description = "Upstream failure"),
    )
)]
pub async fn list_routes_by_tags(
    State(state): State<AppState>,
    Query(query): Query<TagsQuery>,
    PageQuery(filter): PageQuery,
) -> ApiResult<Json<ApiResponse<Vec<RouteResponse>>>> {
    let tags = split_tags(query.tags.as_deref());
    if tags.is_empty() {
        return Err(ApiError::BadRequest(
            "Query parameter 'tags' is required".to_string(),
        ));
    }

    let filter = filter.with_tags(tags);
    Ok(Json(ApiResponse::success(enrich_page(&state, filter).await?)))
}
