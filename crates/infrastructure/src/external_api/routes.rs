//! Route registry adapter
//!
//! Endpoints, relative to the registry base URL:
//! - `GET /routes/{id}`
//! - `GET /routes?method=&tags=&active=&path=&page=&size=`
//! - `GET /routes/{id}/status`
//! - `GET /routes/{id}/metadata`

use super::{ExternalApiResult, UpstreamClient};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use sitemap_application::{ApplicationResult, RouteApiPort};
use sitemap_domain::{NewRoute, Route, RouteFilter, RouteId, RouteMetadata};
use tracing::{debug, instrument};

const SERVICE: &str = "route-registry";

/// Route as published by the registry
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalRouteResponse {
    pub id: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub metadata: Option<RouteMetadata>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Live status of a route
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalRouteStatusResponse {
    #[serde(default)]
    pub id: Option<String>,
    pub active: bool,
    #[serde(default)]
    pub last_checked: Option<String>,
}

impl ExternalRouteResponse {
    /// Map onto a validated [`Route`], defaulting absent collections to empty
    /// and absent timestamps to `now`
    pub fn into_route(self, now: DateTime<Utc>) -> Result<Route, String> {
        let id = RouteId::parse(self.id).map_err(|e| e.to_string())?;
        let created_at = parse_timestamp("createdAt", self.created_at.as_deref())?.unwrap_or(now);
        let updated_at = parse_timestamp("updatedAt", self.updated_at.as_deref())?.unwrap_or(now);

        Route::new(NewRoute {
            id,
            path: self.path,
            name: self.name,
            description: self.description,
            method: self.method,
            tags: self.tags.unwrap_or_default().into_iter().collect(),
            metadata: self.metadata.unwrap_or_default(),
            active: self.active,
            created_at,
            updated_at,
        })
        .map_err(|e| e.to_string())
    }
}

/// Accepts RFC 3339 or a zone-less `YYYY-MM-DDTHH:MM:SS[.fff]`, read as UTC
fn parse_timestamp(field: &str, value: Option<&str>) -> Result<Option<DateTime<Utc>>, String> {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(Some(parsed.with_timezone(&Utc)));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| Some(naive.and_utc()))
        .map_err(|e| format!("{} is not a valid timestamp ({}): {}", field, value, e))
}

/// [`RouteApiPort`] over the route registry REST API
#[derive(Clone, Debug)]
pub struct ExternalRouteApiAdapter {
    client: UpstreamClient,
}

impl ExternalRouteApiAdapter {
    pub fn new(http: reqwest::Client, base_url: &str) -> ExternalApiResult<Self> {
        Ok(Self {
            client: UpstreamClient::new(http, base_url, SERVICE)?,
        })
    }

    fn map_route(&self, response: ExternalRouteResponse) -> ExternalApiResult<Route> {
        let id = response.id.clone();
        response.into_route(Utc::now()).map_err(|message| {
            self.client
                .invalid_response(format!("Route '{}' is invalid: {}", id, message))
        })
    }
}

#[async_trait]
impl RouteApiPort for ExternalRouteApiAdapter {
    #[instrument(skip(self), fields(route_id = %id))]
    async fn find_route_by_id(&self, id: &RouteId) -> ApplicationResult<Option<Route>> {
        let url = self.client.endpoint(&["routes", id.as_str()])?;
        let response: Option<ExternalRouteResponse> = self.client.get_optional(url).await?;

        Ok(response.map(|r| self.map_route(r)).transpose()?)
    }

    #[instrument(skip(self, filter), fields(page = filter.page(), size = filter.size()))]
    async fn find_all_routes(&self, filter: &RouteFilter) -> ApplicationResult<Vec<Route>> {
        let mut url = self.client.endpoint(&["routes"])?;
        url.query_pairs_mut().extend_pairs(filter.query_pairs());

        let responses: Option<Vec<ExternalRouteResponse>> = self.client.get_json(url).await?;
        let routes = responses
            .unwrap_or_default()
            .into_iter()
            .map(|r| self.map_route(r))
            .collect::<ExternalApiResult<Vec<_>>>()?;

        debug!(count = routes.len(), "Routes listed");
        Ok(routes)
    }

    #[instrument(skip(self, route), fields(route_id = %route.id()))]
    async fn enrich_route_metadata(&self, route: &Route) -> ApplicationResult<Option<Route>> {
        let url = self
            .client
            .endpoint(&["routes", route.id().as_str(), "metadata"])?;
        let metadata: Option<RouteMetadata> = self.client.get_optional(url).await?;

        match metadata {
            Some(extra) if !extra.is_empty() => {
                debug!(keys = extra.len(), "Merging upstream metadata");
                Ok(Some(route.with_merged_metadata(extra)))
            }
            _ => Ok(None),
        }
    }

    #[instrument(skip(self), fields(route_id = %id))]
    async fn is_route_active(&self, id: &RouteId) -> ApplicationResult<bool> {
        let url = self.client.endpoint(&["routes", id.as_str(), "status"])?;
        let status: Option<ExternalRouteStatusResponse> =
            self.client.get_unless_missing(url).await?;

        match status {
            Some(status) => {
                debug!(
                    reported_id = status.id.as_deref(),
                    active = status.active,
                    last_checked = status.last_checked.as_deref(),
                    "Route status resolved"
                );
                Ok(status.active)
            }
            None => {
                debug!("No status upstream, treating route as inactive");
                Ok(false)
            }
        }
    }
}
