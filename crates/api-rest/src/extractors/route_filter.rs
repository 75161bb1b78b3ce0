//! Route listing extractors.

use crate::error::ApiError;
use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;
use sitemap_domain::{RouteFilter, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
use utoipa::IntoParams;

/// Query parameters for route listings
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RouteListQuery {
    /// HTTP method to match
    pub method: Option<String>,

    /// Comma-separated tags
    pub tags: Option<String>,

    /// Registry-side active flag
    pub active: Option<bool>,

    /// Substring the route path must contain
    pub path: Option<String>,

    /// Zero-based page index (default 0)
    pub page: Option<i64>,

    /// Page size (default 20)
    pub size: Option<i64>,
}

impl RouteListQuery {
    /// Validated filter carrying every predicate given
    pub fn into_filter(self) -> Result<RouteFilter, ApiError> {
        let mut filter = paginated(self.page, self.size)?;
        if let Some(method) = self.method.filter(|m| !m.trim().is_empty()) {
            filter = filter.with_method(method);
        }
        let tags = split_tags(self.tags.as_deref());
        if !tags.is_empty() {
            filter = filter.with_tags(tags);
        }
        if let Some(active) = self.active {
            filter = filter.with_active_status(active);
        }
        if let Some(path) = self.path.filter(|p| !p.trim().is_empty()) {
            filter = filter.with_path_contains(path);
        }
        Ok(filter)
    }
}

/// Paging-only query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RouteFilterParams {
    /// Zero-based page index (default 0)
    pub page: Option<i64>,

    /// Page size (default 20)
    pub size: Option<i64>,
}

/// Split a comma-separated tag list, dropping blanks
pub fn split_tags(raw: Option<&str>) -> Vec<String> {
    raw.map(|raw| {
        raw.split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

fn paginated(page: Option<i64>, size: Option<i64>) -> Result<RouteFilter, ApiError> {
    let page = page.unwrap_or(i64::from(DEFAULT_PAGE));
    let size = size.unwrap_or(i64::from(DEFAULT_PAGE_SIZE));
    Ok(RouteFilter::paginated(page, size)?)
}

/// Full route filter taken from the query string
#[derive(Debug, Clone)]
pub struct FilterQuery(pub RouteFilter);

#[async_trait]
impl<S> FromRequestParts<S> for FilterQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<RouteListQuery>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::BadRequest(format!("Invalid query parameters: {}", e)))?;

        Ok(Self(query.into_filter()?))
    }
}

/// Predicate-free filter carrying only `page` and `size`
#[derive(Debug, Clone)]
pub struct PageQuery(pub RouteFilter);

#[async_trait]
impl<S> FromRequestParts<S> for PageQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<RouteFilterParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::BadRequest(format!("Invalid pagination parameters: {}", e)))?;

        Ok(Self(paginated(query.page, query.size)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let filter = RouteListQuery::default().into_filter().unwrap();
        assert_eq!(filter, RouteFilter::default());
    }

    #[test]
    fn test_full_query() {
        let filter = RouteListQuery {
            method: Some("GET".to_string()),
            tags: Some("api, public,,".to_string()),
            active: Some(true),
            path: Some("/users".to_string()),
            page: Some(2),
            size: Some(5),
        }
        .into_filter()
        .unwrap();

        assert_eq!(filter.method(), Some("GET"));
        assert_eq!(filter.tags(), ["api".to_string(), "public".to_string()]);
        assert_eq!(filter.active(), Some(true));
        assert_eq!(filter.path_contains(), Some("/users"));
        assert_eq!((filter.page(), filter.size()), (2, 5));
    }

    #[test]
    fn test_invalid_pagination_is_validation_error() {
        let err = RouteListQuery {
            size: Some(0),
            ..RouteListQuery::default()
        }
        .into_filter()
        .unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_split_tags() {
        assert!(split_tags(None).is_empty());
        assert!(split_tags(Some(" , ")).is_empty());
        assert_eq!(split_tags(Some("a,b")), vec!["a", "b"]);
    }
}
