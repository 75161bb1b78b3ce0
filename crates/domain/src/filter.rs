//! Route query filters.

use crate::errors::{ValidationError, ValidationResult};
use serde::Serialize;

/// Default page index for route listings
pub const DEFAULT_PAGE: u32 = 0;

/// Default page size for route listings
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Read-only query specification for the route registry.
///
/// Pagination is validated when the filter is built; the `with_*` methods
/// return a new filter and never touch pagination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteFilter {
    method: Option<String>,
    tags: Vec<String>,
    active: Option<bool>,
    path_contains: Option<String>,
    page: u32,
    size: u32,
}

impl RouteFilter {
    /// Filter without predicates for the given page.
    ///
    /// Fails when `page` is negative or `size` is not strictly positive.
    pub fn paginated(page: i64, size: i64) -> ValidationResult<Self> {
        if page < 0 {
            return Err(ValidationError::InvalidPagination(
                "page cannot be negative".to_string(),
            ));
        }
        if size <= 0 {
            return Err(ValidationError::InvalidPagination(
                "size must be positive".to_string(),
            ));
        }
        let page = u32::try_from(page)
            .map_err(|_| ValidationError::InvalidPagination("page is too large".to_string()))?;
        let size = u32::try_from(size)
            .map_err(|_| ValidationError::InvalidPagination("size is too large".to_string()))?;

        Ok(Self {
            method: None,
            tags: Vec::new(),
            active: None,
            path_contains: None,
            page,
            size,
        })
    }

    pub fn with_method(self, method: impl Into<String>) -> Self {
        Self {
            method: Some(method.into()),
            ..self
        }
    }

    pub fn with_tags<I, S>(self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
            ..self
        }
    }

    pub fn with_active_status(self, active: bool) -> Self {
        Self {
            active: Some(active),
            ..self
        }
    }

    pub fn with_path_contains(self, path: impl Into<String>) -> Self {
        Self {
            path_contains: Some(path.into()),
            ..self
        }
    }

    pub fn method(&self) -> Option<&str> {
        self.method.as_deref()
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn active(&self) -> Option<bool> {
        self.active
    }

    pub fn path_contains(&self) -> Option<&str> {
        self.path_contains.as_deref()
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Outbound query parameters, omitting every unset field.
    ///
    /// Tags are sent as a single comma-joined value.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(6);
        if let Some(method) = &self.method {
            pairs.push(("method", method.clone()));
        }
        if !self.tags.is_empty() {
            pairs.push(("tags", self.tags.join(",")));
        }
        if let Some(active) = self.active {
            pairs.push(("active", active.to_string()));
        }
        if let Some(path) = &self.path_contains {
            pairs.push(("path", path.clone()));
        }
        pairs.push(("page", self.page.to_string()));
        pairs.push(("size", self.size.to_string()));
        pairs
    }
}

impl Default for RouteFilter {
    fn default() -> Self {
        Self {
            method: None,
            tags: Vec::new(),
            active: None,
            path_contains: None,
            page: DEFAULT_PAGE,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        let filter = RouteFilter::default();
        assert_eq!(filter.page(), 0);
        assert_eq!(filter.size(), 20);
        assert_eq!(
            filter.query_pairs(),
            vec![("page", "0".to_string()), ("size", "20".to_string())]
        );
    }

    #[test]
    fn test_pagination_validation() {
        assert!(RouteFilter::paginated(-1, 20).is_err());
        assert!(RouteFilter::paginated(0, 0).is_err());
        assert!(RouteFilter::paginated(0, -5).is_err());
        assert!(RouteFilter::paginated(3, 1).is_ok());
    }

    #[test]
    fn test_with_methods_return_new_filter() {
        let base = RouteFilter::paginated(2, 10).unwrap();
        let filtered = base
            .clone()
            .with_method("GET")
            .with_tags(["api", "public"])
            .with_active_status(true)
            .with_path_contains("/api");

        assert_eq!(base.method(), None);
        assert_eq!(filtered.method(), Some("GET"));
        assert_eq!(filtered.page(), 2);
        assert_eq!(filtered.size(), 10);
        assert_eq!(
            filtered.query_pairs(),
            vec![
                ("method", "GET".to_string()),
                ("tags", "api,public".to_string()),
                ("active", "true".to_string()),
                ("path", "/api".to_string()),
                ("page", "2".to_string()),
                ("size", "10".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_tags_are_omitted() {
        let filter = RouteFilter::default().with_tags(Vec::<String>::new());
        assert!(filter.query_pairs().iter().all(|(key, _)| *key != "tags"));
    }
}
