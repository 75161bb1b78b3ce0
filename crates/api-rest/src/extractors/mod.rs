//! Custom Axum extractors.
//!
//! Query-string extractors that turn listing parameters into a validated
//! [`sitemap_domain::RouteFilter`].

pub mod route_filter;

pub use route_filter::{FilterQuery, PageQuery, RouteFilterParams, RouteListQuery};
