//! Route enrichment pipeline tests against the in-memory registry.

use serde_json::json;
use sitemap_application::{ApplicationError, RouteService, ServiceConfig};
use sitemap_domain::{RouteFilter, RouteId, RouteMetadata};
use sitemap_testing::{create_test_routes, MockRouteApi, RouteApiCall, RouteBuilder};
use std::sync::Arc;
use std::time::Duration;

fn route_id(value: &str) -> RouteId {
    RouteId::parse(value).unwrap()
}

fn service(api: &Arc<MockRouteApi>) -> RouteService<MockRouteApi> {
    RouteService::new(Arc::clone(api), ServiceConfig::default())
}

fn metadata(pairs: &[(&str, serde_json::Value)]) -> RouteMetadata {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}

/// r1 active, r2 inactive upstream but live-active, r3 unknown
fn registry() -> Arc<MockRouteApi> {
    let api = MockRouteApi::with_routes([
        RouteBuilder::new().with_id("r1").with_path("/api/users").build(),
        RouteBuilder::new()
            .with_id("r2")
            .with_path("/api/orders")
            .with_method("POST")
            .inactive()
            .build(),
    ]);
    api.set_status(&route_id("r1"), true);
    api.set_status(&route_id("r2"), true);
    Arc::new(api)
}

#[tokio::test]
async fn test_get_route_reconciles_live_status() {
    let api = registry();
    let service = service(&api);

    let route = service.get_route_by_id(&route_id("r2")).await.unwrap();

    assert!(route.is_active());
    assert_eq!(route.path(), "/api/orders");
    assert!(route.updated_at() > RouteBuilder::new().build().updated_at());
}

#[tokio::test]
async fn test_get_route_keeps_timestamp_when_status_matches() {
    let api = registry();
    let service = service(&api);

    let route = service.get_route_by_id(&route_id("r1")).await.unwrap();

    assert!(route.is_active());
    assert_eq!(route.updated_at(), RouteBuilder::new().build().updated_at());
}

#[tokio::test]
async fn test_get_route_is_idempotent_apart_from_timestamp() {
    let api = registry();
    let service = service(&api);

    let first = service.get_route_by_id(&route_id("r1")).await.unwrap();
    let second = service.get_route_by_id(&route_id("r1")).await.unwrap();
    assert_eq!(first, second);

    let first = service.get_route_by_id(&route_id("r2")).await.unwrap();
    let second = service.get_route_by_id(&route_id("r2")).await.unwrap();
    assert_eq!(first.id(), second.id());
    assert_eq!(first.path(), second.path());
    assert_eq!(first.name(), second.name());
    assert_eq!(first.description(), second.description());
    assert_eq!(first.method(), second.method());
    assert_eq!(first.tags(), second.tags());
    assert_eq!(first.metadata(), second.metadata());
    assert_eq!(first.is_active(), second.is_active());
    assert_eq!(first.created_at(), second.created_at());

    let stored = RouteBuilder::new().build().updated_at();
    assert!(first.updated_at() > stored);
    assert!(second.updated_at() > stored);
}

#[tokio::test]
async fn test_get_route_not_found() {
    let api = registry();
    let service = service(&api);

    let result = service.get_route_by_id(&route_id("r3")).await;

    assert!(matches!(result, Err(ApplicationError::NotFound(_))));
    assert!(!api
        .calls()
        .iter()
        .any(|call| matches!(call, RouteApiCall::EnrichMetadata(_))));
}

#[tokio::test]
async fn test_missing_route_is_not_found_even_when_status_check_fails() {
    let api = registry();
    api.fail_status_check(&route_id("r3"));
    let service = service(&api);

    let result = service.get_route_by_id(&route_id("r3")).await;

    assert!(matches!(result, Err(ApplicationError::NotFound(_))));
}

#[tokio::test]
async fn test_status_failure_fails_single_lookup() {
    let api = registry();
    api.fail_status_check(&route_id("r1"));
    let service = service(&api);

    let result = service.get_route_by_id(&route_id("r1")).await;

    assert!(matches!(result, Err(ApplicationError::UpstreamFailure { .. })));
}

#[tokio::test]
async fn test_base_lookup_failure_is_fatal() {
    let api = registry();
    api.fail_lookup(&route_id("r1"));
    let service = service(&api);

    let error = service.get_route_by_id(&route_id("r1")).await.unwrap_err();

    assert_eq!(error.http_status(), 502);
}

#[tokio::test]
async fn test_metadata_is_merged_over_existing_keys() {
    let api = Arc::new(MockRouteApi::with_routes([RouteBuilder::new()
        .with_id("r1")
        .with_metadata("owner", json!("team-a"))
        .with_metadata("tier", json!(1))
        .build()]));
    api.set_metadata(
        &route_id("r1"),
        metadata(&[("tier", json!(2)), ("sla", json!("99.9"))]),
    );
    let service = service(&api);

    let route = service.get_route_by_id(&route_id("r1")).await.unwrap();

    let keys: Vec<_> = route.metadata().keys().cloned().collect();
    assert_eq!(keys, vec!["owner", "tier", "sla"]);
    assert_eq!(route.metadata()["tier"], json!(2));
}

#[tokio::test]
async fn test_metadata_failure_is_absorbed() {
    let api = registry();
    api.fail_metadata(&route_id("r2"));
    let service = service(&api);

    let route = service.get_route_by_id(&route_id("r2")).await.unwrap();

    assert!(route.is_active());
    assert!(route.metadata().is_empty());
}

#[tokio::test]
async fn test_metadata_enrichment_sees_reconciled_route() {
    let api = registry();
    api.set_metadata(&route_id("r2"), metadata(&[("source", json!("catalog"))]));
    let service = service(&api);

    let route = service.get_route_by_id(&route_id("r2")).await.unwrap();

    assert!(route.is_active());
    assert_eq!(route.metadata()["source"], json!("catalog"));
}

#[tokio::test(start_paused = true)]
async fn test_base_and_status_lookups_run_concurrently() {
    let api = registry();
    api.delay_lookup(&route_id("r1"), Duration::from_millis(200));
    api.delay_status_check(&route_id("r1"), Duration::from_millis(200));
    let service = service(&api);

    let started = tokio::time::Instant::now();
    service.get_route_by_id(&route_id("r1")).await.unwrap();

    assert!(started.elapsed() < Duration::from_millis(400));
}

#[tokio::test]
async fn test_get_all_routes_reconciles_each_route() {
    let api = registry();
    let service = service(&api);

    let routes = service.get_all_routes(&RouteFilter::default()).await.unwrap();

    let ids: Vec<_> = routes.iter().map(|r| r.id().as_str()).collect();
    assert_eq!(ids, vec!["r1", "r2"]);
    assert!(routes.iter().all(|r| r.is_active()));
    assert_eq!(api.status_checks_for(&route_id("r1")), 1);
    assert_eq!(api.status_checks_for(&route_id("r2")), 1);
}

#[tokio::test]
async fn test_get_all_routes_does_not_enrich_metadata() {
    let api = registry();
    api.set_metadata(&route_id("r1"), metadata(&[("source", json!("catalog"))]));
    let service = service(&api);

    let routes = service.get_all_routes(&RouteFilter::default()).await.unwrap();

    assert!(routes[0].metadata().is_empty());
    assert!(!api
        .calls()
        .iter()
        .any(|call| matches!(call, RouteApiCall::EnrichMetadata(_))));
}

#[tokio::test]
async fn test_get_all_routes_passes_filter_through() {
    let api = registry();
    let service = service(&api);
    let filter = RouteFilter::paginated(2, 5)
        .unwrap()
        .with_method("GET")
        .with_tags(["public"]);

    service.get_all_routes(&filter).await.unwrap();

    assert_eq!(api.calls()[0], RouteApiCall::FindAll(filter));
}

#[tokio::test]
async fn test_get_all_routes_empty_page() {
    let api = Arc::new(MockRouteApi::new());
    let service = service(&api);

    let routes = service.get_all_routes(&RouteFilter::default()).await.unwrap();

    assert!(routes.is_empty());
    assert_eq!(api.calls().len(), 1);
}

#[tokio::test]
async fn test_single_status_failure_fails_whole_page() {
    let api = registry();
    api.fail_status_check(&route_id("r2"));
    let service = service(&api);

    let result = service.get_all_routes(&RouteFilter::default()).await;

    assert!(matches!(result, Err(ApplicationError::UpstreamFailure { .. })));
    assert_eq!(api.status_checks_for(&route_id("r1")), 1);
}

#[tokio::test]
async fn test_listing_failure_propagates() {
    let api = registry();
    api.fail_listing();
    let service = service(&api);

    let result = service.get_all_routes(&RouteFilter::default()).await;

    assert!(matches!(result, Err(ApplicationError::UpstreamFailure { .. })));
}

#[tokio::test(start_paused = true)]
async fn test_get_all_routes_preserves_order_when_checks_finish_out_of_order() {
    let routes = create_test_routes(5);
    let api = Arc::new(MockRouteApi::with_routes(routes.clone()));
    for (i, route) in routes.iter().enumerate() {
        api.delay_status_check(route.id(), Duration::from_millis(100 * (5 - i as u64)));
    }
    let service = service(&api);

    let enriched = service.get_all_routes(&RouteFilter::default()).await.unwrap();

    let expected: Vec<_> = routes.iter().map(|r| r.id().clone()).collect();
    let actual: Vec<_> = enriched.iter().map(|r| r.id().clone()).collect();
    assert_eq!(actual, expected);
    assert_eq!(api.max_concurrent_status_checks(), 5);
}

#[tokio::test(start_paused = true)]
async fn test_status_check_concurrency_cap() {
    let routes = create_test_routes(6);
    let api = Arc::new(MockRouteApi::with_routes(routes.clone()));
    for route in &routes {
        api.delay_status_check(route.id(), Duration::from_millis(50));
    }
    let service = RouteService::new(
        Arc::clone(&api),
        ServiceConfig::default().with_status_check_limit(2),
    );

    let enriched = service.get_all_routes(&RouteFilter::default()).await.unwrap();

    assert_eq!(enriched.len(), 6);
    assert_eq!(api.max_concurrent_status_checks(), 2);
}

#[tokio::test]
async fn test_service_over_trait_object() {
    let api: Arc<dyn sitemap_application::RouteApiPort> = registry();
    let service = RouteService::new(api, ServiceConfig::default());

    let route = service.get_route_by_id(&route_id("r1")).await.unwrap();

    assert_eq!(route.id().as_str(), "r1");
}
