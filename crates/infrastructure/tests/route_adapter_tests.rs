//! Route registry adapter tests against a stub HTTP server.

use serde_json::json;
use sitemap_application::{ApplicationError, RouteApiPort};
use sitemap_common::UpstreamConfig;
use sitemap_domain::{RouteFilter, RouteId};
use sitemap_infrastructure::{build_http_client, ExternalRouteApiAdapter};
use sitemap_testing::RouteBuilder;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn adapter(server: &MockServer) -> ExternalRouteApiAdapter {
    let http = build_http_client(&UpstreamConfig::default()).unwrap();
    ExternalRouteApiAdapter::new(http, &server.uri()).unwrap()
}

fn route_json(id: &str, active: bool) -> serde_json::Value {
    json!({
        "id": id,
        "path": format!("/api/{}", id),
        "name": format!("Route {}", id),
        "description": "Example route",
        "method": "GET",
        "tags": ["api", "public"],
        "metadata": {"owner": "team-a"},
        "active": active,
        "createdAt": "2024-01-01T10:00:00",
        "updatedAt": "2024-01-01T10:00:00"
    })
}

fn route_id(value: &str) -> RouteId {
    RouteId::parse(value).unwrap()
}

#[tokio::test]
async fn test_find_route_by_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/routes/r1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(route_json("r1", false)))
        .mount(&server)
        .await;

    let route = adapter(&server)
        .find_route_by_id(&route_id("r1"))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(route.path(), "/api/r1");
    assert_eq!(route.description(), Some("Example route"));
    assert!(!route.is_active());
    assert_eq!(route.metadata()["owner"], json!("team-a"));
}

#[tokio::test]
async fn test_find_route_by_id_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/routes/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let route = adapter(&server)
        .find_route_by_id(&route_id("missing"))
        .await
        .unwrap();

    assert!(route.is_none());
}

#[tokio::test]
async fn test_find_route_by_id_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/routes/r1"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let result = adapter(&server).find_route_by_id(&route_id("r1")).await;

    assert!(matches!(result, Err(ApplicationError::UpstreamFailure { .. })));
}

#[tokio::test]
async fn test_find_route_by_id_rejects_invalid_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/routes/r1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "r1", "path": "", "name": "Broken", "method": "GET"
        })))
        .mount(&server)
        .await;

    let error = adapter(&server)
        .find_route_by_id(&route_id("r1"))
        .await
        .unwrap_err();

    assert_eq!(error.error_code(), "UPSTREAM_FAILURE");
    assert!(error.to_string().contains("path"));
}

#[tokio::test]
async fn test_find_route_by_id_rejects_malformed_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/routes/r1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&server)
        .await;

    let result = adapter(&server).find_route_by_id(&route_id("r1")).await;

    assert!(matches!(result, Err(ApplicationError::UpstreamFailure { .. })));
}

#[tokio::test]
async fn test_find_all_routes_sends_filter_as_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/routes"))
        .and(query_param("method", "GET"))
        .and(query_param("tags", "api,public"))
        .and(query_param("active", "true"))
        .and(query_param("page", "1"))
        .and(query_param("size", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([route_json("r1", true), route_json("r2", false)])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let filter = RouteFilter::paginated(1, 2)
        .unwrap()
        .with_method("GET")
        .with_tags(["api", "public"])
        .with_active_status(true);
    let routes = adapter(&server).find_all_routes(&filter).await.unwrap();

    let ids: Vec<_> = routes.iter().map(|r| r.id().as_str()).collect();
    assert_eq!(ids, vec!["r1", "r2"]);
}

#[tokio::test]
async fn test_find_all_routes_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/routes"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = adapter(&server).find_all_routes(&RouteFilter::default()).await;

    assert!(matches!(result, Err(ApplicationError::UpstreamFailure { .. })));
}

#[tokio::test]
async fn test_is_route_active() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/routes/r1/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "r1", "active": true, "lastChecked": "2024-01-01T10:00:00"
        })))
        .mount(&server)
        .await;

    assert!(adapter(&server).is_route_active(&route_id("r1")).await.unwrap());
}

#[tokio::test]
async fn test_is_route_active_not_found_is_inactive() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/routes/r1/status"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    assert!(!adapter(&server).is_route_active(&route_id("r1")).await.unwrap());
}

#[tokio::test]
async fn test_is_route_active_server_error_is_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/routes/r1/status"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = adapter(&server).is_route_active(&route_id("r1")).await;

    assert!(matches!(result, Err(ApplicationError::UpstreamFailure { .. })));
}

#[tokio::test]
async fn test_is_route_active_null_body_is_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/routes/r1/status"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;

    let result = adapter(&server).is_route_active(&route_id("r1")).await;

    assert!(matches!(result, Err(ApplicationError::UpstreamFailure { .. })));
}

#[tokio::test]
async fn test_is_route_active_empty_body_is_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/routes/r1/status"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let result = adapter(&server).is_route_active(&route_id("r1")).await;

    assert!(matches!(result, Err(ApplicationError::UpstreamFailure { .. })));
}

#[tokio::test]
async fn test_is_route_active_timeout_is_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/routes/r1/status"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": "r1", "active": true}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let http = reqwest::Client::builder()
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();
    let adapter = ExternalRouteApiAdapter::new(http, &server.uri()).unwrap();

    let error = adapter.is_route_active(&route_id("r1")).await.unwrap_err();

    assert!(error.to_string().contains("Timeout"));
}

#[tokio::test]
async fn test_enrich_route_metadata_merges() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/routes/r1/metadata"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"owner": "team-b", "sla": "99.9"})),
        )
        .mount(&server)
        .await;

    let route = RouteBuilder::new()
        .with_id("r1")
        .with_metadata("owner", json!("team-a"))
        .with_metadata("tier", json!(1))
        .build();

    let enriched = adapter(&server)
        .enrich_route_metadata(&route)
        .await
        .unwrap()
        .unwrap();

    let keys: Vec<_> = enriched.metadata().keys().cloned().collect();
    assert_eq!(keys, vec!["owner", "tier", "sla"]);
    assert_eq!(enriched.metadata()["owner"], json!("team-b"));
    assert!(enriched.updated_at() > route.updated_at());
}

#[tokio::test]
async fn test_enrich_route_metadata_nothing_to_add() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/routes/r1/metadata"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/routes/r2/metadata"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let adapter = adapter(&server);
    let r1 = RouteBuilder::new().with_id("r1").build();
    let r2 = RouteBuilder::new().with_id("r2").build();

    assert!(adapter.enrich_route_metadata(&r1).await.unwrap().is_none());
    assert!(adapter.enrich_route_metadata(&r2).await.unwrap().is_none());
}
