//! Request logging middleware.
//!
//! Each request runs inside an `http_request` span carrying its request id,
//! method and matched route template, so handler and upstream events are
//! correlated without repeating those fields.

use super::request_id::RequestId;
use axum::{
    body::Body,
    extract::MatchedPath,
    http::{Request, Response},
    middleware::Next,
};
use std::time::Instant;
use tracing::{debug, info, info_span, warn, Instrument};

/// Wrap the request in a span and record its outcome
pub async fn logging_middleware(req: Request<Body>, next: Next) -> Response<Body> {
    let start = Instant::now();
    // Unmatched requests fall back to the raw path
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());
    let request_id = req
        .extensions()
        .get::<RequestId>()
        .map(|id| id.as_str().to_owned())
        .unwrap_or_else(|| "unknown".to_owned());

    let span = info_span!(
        "http_request",
        request_id = %request_id,
        method = %req.method(),
        route = %route,
    );

    async move {
        debug!(uri = %req.uri(), "Incoming request");

        let response = next.run(req).await;
        let status = response.status().as_u16();
        let duration_ms = start.elapsed().as_millis() as u64;

        if response.status().is_server_error() {
            warn!(status, duration_ms, "Request failed");
        } else if response.status().is_client_error() {
            info!(status, duration_ms, "Request rejected");
        } else {
            info!(status, duration_ms, "Request completed");
        }

        response
    }
    .instrument(span)
    .await
}
