//! Route Service
//!
//! Enrichment pipeline for routes republished from the upstream registry.
//!
//! A single route is assembled from two concurrent lookups (the base record
//! and its live active status), reconciled, then optionally decorated with
//! upstream metadata. A page of routes fans out one status check per route
//! and fails as a whole if any check fails.

use super::{task_failure, ServiceConfig};
use crate::{ApplicationError, ApplicationResult};
use async_trait::async_trait;
use sitemap_domain::{Route, RouteFilter, RouteId};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, instrument, warn, Instrument, Span};

/// Outbound port onto the route registry
#[async_trait]
pub trait RouteApiPort: Send + Sync {
    /// Base route record; `None` when the registry does not know the id
    async fn find_route_by_id(&self, id: &RouteId) -> ApplicationResult<Option<Route>>;

    /// One page of routes matching the filter, in registry order
    async fn find_all_routes(&self, filter: &RouteFilter) -> ApplicationResult<Vec<Route>>;

    /// Route decorated with upstream metadata; `None` when none is available
    async fn enrich_route_metadata(&self, route: &Route) -> ApplicationResult<Option<Route>>;

    /// Live active status of the route
    async fn is_route_active(&self, id: &RouteId) -> ApplicationResult<bool>;
}

/// Route service implementation
pub struct RouteService<P>
where
    P: RouteApiPort + ?Sized + 'static,
{
    port: Arc<P>,
    config: ServiceConfig,
}

impl<P> RouteService<P>
where
    P: RouteApiPort + ?Sized + 'static,
{
    pub fn new(port: Arc<P>, config: ServiceConfig) -> Self {
        Self { port, config }
    }

    /// Fetch a single fully enriched route.
    ///
    /// The base lookup and the status check run concurrently. A missing base
    /// record always yields `NotFound`, whatever happened to the status
    /// check. Any other failure of either lookup fails the call. Metadata
    /// enrichment failures are logged and the reconciled route is returned.
    #[instrument(skip(self), fields(route_id = %id))]
    pub async fn get_route_by_id(&self, id: &RouteId) -> ApplicationResult<Route> {
        let base = {
            let port = Arc::clone(&self.port);
            let id = id.clone();
            tokio::spawn(async move { port.find_route_by_id(&id).await }.in_current_span())
        };
        let status = {
            let port = Arc::clone(&self.port);
            let id = id.clone();
            tokio::spawn(async move { port.is_route_active(&id).await }.in_current_span())
        };

        let (base, status) = tokio::join!(base, status);

        let route = match base.map_err(task_failure)?? {
            Some(route) => route,
            None => {
                debug!("Route not found upstream");
                return Err(ApplicationError::NotFound(format!("Route not found: {}", id)));
            }
        };
        let active = status.map_err(task_failure)??;

        let reconciled = route.reconcile_active_status(active);

        match self.port.enrich_route_metadata(&reconciled).await {
            Ok(Some(enriched)) => {
                debug!(metadata_keys = enriched.metadata().len(), "Route metadata enriched");
                Ok(enriched)
            }
            Ok(None) => Ok(reconciled),
            Err(err) => {
                warn!(error = %err, "Metadata enrichment failed, returning route without it");
                Ok(reconciled)
            }
        }
    }

    /// Fetch a page of routes, each reconciled with its live status.
    ///
    /// Output order matches the registry listing. If any status check fails
    /// the whole page fails, after every outstanding check has finished.
    #[instrument(skip(self, filter), fields(page = filter.page(), size = filter.size()))]
    pub async fn get_all_routes(&self, filter: &RouteFilter) -> ApplicationResult<Vec<Route>> {
        let routes = self.port.find_all_routes(filter).await?;
        let total = routes.len();
        if total == 0 {
            return Ok(routes);
        }

        let limit = self
            .config
            .max_concurrent_status_checks
            .unwrap_or(total)
            .clamp(1, total);
        let permits = Arc::new(Semaphore::new(limit));

        let mut checks = JoinSet::new();
        for (position, route) in routes.into_iter().enumerate() {
            let port = Arc::clone(&self.port);
            let permits = Arc::clone(&permits);
            let span = Span::current();
            checks.spawn(
                async move {
                    let _permit = permits.acquire_owned().await.map_err(|_| {
                        ApplicationError::Internal("Status check limiter closed".to_string())
                    })?;
                    let active = port.is_route_active(route.id()).await.map_err(|err| {
                        warn!(route_id = %route.id(), error = %err, "Status check failed");
                        err
                    })?;
                    Ok::<_, ApplicationError>((position, route.reconcile_active_status(active)))
                }
                .instrument(span),
            );
        }

        let mut slots: Vec<Option<Route>> = vec![None; total];
        let mut failure = None;
        while let Some(joined) = checks.join_next().await {
            match joined.map_err(task_failure).and_then(|outcome| outcome) {
                Ok((position, route)) => slots[position] = Some(route),
                Err(err) => {
                    if failure.is_none() {
                        failure = Some(err);
                    }
                }
            }
        }

        if let Some(err) = failure {
            return Err(err);
        }

        let enriched = slots
            .into_iter()
            .map(|slot| {
                slot.ok_or_else(|| ApplicationError::Internal("Status check result missing".to_string()))
            })
            .collect::<ApplicationResult<Vec<_>>>()?;

        info!(count = enriched.len(), concurrency = limit, "Routes enriched");

        Ok(enriched)
    }
}
