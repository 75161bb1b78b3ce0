//! Mock implementations of the outbound ports.
//!
//! Every mock is in-memory, records the calls it receives, and can be told
//! to fail or to stall individual lookups.

use async_trait::async_trait;
use indexmap::IndexMap;
use parking_lot::RwLock;
use sitemap_application::{
    ApplicationError, ApplicationResult, RouteApiPort, TodoApiPort, UserApiPort,
};
use sitemap_domain::{Route, RouteFilter, RouteId, RouteMetadata, Todo, TodoId, User, UserId};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

const MOCK_SERVICE: &str = "mock-route-api";

/// Call received by [`MockRouteApi`]
#[derive(Debug, Clone, PartialEq)]
pub enum RouteApiCall {
    FindById(RouteId),
    FindAll(RouteFilter),
    EnrichMetadata(RouteId),
    IsActive(RouteId),
}

/// In-memory route registry
#[derive(Default)]
pub struct MockRouteApi {
    routes: RwLock<IndexMap<RouteId, Route>>,
    statuses: RwLock<HashMap<RouteId, bool>>,
    metadata: RwLock<HashMap<RouteId, RouteMetadata>>,
    failing_lookups: RwLock<HashSet<RouteId>>,
    failing_status_checks: RwLock<HashSet<RouteId>>,
    failing_metadata: RwLock<HashSet<RouteId>>,
    failing_listing: RwLock<bool>,
    lookup_delays: RwLock<HashMap<RouteId, Duration>>,
    status_delays: RwLock<HashMap<RouteId, Duration>>,
    calls: RwLock<Vec<RouteApiCall>>,
    status_checks_in_flight: AtomicUsize,
    max_status_checks_in_flight: AtomicUsize,
}

impl MockRouteApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry seeded with `routes`, listed in the given order
    pub fn with_routes(routes: impl IntoIterator<Item = Route>) -> Self {
        let mock = Self::new();
        for route in routes {
            mock.add_route(route);
        }
        mock
    }

    pub fn add_route(&self, route: Route) {
        self.routes.write().insert(route.id().clone(), route);
    }

    /// Live status reported for `id`; defaults to the stored route's flag
    pub fn set_status(&self, id: &RouteId, active: bool) {
        self.statuses.write().insert(id.clone(), active);
    }

    /// Metadata returned by enrichment for `id`; without it enrichment yields nothing
    pub fn set_metadata(&self, id: &RouteId, metadata: RouteMetadata) {
        self.metadata.write().insert(id.clone(), metadata);
    }

    pub fn fail_lookup(&self, id: &RouteId) {
        self.failing_lookups.write().insert(id.clone());
    }

    pub fn fail_status_check(&self, id: &RouteId) {
        self.failing_status_checks.write().insert(id.clone());
    }

    pub fn fail_metadata(&self, id: &RouteId) {
        self.failing_metadata.write().insert(id.clone());
    }

    pub fn fail_listing(&self) {
        *self.failing_listing.write() = true;
    }

    pub fn delay_lookup(&self, id: &RouteId, delay: Duration) {
        self.lookup_delays.write().insert(id.clone(), delay);
    }

    pub fn delay_status_check(&self, id: &RouteId, delay: Duration) {
        self.status_delays.write().insert(id.clone(), delay);
    }

    pub fn calls(&self) -> Vec<RouteApiCall> {
        self.calls.read().clone()
    }

    /// Number of status checks received for `id`
    pub fn status_checks_for(&self, id: &RouteId) -> usize {
        self.calls
            .read()
            .iter()
            .filter(|call| matches!(call, RouteApiCall::IsActive(seen) if seen == id))
            .count()
    }

    /// Highest number of status checks observed running at once
    pub fn max_concurrent_status_checks(&self) -> usize {
        self.max_status_checks_in_flight.load(Ordering::SeqCst)
    }

    fn record(&self, call: RouteApiCall) {
        self.calls.write().push(call);
    }

    fn simulated_failure(operation: &str, id: &RouteId) -> ApplicationError {
        ApplicationError::upstream(MOCK_SERVICE, format!("simulated {} failure for {}", operation, id))
    }
}

struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl RouteApiPort for MockRouteApi {
    async fn find_route_by_id(&self, id: &RouteId) -> ApplicationResult<Option<Route>> {
        self.record(RouteApiCall::FindById(id.clone()));

        let delay = self.lookup_delays.read().get(id).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing_lookups.read().contains(id) {
            return Err(Self::simulated_failure("lookup", id));
        }
        Ok(self.routes.read().get(id).cloned())
    }

    async fn find_all_routes(&self, filter: &RouteFilter) -> ApplicationResult<Vec<Route>> {
        self.record(RouteApiCall::FindAll(filter.clone()));

        if *self.failing_listing.read() {
            return Err(ApplicationError::upstream(MOCK_SERVICE, "simulated listing failure"));
        }
        Ok(self.routes.read().values().cloned().collect())
    }

    async fn enrich_route_metadata(&self, route: &Route) -> ApplicationResult<Option<Route>> {
        self.record(RouteApiCall::EnrichMetadata(route.id().clone()));

        if self.failing_metadata.read().contains(route.id()) {
            return Err(Self::simulated_failure("metadata", route.id()));
        }
        let extra = self.metadata.read().get(route.id()).cloned();
        Ok(extra.map(|extra| route.with_merged_metadata(extra)))
    }

    async fn is_route_active(&self, id: &RouteId) -> ApplicationResult<bool> {
        self.record(RouteApiCall::IsActive(id.clone()));

        let running = self.status_checks_in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        let _guard = InFlight(&self.status_checks_in_flight);
        self.max_status_checks_in_flight
            .fetch_max(running, Ordering::SeqCst);

        let delay = self.status_delays.read().get(id).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing_status_checks.read().contains(id) {
            return Err(Self::simulated_failure("status", id));
        }

        let configured = self.statuses.read().get(id).copied();
        Ok(configured
            .or_else(|| self.routes.read().get(id).map(Route::is_active))
            .unwrap_or(false))
    }
}

/// In-memory user directory
#[derive(Default)]
pub struct MockUserApi {
    users: RwLock<HashMap<UserId, User>>,
    failing: RwLock<bool>,
}

impl MockUserApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let mock = Self::new();
        for user in users {
            mock.users.write().insert(user.id().clone(), user);
        }
        mock
    }

    pub fn fail_all(&self) {
        *self.failing.write() = true;
    }
}

#[async_trait]
impl UserApiPort for MockUserApi {
    async fn find_user_by_id(&self, id: &UserId) -> ApplicationResult<Option<User>> {
        if *self.failing.read() {
            return Err(ApplicationError::upstream("mock-user-api", "simulated failure"));
        }
        Ok(self.users.read().get(id).cloned())
    }
}

/// In-memory todo directory
#[derive(Default)]
pub struct MockTodoApi {
    todos: RwLock<Vec<Todo>>,
    failing: RwLock<bool>,
}

impl MockTodoApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_todos(todos: impl IntoIterator<Item = Todo>) -> Self {
        let mock = Self::new();
        mock.todos.write().extend(todos);
        mock
    }

    pub fn fail_all(&self) {
        *self.failing.write() = true;
    }
}

#[async_trait]
impl TodoApiPort for MockTodoApi {
    async fn find_all_todos(&self) -> ApplicationResult<Vec<Todo>> {
        if *self.failing.read() {
            return Err(ApplicationError::upstream("mock-todo-api", "simulated failure"));
        }
        Ok(self.todos.read().clone())
    }

    async fn find_todo_by_id(&self, id: &TodoId) -> ApplicationResult<Option<Todo>> {
        if *self.failing.read() {
            return Err(ApplicationError::upstream("mock-todo-api", "simulated failure"));
        }
        Ok(self.todos.read().iter().find(|todo| &todo.id == id).cloned())
    }
}
