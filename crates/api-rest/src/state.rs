//! Application state and dependency injection.
//!
//! Handlers reach the services through type-erased traits so the router can
//! be assembled over the HTTP adapters in production and over in-memory
//! ports in tests.

use async_trait::async_trait;
use sitemap_application::{
    ApplicationResult, RouteApiPort, RouteService, ServiceConfig, TodoApiPort, TodoService,
    UserApiPort, UserService,
};
use sitemap_common::AppConfig;
use sitemap_domain::{Route, RouteFilter, RouteId, Todo, TodoId, User, UserId};
use sitemap_infrastructure::UpstreamAdapters;
use std::sync::Arc;
use std::time::Instant;

/// Application state shared across all requests
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration
    pub config: Arc<AppConfig>,

    /// Route enrichment service (type-erased)
    pub route_service: Arc<dyn RouteServiceTrait>,

    /// User service (type-erased)
    pub user_service: Arc<dyn UserServiceTrait>,

    /// Todo service (type-erased)
    pub todo_service: Arc<dyn TodoServiceTrait>,

    /// When the state was built, for the health endpoint
    pub started_at: Instant,
}

impl AppState {
    /// Wire the services over the upstream HTTP adapters
    pub fn from_config(config: AppConfig) -> anyhow::Result<Self> {
        let adapters = UpstreamAdapters::from_config(&config.upstream)?;
        let service_config = ServiceConfig {
            max_concurrent_status_checks: config.enrichment.max_concurrent_status_checks,
        };

        let route_service = Arc::new(RouteService::new(
            Arc::new(adapters.routes),
            service_config,
        ));
        let user_service = Arc::new(UserService::new(Arc::new(adapters.users)));
        let todo_service = Arc::new(TodoService::new(Arc::new(adapters.todos)));

        Ok(Self::with_services(
            config,
            route_service,
            user_service,
            todo_service,
        ))
    }

    /// Create application state with custom service implementations
    pub fn with_services(
        config: AppConfig,
        route_service: Arc<dyn RouteServiceTrait>,
        user_service: Arc<dyn UserServiceTrait>,
        todo_service: Arc<dyn TodoServiceTrait>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            route_service,
            user_service,
            todo_service,
            started_at: Instant::now(),
        }
    }
}

/// Route operations exposed to handlers
#[async_trait]
pub trait RouteServiceTrait: Send + Sync {
    async fn get_route_by_id(&self, id: &RouteId) -> ApplicationResult<Route>;
    async fn get_all_routes(&self, filter: &RouteFilter) -> ApplicationResult<Vec<Route>>;
}

/// User operations exposed to handlers
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn get_user_by_id(&self, id: &UserId) -> ApplicationResult<User>;
}

/// Todo operations exposed to handlers
#[async_trait]
pub trait TodoServiceTrait: Send + Sync {
    async fn get_todos(&self) -> ApplicationResult<Vec<Todo>>;
    async fn get_todo_by_id(&self, id: &TodoId) -> ApplicationResult<Todo>;
}

#[async_trait]
impl<P> RouteServiceTrait for RouteService<P>
where
    P: RouteApiPort + ?Sized + 'static,
{
    async fn get_route_by_id(&self, id: &RouteId) -> ApplicationResult<Route> {
        RouteService::get_route_by_id(self, id).await
    }

    async fn get_all_routes(&self, filter: &RouteFilter) -> ApplicationResult<Vec<Route>> {
        RouteService::get_all_routes(self, filter).await
    }
}

#[async_trait]
impl<P> UserServiceTrait for UserService<P>
where
    P: UserApiPort + ?Sized,
{
    async fn get_user_by_id(&self, id: &UserId) -> ApplicationResult<User> {
        UserService::get_user_by_id(self, id).await
    }
}

#[async_trait]
impl<P> TodoServiceTrait for TodoService<P>
where
    P: TodoApiPort + ?Sized,
{
    async fn get_todos(&self) -> ApplicationResult<Vec<Todo>> {
        TodoService::get_todos(self).await
    }

    async fn get_todo_by_id(&self, id: &TodoId) -> ApplicationResult<Todo> {
        TodoService::get_todo_by_id(self, id).await
    }
}
