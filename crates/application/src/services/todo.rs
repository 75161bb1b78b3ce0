//! Todo Service

use crate::{ApplicationError, ApplicationResult};
use async_trait::async_trait;
use sitemap_domain::{Todo, TodoId};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Outbound port onto the todo directory
#[async_trait]
pub trait TodoApiPort: Send + Sync {
    async fn find_all_todos(&self) -> ApplicationResult<Vec<Todo>>;
    async fn find_todo_by_id(&self, id: &TodoId) -> ApplicationResult<Option<Todo>>;
}

/// Todo service implementation
pub struct TodoService<P>
where
    P: TodoApiPort + ?Sized,
{
    port: Arc<P>,
}

impl<P> TodoService<P>
where
    P: TodoApiPort + ?Sized,
{
    pub fn new(port: Arc<P>) -> Self {
        Self { port }
    }

    /// List every todo, in upstream order
    #[instrument(skip(self))]
    pub async fn get_todos(&self) -> ApplicationResult<Vec<Todo>> {
        let todos = self.port.find_all_todos().await?;
        debug!(count = todos.len(), "Todos fetched");
        Ok(todos)
    }

    /// Get todo by ID
    #[instrument(skip(self), fields(todo_id = %id))]
    pub async fn get_todo_by_id(&self, id: &TodoId) -> ApplicationResult<Todo> {
        self.port
            .find_todo_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::NotFound(format!("Todo not found: {}", id)))
    }
}
