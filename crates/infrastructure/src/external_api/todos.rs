//! Todo directory adapter (JSONPlaceholder `/todos`, `/todos/{id}`)

use super::{ExternalApiResult, UpstreamClient};
use async_trait::async_trait;
use serde::Deserialize;
use sitemap_application::{ApplicationResult, TodoApiPort};
use sitemap_domain::{Todo, TodoId};
use tracing::{debug, instrument};

const SERVICE: &str = "todo-directory";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryTodoResponse {
    pub user_id: u64,
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

/// [`TodoApiPort`] over the directory REST API
#[derive(Clone, Debug)]
pub struct TodoApiAdapter {
    client: UpstreamClient,
}

impl TodoApiAdapter {
    pub fn new(http: reqwest::Client, base_url: &str) -> ExternalApiResult<Self> {
        Ok(Self {
            client: UpstreamClient::new(http, base_url, SERVICE)?,
        })
    }

    fn map_todo(&self, response: DirectoryTodoResponse) -> ExternalApiResult<Todo> {
        TodoId::parse(response.id.to_string())
            .and_then(|id| Todo::new(id, response.user_id, response.title, response.completed))
            .map_err(|e| {
                self.client
                    .invalid_response(format!("Todo {} is invalid: {}", response.id, e))
            })
    }
}

#[async_trait]
impl TodoApiPort for TodoApiAdapter {
    #[instrument(skip(self))]
    async fn find_all_todos(&self) -> ApplicationResult<Vec<Todo>> {
        let url = self.client.endpoint(&["todos"])?;
        let responses: Option<Vec<DirectoryTodoResponse>> = self.client.get_json(url).await?;

        let todos = responses
            .unwrap_or_default()
            .into_iter()
            .map(|r| self.map_todo(r))
            .collect::<ExternalApiResult<Vec<_>>>()?;

        debug!(count = todos.len(), "Todos listed");
        Ok(todos)
    }

    #[instrument(skip(self), fields(todo_id = %id))]
    async fn find_todo_by_id(&self, id: &TodoId) -> ApplicationResult<Option<Todo>> {
        let url = self.client.endpoint(&["todos", id.as_str()])?;
        let response: Option<DirectoryTodoResponse> = self.client.get_optional(url).await?;

        Ok(response.map(|r| self.map_todo(r)).transpose()?)
    }
}
