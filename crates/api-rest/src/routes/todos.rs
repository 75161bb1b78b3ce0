//! Todo endpoints, proxied from the upstream directory.

use crate::{error::ApiResult, responses::ApiResponse, state::AppState};
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sitemap_domain::{Todo, TodoId};
use utoipa::ToSchema;

/// Todo as served to clients
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TodoResponse {
    pub id: String,
    pub user_id: u64,
    pub title: String,
    pub completed: bool,
}

impl From<Todo> for TodoResponse {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id.into_inner(),
            user_id: todo.user_id,
            title: todo.title,
            completed: todo.completed,
        }
    }
}

/// Todo routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/todos", get(list_todos))
        .route("/todos/:id", get(get_todo))
}

/// List todos
#[utoipa::path(
    get,
    path = "/api/todos",
    tag = "todos",
    responses(
        (status = 200, description = "Every todo, in upstream order", body = [TodoResponse]),
        (status = 502, description = "Upstream failure"),
    )
)]
pub async fn list_todos(State(state): State<AppState>) -> ApiResult<Json<ApiResponse<Vec<TodoResponse>>>> {
    let todos = state.todo_service.get_todos().await?;
    let todos: Vec<TodoResponse> = todos.into_iter().map(Into::into).collect();

    Ok(Json(ApiResponse::success(todos)))
}

/// Get todo by ID
#[utoipa::path(
    get,
    path = "/api/todos/{id}",
    tag = "todos",
    params(
        ("id" = String, Path, description = "Todo ID"),
    ),
    responses(
        (status = 200, description = "Todo details", body = TodoResponse),
        (status = 404, description = "Todo not found"),
        (status = 502, description = "Upstream failure"),
    )
)]
pub async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<TodoResponse>>> {
    let id = TodoId::parse(id)?;
    let todo = state.todo_service.get_todo_by_id(&id).await?;

    Ok(Json(ApiResponse::success(todo.into())))
}
