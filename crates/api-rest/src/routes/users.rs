//! User endpoints, proxied from the upstream directory.

use crate::{error::ApiResult, responses::ApiResponse, state::AppState};
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sitemap_domain::{User, UserId};
use utoipa::ToSchema;

/// User as served to clients
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id().to_string(),
            name: user.name().to_string(),
            email: user.email().to_string(),
            created_at: user.created_at().to_rfc3339(),
            updated_at: user.updated_at().to_rfc3339(),
        }
    }
}

/// User routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/users/:id", get(get_user))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "users",
    params(
        ("id" = String, Path, description = "User ID"),
    ),
    responses(
        (status = 200, description = "User details", body = UserResponse),
        (status = 404, description = "User not found"),
        (status = 502, description = "Upstream failure"),
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    let id = UserId::parse(id)?;
    let user = state.user_service.get_user_by_id(&id).await?;

    Ok(Json(ApiResponse::success(user.into())))
}
