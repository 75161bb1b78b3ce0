//! User directory adapter (JSONPlaceholder `/users/{id}`)

use super::{ExternalApiResult, UpstreamClient};
use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use sitemap_application::{ApplicationResult, UserApiPort};
use sitemap_domain::{Email, User, UserId};
use tracing::instrument;

const SERVICE: &str = "user-directory";

/// User as published by the directory. Every other field is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryUserResponse {
    pub id: u64,
    pub name: String,
    pub email: String,
}

/// [`UserApiPort`] over the directory REST API
#[derive(Clone, Debug)]
pub struct UserApiAdapter {
    client: UpstreamClient,
}

impl UserApiAdapter {
    pub fn new(http: reqwest::Client, base_url: &str) -> ExternalApiResult<Self> {
        Ok(Self {
            client: UpstreamClient::new(http, base_url, SERVICE)?,
        })
    }

    /// The directory carries no timestamps, both are set to the mapping time
    fn map_user(&self, response: DirectoryUserResponse) -> ExternalApiResult<User> {
        let now = Utc::now();
        UserId::parse(response.id.to_string())
            .and_then(|id| {
                let email = Email::parse(&response.email)?;
                User::new(id, response.name, email, now, now)
            })
            .map_err(|e| {
                self.client
                    .invalid_response(format!("User {} is invalid: {}", response.id, e))
            })
    }
}

#[async_trait]
impl UserApiPort for UserApiAdapter {
    #[instrument(skip(self), fields(user_id = %id))]
    async fn find_user_by_id(&self, id: &UserId) -> ApplicationResult<Option<User>> {
        let url = self.client.endpoint(&["users", id.as_str()])?;
        let response: Option<DirectoryUserResponse> = self.client.get_optional(url).await?;

        Ok(response.map(|r| self.map_user(r)).transpose()?)
    }
}
