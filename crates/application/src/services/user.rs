//! User Service
//!
//! Read-through access to users held by the upstream directory.

use crate::{ApplicationError, ApplicationResult};
use async_trait::async_trait;
use sitemap_domain::{User, UserId};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Outbound port onto the user directory
#[async_trait]
pub trait UserApiPort: Send + Sync {
    async fn find_user_by_id(&self, id: &UserId) -> ApplicationResult<Option<User>>;
}

/// User service implementation
pub struct UserService<P>
where
    P: UserApiPort + ?Sized,
{
    port: Arc<P>,
}

impl<P> UserService<P>
where
    P: UserApiPort + ?Sized,
{
    pub fn new(port: Arc<P>) -> Self {
        Self { port }
    }

    /// Get user by ID
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn get_user_by_id(&self, id: &UserId) -> ApplicationResult<User> {
        let user = self
            .port
            .find_user_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::NotFound(format!("User not found: {}", id)))?;

        debug!(email = %user.email(), "User resolved");

        Ok(user)
    }
}
