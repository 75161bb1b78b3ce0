//! Application Services
//!
//! Use-case orchestration over the outbound ports. Every service is generic
//! over its port so tests can substitute in-memory implementations.

mod route;
mod todo;
mod user;

pub use route::*;
pub use todo::*;
pub use user::*;

use crate::ApplicationError;
use tokio::task::JoinError;

/// Service configuration
#[derive(Debug, Clone, Default)]
pub struct ServiceConfig {
    /// Maximum number of status checks in flight during bulk enrichment.
    /// `None` runs one check per route concurrently.
    pub max_concurrent_status_checks: Option<usize>,
}

impl ServiceConfig {
    pub fn with_status_check_limit(mut self, limit: usize) -> Self {
        self.max_concurrent_status_checks = Some(limit);
        self
    }
}

/// A spawned unit of work panicked or was cancelled
pub(crate) fn task_failure(err: JoinError) -> ApplicationError {
    ApplicationError::Internal(format!("Background task failed: {}", err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_config_default_is_unbounded() {
        assert_eq!(ServiceConfig::default().max_concurrent_status_checks, None);
        assert_eq!(
            ServiceConfig::default()
                .with_status_check_limit(4)
                .max_concurrent_status_checks,
            Some(4)
        );
    }
}
