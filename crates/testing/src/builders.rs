//! Fluent builder pattern for constructing test data.
//!
//! Builders start from fixed, deterministic defaults so assertions can rely
//! on exact values. Use [`crate::fixtures`] when the values do not matter.

use chrono::{DateTime, TimeZone, Utc};
use indexmap::IndexSet;
use serde_json::Value;
use sitemap_domain::{
    Email, NewRoute, Route, RouteId, RouteMetadata, Todo, TodoId, User, UserId,
};

/// Fixed timestamp used by all builders
pub fn reference_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
}

/// Builder for creating Route test instances
#[derive(Clone)]
pub struct RouteBuilder {
    id: String,
    path: String,
    name: String,
    description: Option<String>,
    method: String,
    tags: IndexSet<String>,
    metadata: RouteMetadata,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl RouteBuilder {
    pub fn new() -> Self {
        Self {
            id: "route-1".to_string(),
            path: "/api/test".to_string(),
            name: "Test route".to_string(),
            description: None,
            method: "GET".to_string(),
            tags: IndexSet::new(),
            metadata: RouteMetadata::new(),
            active: true,
            created_at: reference_timestamp(),
            updated_at: reference_timestamp(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    pub fn active(mut self) -> Self {
        self.active = true;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    pub fn with_updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = updated_at;
        self
    }

    pub fn build(self) -> Route {
        Route::new(NewRoute {
            id: RouteId::parse(self.id).expect("builder route id must be non-blank"),
            path: self.path,
            name: self.name,
            description: self.description,
            method: self.method,
            tags: self.tags,
            metadata: self.metadata,
            active: self.active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
        .expect("builder route fields must be valid")
    }
}

impl Default for RouteBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for creating User test instances
#[derive(Clone)]
pub struct UserBuilder {
    id: String,
    name: String,
    email: String,
}

impl UserBuilder {
    pub fn new() -> Self {
        Self {
            id: "1".to_string(),
            name: "Leanne Graham".to_string(),
            email: "sincere@april.biz".to_string(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn build(self) -> User {
        User::new(
            UserId::parse(self.id).expect("builder user id must be non-blank"),
            self.name,
            Email::parse(&self.email).expect("builder email must be valid"),
            reference_timestamp(),
            reference_timestamp(),
        )
        .expect("builder user fields must be valid")
    }
}

impl Default for UserBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for creating Todo test instances
#[derive(Clone)]
pub struct TodoBuilder {
    id: String,
    user_id: u64,
    title: String,
    completed: bool,
}

impl TodoBuilder {
    pub fn new() -> Self {
        Self {
            id: "1".to_string(),
            user_id: 1,
            title: "delectus aut autem".to_string(),
            completed: false,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_user_id(mut self, user_id: u64) -> Self {
        self.user_id = user_id;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn completed(mut self) -> Self {
        self.completed = true;
        self
    }

    pub fn build(self) -> Todo {
        Todo::new(
            TodoId::parse(self.id).expect("builder todo id must be non-blank"),
            self.user_id,
            self.title,
            self.completed,
        )
        .expect("builder todo fields must be valid")
    }
}

impl Default for TodoBuilder {
    fn default() -> Self {
        Self::new()
    }
}
