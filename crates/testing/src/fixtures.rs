//! Test fixtures for generating domain entities with realistic data.

use chrono::Utc;
use fake::{
    faker::{
        internet::en::FreeEmail,
        lorem::en::{Sentence, Word},
        name::en::Name,
    },
    Fake,
};
use sitemap_domain::{
    Email, NewRoute, Route, RouteFilter, RouteId, RouteMetadata, Todo, TodoId, User, UserId,
};

const METHODS: [&str; 4] = ["GET", "POST", "PUT", "DELETE"];

/// Create a test route with random path and name
pub fn create_test_route() -> Route {
    create_test_route_with_id(&format!("route-{}", RouteId::generate()))
}

/// Create a test route with a specific id
pub fn create_test_route_with_id(id: &str) -> Route {
    let segment: String = Word().fake();
    let method = METHODS[(0..METHODS.len()).fake::<usize>()];
    let now = Utc::now();

    Route::new(NewRoute {
        id: RouteId::parse(id).expect("fixture route id must be non-blank"),
        path: format!("/api/{}", segment),
        name: Sentence(2..5).fake(),
        description: Some(Sentence(5..10).fake()),
        method: method.to_string(),
        tags: ["api".to_string(), segment].into_iter().collect(),
        metadata: RouteMetadata::new(),
        active: true,
        created_at: now,
        updated_at: now,
    })
    .expect("fixture route must be valid")
}

/// Create `count` routes with ids `route-0`..`route-{count-1}`
pub fn create_test_routes(count: usize) -> Vec<Route> {
    (0..count)
        .map(|i| create_test_route_with_id(&format!("route-{}", i)))
        .collect()
}

/// Create a test user with a random name and email
pub fn create_test_user() -> User {
    let email: String = FreeEmail().fake();
    let name: String = Name().fake();
    let now = Utc::now();

    User::new(
        UserId::parse((1..=10u32).fake::<u32>().to_string()).expect("fixture user id"),
        name,
        Email::parse(&email).expect("fixture email must be valid"),
        now,
        now,
    )
    .expect("fixture user must be valid")
}

/// Create a test todo owned by `user_id`
pub fn create_test_todo(user_id: u64) -> Todo {
    Todo::new(
        TodoId::parse((1..=200u32).fake::<u32>().to_string()).expect("fixture todo id"),
        user_id,
        Sentence(3..6).fake::<String>(),
        false,
    )
    .expect("fixture todo must be valid")
}

/// Default first-page filter
pub fn create_test_filter() -> RouteFilter {
    RouteFilter::default()
}
