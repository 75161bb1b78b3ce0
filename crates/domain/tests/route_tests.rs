//! Tests for Route construction, reconciliation and filters
//!
//! Covers the construction invariants and the reconciliation rule shared by
//! single-route and bulk enrichment.

use chrono::{Duration, TimeZone, Utc};
use indexmap::IndexSet;
use proptest::prelude::*;
use sitemap_domain::{NewRoute, Route, RouteFilter, RouteId, RouteMetadata};

fn route(id: &str, active: bool) -> Route {
    let stamp = Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap();
    Route::new(NewRoute {
        id: RouteId::parse(id).unwrap(),
        path: format!("/api/{}", id),
        name: format!("Route {}", id),
        description: Some("test route".to_string()),
        method: "GET".to_string(),
        tags: IndexSet::new(),
        metadata: RouteMetadata::new(),
        active,
        created_at: stamp,
        updated_at: stamp,
    })
    .unwrap()
}

#[test]
fn test_inactive_route_observed_active() {
    let original = route("r1", false);
    let reconciled = original.clone().reconcile_active_status(true);

    assert!(reconciled.is_active());
    assert!(reconciled.updated_at() > original.updated_at());
}

#[test]
fn test_description_update_keeps_identity() {
    let original = route("r2", true);
    let updated = original.with_updated_description(None);

    assert_eq!(updated.description(), None);
    assert_eq!(updated.id(), original.id());
    assert_eq!(updated.created_at(), original.created_at());
    assert!(updated.updated_at() > original.updated_at());
}

#[test]
fn test_repeated_updates_are_strictly_ordered() {
    let original = route("r3", false);
    let first = original.with_active_status(true);
    let second = first.with_active_status(false);
    let third = second.with_active_status(true);

    assert!(first.updated_at() < second.updated_at());
    assert!(second.updated_at() < third.updated_at());
}

#[test]
fn test_future_timestamp_still_advances() {
    let stamp = Utc::now() + Duration::days(1);
    let original = Route::new(NewRoute {
        id: RouteId::parse("r4").unwrap(),
        path: "/future".to_string(),
        name: "Future".to_string(),
        description: None,
        method: "POST".to_string(),
        tags: IndexSet::new(),
        metadata: RouteMetadata::new(),
        active: false,
        created_at: stamp,
        updated_at: stamp,
    })
    .unwrap();

    assert!(original.with_active_status(true).updated_at() > stamp);
}

proptest! {
    #[test]
    fn test_reconcile_matches_observed_flag(stored in any::<bool>(), observed in any::<bool>()) {
        let original = route("prop", stored);
        let reconciled = original.clone().reconcile_active_status(observed);

        prop_assert_eq!(reconciled.is_active(), observed);
        if stored == observed {
            prop_assert_eq!(reconciled.updated_at(), original.updated_at());
            prop_assert_eq!(&reconciled, &original);
        } else {
            prop_assert!(reconciled.updated_at() > original.updated_at());
        }
    }

    #[test]
    fn test_filter_accepts_valid_pagination(page in 0i64..10_000, size in 1i64..10_000) {
        let filter = RouteFilter::paginated(page, size).unwrap();
        prop_assert_eq!(filter.page() as i64, page);
        prop_assert_eq!(filter.size() as i64, size);
    }

    #[test]
    fn test_filter_rejects_invalid_pagination(page in -10_000i64..0, size in -10_000i64..=0) {
        prop_assert!(RouteFilter::paginated(page, 20).is_err());
        prop_assert!(RouteFilter::paginated(0, size).is_err());
    }
}
