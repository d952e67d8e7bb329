//! Unit tests for saved item stores

use travel_planner_gateway::store::{NewRoute, RouteStore, SpotStore};
use travel_planner_gateway::AppError;

#[test]
fn test_store_starts_empty() {
    let store = SpotStore::new();
    assert!(store.is_empty());
    assert_eq!(store.len(), 0);
    assert!(store.list().is_empty());
}

#[test]
fn test_spot_names_are_trimmed() {
    let store = SpotStore::new();
    let spot = store.add_spot("  越秀公园 ", true).unwrap();
    assert_eq!(spot.name, "越秀公园");

    let duplicate = store.add_spot("越秀公园", true);
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));
}

#[test]
fn test_list_keeps_insertion_order() {
    let store = RouteStore::new();
    for city in ["广州", "深圳", "佛山"] {
        store.add_route(NewRoute {
            city: city.to_string(),
            ..Default::default()
        });
    }

    let cities: Vec<String> = store.list().into_iter().map(|r| r.city).collect();
    assert_eq!(cities, vec!["广州", "深圳", "佛山"]);
}

#[test]
fn test_remove_is_idempotent() {
    let store = RouteStore::new();
    let route = store.add_route(NewRoute::default());

    assert!(store.remove(route.id));
    assert!(!store.remove(route.id));
    assert!(store.is_empty());
}
