//! Unit tests for route search models

use serde_json::json;
use travel_planner_gateway::transport::{
    Coordinate, MultiModalRouteResponse, PathStep, RouteQuery, RouteResult, StepMode,
};

#[test]
fn test_query_trims_fields() {
    let query = RouteQuery::new(" 广州 ", " 广州塔 ", "白云山", Some("8:05")).unwrap();

    assert_eq!(query.city, "广州");
    assert_eq!(query.origin, "广州塔");
    assert_eq!(query.departure.map(|d| d.to_string()).as_deref(), Some("08:05"));
}

#[test]
fn test_query_rejects_bad_departure() {
    for departure in ["24:00", "12:60", "noon", "12", "1:2:3", "-1:00"] {
        assert!(
            RouteQuery::new("广州", "a", "b", Some(departure)).is_err(),
            "{} should be rejected",
            departure
        );
    }
}

#[test]
fn test_empty_departure_means_now() {
    let query = RouteQuery::new("广州", "a", "b", Some("")).unwrap();
    assert!(query.departure.is_none());
}

#[test]
fn test_response_wire_format() {
    let success = RouteResult::Success {
        duration_minutes: 25,
        distance_km: 3.2,
        path: vec![PathStep {
            mode: StepMode::Bus,
            instruction: "乘坐B10路，从A到B".to_string(),
            coordinates: vec![Coordinate::new(113.1, 23.1)],
        }],
    };
    let response = MultiModalRouteResponse {
        driving: success.clone(),
        transit: success,
        walking: RouteResult::error("Route unavailable"),
        subway: RouteResult::error("Unable to fetch subway route"),
    };

    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(
        value["driving"],
        json!({
            "status": "success",
            "duration": 25,
            "distance": 3.2,
            "path": [{"mode": "bus", "instruction": "乘坐B10路，从A到B", "coordinates": [[113.1, 23.1]]}]
        })
    );
    assert_eq!(value["walking"], json!({"status": "error", "message": "Route unavailable"}));
}
