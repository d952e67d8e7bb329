//! Saved items and health endpoints

use serde_json::json;
use travel_planner_gateway::config::Settings;

use crate::common::{app, delete, get, post_json};

#[tokio::test]
async fn test_health() {
    let app = app(Settings::default());
    let (status, body) = get(&app, "/health").await;

    assert_eq!(status, 200);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_openapi_document_served() {
    let app = app(Settings::default());
    let (status, body) = get(&app, "/api-docs/openapi.json").await;

    assert_eq!(status, 200);
    assert!(body["paths"]["/api/transport/search"].is_object());
    assert!(body["paths"]["/api/saved_spots/{id}"].is_object());
    assert_eq!(
        body["paths"]["/api/saved_spots"]["post"]["responses"]["409"]["content"]["application/json"]["schema"]["$ref"],
        "#/components/schemas/ErrorResponse"
    );
    assert!(body["components"]["schemas"]["ErrorResponse"].is_object());
}

#[tokio::test]
async fn test_saved_spots_lifecycle() {
    let app = app(Settings::default());

    let (status, body) = get(&app, "/api/saved_spots").await;
    assert_eq!(status, 200);
    assert_eq!(body, json!([]));

    let (status, body) = post_json(&app, "/api/saved_spots", json!({"name": "广州塔"})).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({"success": true, "spot": {"id": 1, "name": "广州塔"}}));

    let (_, body) = post_json(&app, "/api/saved_spots", json!({"name": "白云山"})).await;
    assert_eq!(body["spot"]["id"], 2);

    let (status, body) = delete(&app, "/api/saved_spots/1").await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({"success": true}));

    let (_, body) = get(&app, "/api/saved_spots").await;
    assert_eq!(body, json!([{"id": 2, "name": "白云山"}]));

    // ids are not reused after a delete
    let (_, body) = post_json(&app, "/api/saved_spots", json!({"name": "陈家祠"})).await;
    assert_eq!(body["spot"]["id"], 3);
}

#[tokio::test]
async fn test_empty_spot_name_rejected() {
    let app = app(Settings::default());

    let (status, body) = post_json(&app, "/api/saved_spots", json!({})).await;
    assert_eq!(status, 400);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_duplicate_spots_accepted_by_default() {
    let app = app(Settings::default());

    post_json(&app, "/api/saved_spots", json!({"name": "广州塔"})).await;
    let (status, body) = post_json(&app, "/api/saved_spots", json!({"name": "广州塔"})).await;
    assert_eq!(status, 200);
    assert_eq!(body["spot"]["id"], 2);

    let (_, body) = get(&app, "/api/saved_spots").await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_duplicate_spots_rejected_when_configured() {
    let mut settings = Settings::default();
    settings.saved.reject_duplicate_spots = true;
    let app = app(settings);

    post_json(&app, "/api/saved_spots", json!({"name": "广州塔"})).await;
    let (status, body) = post_json(&app, "/api/saved_spots", json!({"name": "广州塔"})).await;
    assert_eq!(status, 409);
    assert!(body["error"].as_str().unwrap().contains("广州塔"));
}

#[tokio::test]
async fn test_malformed_json_is_a_bad_request() {
    let app = app(Settings::default());
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/saved_spots")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();

    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_saved_routes_lifecycle() {
    let app = app(Settings::default());

    let route = json!({
        "city": "广州",
        "origin": "广州站",
        "destination": "广州南站",
        "type": "subway",
        "duration": 35,
        "distance": 17.2,
        "path": [{
            "mode": "subway",
            "instruction": "乘坐地铁2号线，从广州火车站到广州南站",
            "coordinates": [[113.25, 23.15], [113.27, 22.99]]
        }]
    });

    let (status, body) = post_json(&app, "/api/saved_routes", route).await;
    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert_eq!(body["route"]["id"], 1);
    assert_eq!(body["route"]["type"], "subway");
    assert_eq!(body["route"]["path"][0]["coordinates"][1], json!([113.27, 22.99]));
    assert!(body["route"]["saved_at"].is_string());

    let (_, body) = get(&app, "/api/saved_routes").await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = delete(&app, "/api/saved_routes/99").await;
    assert_eq!(status, 200);
    assert_eq!(body["success"], true);

    delete(&app, "/api/saved_routes/1").await;
    let (_, body) = get(&app, "/api/saved_routes").await;
    assert_eq!(body, json!([]));
}
