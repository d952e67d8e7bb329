//! Route search against a mocked directions service

use serde_json::{json, Value};
use wiremock::matchers::{any, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{app, post_json, settings_for};

const ORIGIN: &str = "113.25,23.15";
const DESTINATION: &str = "113.27,22.99";

fn failed_status() -> Value {
    json!({"status": "0", "info": "INVALID_USER_KEY", "count": "0"})
}

fn driving_body() -> Value {
    json!({
        "status": "1",
        "info": "OK",
        "count": "1",
        "route": {
            "origin": ORIGIN,
            "destination": DESTINATION,
            "paths": [{
                "distance": "12345",
                "duration": "3661",
                "steps": [
                    {"instruction": "沿<b>环市中路</b>向东行驶", "polyline": "113.25,23.15;113.26,23.14"},
                    {"instruction": "右转进入广州大道", "polyline": "113.26,23.14;113.27,22.99"}
                ]
            }]
        }
    })
}

fn transit_body(line_name: &str) -> Value {
    json!({
        "status": "1",
        "info": "OK",
        "count": "1",
        "route": {
            "transits": [{
                "distance": "15000",
                "duration": "2400",
                "segments": [
                    {
                        "walking": {
                            "distance": "300",
                            "steps": [{"instruction": "步行300米", "polyline": "113.25,23.15;113.251,23.149"}]
                        },
                        "bus": {
                            "buslines": [{
                                "name": line_name,
                                "polyline": "113.251,23.149;113.27,22.99",
                                "departure_stop": {"name": "广州火车站"},
                                "arrival_stop": {"name": "客村"}
                            }]
                        }
                    },
                    {"walking": [], "bus": {"buslines": []}}
                ]
            }]
        }
    })
}

async fn mount(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_every_mode_fails_when_places_cannot_be_resolved() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(failed_status()))
        .mount(&server)
        .await;

    let app = app(settings_for(&server.uri()));
    let (status, body) = post_json(
        &app,
        "/api/transport/search",
        json!({"city": "广州", "origin": "不存在的地方", "destination": "也不存在"}),
    )
    .await;

    assert_eq!(status, 200);
    for mode in ["driving", "transit", "walking", "subway"] {
        assert_eq!(body[mode]["status"], "error", "mode {}", mode);
        assert_eq!(body[mode]["message"], "Route unavailable", "mode {}", mode);
    }
}

#[tokio::test]
async fn test_invalid_departure_time_makes_no_upstream_calls() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(failed_status()))
        .expect(0)
        .mount(&server)
        .await;

    let app = app(settings_for(&server.uri()));
    let (status, body) = post_json(
        &app,
        "/api/transport/search",
        json!({"city": "广州", "origin": ORIGIN, "destination": DESTINATION, "departureTime": "25:00"}),
    )
    .await;

    assert_eq!(status, 400);
    assert!(body["error"].as_str().unwrap().contains("HH:MM"));
}

#[tokio::test]
async fn test_missing_fields_rejected() {
    let server = MockServer::start().await;
    let app = app(settings_for(&server.uri()));

    let (status, body) = post_json(
        &app,
        "/api/transport/search",
        json!({"city": "广州", "origin": ORIGIN}),
    )
    .await;
    assert_eq!(status, 400);
    assert!(body["error"].is_string());

    let (status, _) = post_json(
        &app,
        "/api/transport/search",
        json!({"city": "  ", "origin": ORIGIN, "destination": DESTINATION}),
    )
    .await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn test_modes_succeed_and_fail_independently() {
    let server = MockServer::start().await;
    mount(&server, "/v3/direction/driving", driving_body()).await;
    mount(&server, "/v3/direction/walking", failed_status()).await;
    mount(&server, "/v3/direction/transit/integrated", transit_body("地铁2号线")).await;

    let app = app(settings_for(&server.uri()));
    let (status, body) = post_json(
        &app,
        "/api/transport/search",
        json!({"city": "广州", "origin": ORIGIN, "destination": DESTINATION}),
    )
    .await;
    assert_eq!(status, 200);

    let driving = &body["driving"];
    assert_eq!(driving["status"], "success");
    assert_eq!(driving["duration"], 61);
    assert_eq!(driving["distance"].as_f64(), Some(12.345));
    assert_eq!(driving["path"][0]["mode"], "driving");
    assert_eq!(driving["path"][0]["instruction"], "沿环市中路向东行驶");
    assert_eq!(driving["path"][0]["coordinates"], json!([[113.25, 23.15], [113.26, 23.14]]));

    assert_eq!(body["walking"]["status"], "error");
    assert_eq!(body["walking"]["message"], "Unable to fetch walking route");

    let transit = &body["transit"];
    assert_eq!(transit["status"], "success");
    assert_eq!(transit["duration"], 40);
    let modes: Vec<&str> = transit["path"]
        .as_array()
        .unwrap()
        .iter()
        .map(|step| step["mode"].as_str().unwrap())
        .collect();
    assert_eq!(modes, vec!["walking", "subway"]);
    assert_eq!(transit["path"][1]["instruction"], "乘坐地铁2号线，从广州火车站到客村");

    assert_eq!(body["subway"]["status"], "success");
}

#[tokio::test]
async fn test_subway_requires_a_metro_line() {
    let server = MockServer::start().await;
    mount(&server, "/v3/direction/driving", driving_body()).await;
    mount(&server, "/v3/direction/walking", driving_body()).await;
    mount(&server, "/v3/direction/transit/integrated", transit_body("B10路")).await;

    let app = app(settings_for(&server.uri()));
    let (_, body) = post_json(
        &app,
        "/api/transport/search",
        json!({"city": "广州", "origin": ORIGIN, "destination": DESTINATION, "departureTime": ""}),
    )
    .await;

    assert_eq!(body["transit"]["status"], "success");
    assert_eq!(body["transit"]["path"][1]["mode"], "bus");
    assert_eq!(body["subway"]["status"], "error");
    assert_eq!(body["subway"]["message"], "Unable to fetch subway route");
}

#[tokio::test]
async fn test_place_names_are_geocoded_with_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/geocode/geo"))
        .and(query_param("key", "test-key"))
        .and(query_param("city", "广州"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "1",
            "info": "OK",
            "count": "1",
            "geocodes": [{"location": ORIGIN, "formatted_address": "广东省广州市"}]
        })))
        .expect(8)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/direction/driving"))
        .and(query_param("strategy", "10"))
        .and(query_param("origin", ORIGIN))
        .respond_with(ResponseTemplate::new(200).set_body_json(driving_body()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/direction/transit/integrated"))
        .and(query_param("nightflag", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(transit_body("地铁3号线")))
        .expect(1)
        .mount(&server)
        .await;

    let app = app(settings_for(&server.uri()));
    let (status, body) = post_json(
        &app,
        "/api/transport/search",
        json!({"city": "广州", "origin": "广州塔", "destination": "广州塔"}),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["driving"]["status"], "success");
    assert_eq!(body["subway"]["status"], "success");
    // transit without nightflag and walking hit no mock
    assert_eq!(body["transit"]["message"], "Unable to fetch transit route");
    assert_eq!(body["walking"]["message"], "Unable to fetch walking route");
}

#[tokio::test]
async fn test_coordinate_text_sent_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/geocode/geo"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/direction/driving"))
        .and(query_param("origin", "113.2500,23.1500"))
        .and(query_param("destination", "113.2700,22.9900"))
        .respond_with(ResponseTemplate::new(200).set_body_json(driving_body()))
        .expect(1)
        .mount(&server)
        .await;
    mount(&server, "/v3/direction/walking", failed_status()).await;
    mount(&server, "/v3/direction/transit/integrated", failed_status()).await;

    let app = app(settings_for(&server.uri()));
    let (status, body) = post_json(
        &app,
        "/api/transport/search",
        json!({"city": "广州", "origin": "113.2500,23.1500", "destination": "113.2700,22.9900"}),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["driving"]["status"], "success");
}
