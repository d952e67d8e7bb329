//! Map SDK web service relay against a mocked upstream

use axum::{
    body::{to_bytes, Body},
    extract::ConnectInfo,
    http::Request,
};
use serde_json::json;
use std::net::SocketAddr;
use tower::ServiceExt;
use travel_planner_gateway::config::Settings;
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{app, settings_for};

fn relay_settings(upstream: &str) -> Settings {
    let mut settings = settings_for(upstream);
    settings.amap.js_security_key = Some("js-secret".to_string());
    settings.amap.styles_base_url = upstream.to_string();
    settings.amap.vectormap_base_url = upstream.to_string();
    settings
}

#[tokio::test]
async fn test_relay_adds_jscode_and_client_ip() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/place/text"))
        .and(query_param("keywords", "广州塔"))
        .and(query_param("jscode", "js-secret"))
        .and(query_param("ip", "10.0.0.7"))
        .and(header("x-sdk-version", "2.0"))
        .and(|request: &wiremock::Request| {
            request.url.query_pairs().filter(|(key, _)| key == "jscode").count() == 1
        })
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-upstream", "amap")
                .set_body_json(json!({"status": "1", "pois": []})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let app = app(relay_settings(&server.uri()));
    let mut request = Request::builder()
        .uri("/_AMapService/v3/place/text?keywords=%E5%B9%BF%E5%B7%9E%E5%A1%94&jscode=forged")
        .header("x-sdk-version", "2.0")
        .body(Body::empty())
        .unwrap();
    request
        .extensions_mut()
        .insert(ConnectInfo(SocketAddr::from(([10, 0, 0, 7], 40000))));

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.headers()["x-upstream"], "amap");
    assert_eq!(response.headers()["content-type"], "application/json");

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "1");
}

#[tokio::test]
async fn test_relay_forwards_post_body_and_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v4/map/styles"))
        .and(query_param("styleid", "dark"))
        .and(query_param("jscode", "js-secret"))
        .and(body_string("layers=1"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such style"))
        .expect(1)
        .mount(&server)
        .await;

    let app = app(relay_settings(&server.uri()));
    let request = Request::builder()
        .method("POST")
        .uri("/_AMapService/v4/map/styles?styleid=dark")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from("layers=1"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), 404);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"no such style");
}

#[tokio::test]
async fn test_relay_unreachable_upstream() {
    let app = app(relay_settings("http://127.0.0.1:9"));
    let request = Request::builder()
        .uri("/_AMapService/v3/place/text?keywords=x")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), 502);
}
