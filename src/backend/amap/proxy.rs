//! Relay for the web service calls of the browser map SDK.
//!
//! The frontend points the SDK's `serviceHost` at `/_AMapService`; requests
//! are forwarded with the security `jscode` and the caller's IP appended, so
//! the secret never reaches the browser.

use axum::body::Bytes;
use axum::http::{header::CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use reqwest::Client;
use std::net::IpAddr;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::AmapConfig;
use crate::error::{AppError, Result};

const STYLES_PREFIX: &str = "v4/map/styles";
const VECTORMAP_PREFIX: &str = "v3/vectormap";

const SKIPPED_REQUEST_HEADERS: [&str; 5] = [
    "host",
    "content-length",
    "connection",
    "transfer-encoding",
    "accept-encoding",
];

const SKIPPED_RESPONSE_HEADERS: [&str; 4] = [
    "content-length",
    "connection",
    "content-encoding",
    "transfer-encoding",
];

/// An inbound request to relay
#[derive(Debug)]
pub struct ProxyRequest {
    pub method: Method,
    /// Path below `/_AMapService/`
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub body: Bytes,
    pub client_ip: Option<IpAddr>,
}

/// The upstream answer, headers already filtered
#[derive(Debug)]
pub struct ProxyResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

pub struct AmapProxy {
    client: Client,
    rest_base_url: String,
    styles_base_url: String,
    vectormap_base_url: String,
    js_code: String,
}

impl AmapProxy {
    pub fn new(config: &AmapConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        let js_code = config.resolve_js_security_key().unwrap_or_default();
        if js_code.is_empty() {
            warn!(env = %config.js_security_key_env, "No map JS security key configured, proxied calls send an empty jscode");
        }

        Ok(Self {
            client,
            rest_base_url: config.base_url.trim_end_matches('/').to_string(),
            styles_base_url: config.styles_base_url.trim_end_matches('/').to_string(),
            vectormap_base_url: config.vectormap_base_url.trim_end_matches('/').to_string(),
            js_code,
        })
    }

    /// Style and vector map requests go to their fixed services, everything
    /// else to the REST API under the same path
    pub fn target_url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        if path.starts_with(STYLES_PREFIX) {
            format!("{}/{}", self.styles_base_url, STYLES_PREFIX)
        } else if path.starts_with(VECTORMAP_PREFIX) {
            format!("{}/{}", self.vectormap_base_url, VECTORMAP_PREFIX)
        } else {
            format!("{}/{}", self.rest_base_url, path)
        }
    }

    /// Caller parameters with `jscode` and `ip` replaced by ours
    pub fn upstream_query(
        &self,
        query: Vec<(String, String)>,
        client_ip: Option<IpAddr>,
    ) -> Vec<(String, String)> {
        let mut params: Vec<(String, String)> = query
            .into_iter()
            .filter(|(key, _)| key != "jscode" && key != "ip")
            .collect();

        params.push(("jscode".to_string(), self.js_code.clone()));
        if let Some(ip) = client_ip {
            params.push(("ip".to_string(), ip.to_string()));
        }
        params
    }

    pub async fn forward(&self, request: ProxyRequest) -> Result<ProxyResponse> {
        let url = self.target_url(&request.path);
        debug!(method = %request.method, url = %url, "Relaying map service request");

        let method = reqwest::Method::from_bytes(request.method.as_str().as_bytes())
            .map_err(|_| AppError::InvalidRequest(format!("unsupported method {}", request.method)))?;

        let mut builder = self
            .client
            .request(method, &url)
            .query(&self.upstream_query(request.query, request.client_ip));

        for (name, value) in request.headers.iter() {
            if SKIPPED_REQUEST_HEADERS.contains(&name.as_str()) {
                continue;
            }
            builder = builder.header(name.as_str(), value.as_bytes());
        }
        if !request.body.is_empty() {
            builder = builder.body(request.body);
        }

        let response = builder.send().await?;

        let status = StatusCode::from_u16(response.status().as_u16())
            .map_err(|e| AppError::Upstream(format!("invalid upstream status: {}", e)))?;

        let mut headers = HeaderMap::new();
        for (name, value) in response.headers() {
            if SKIPPED_RESPONSE_HEADERS.contains(&name.as_str()) {
                continue;
            }
            if let (Ok(name), Ok(value)) = (
                HeaderName::from_bytes(name.as_str().as_bytes()),
                HeaderValue::from_bytes(value.as_bytes()),
            ) {
                headers.append(name, value);
            }
        }
        if !headers.contains_key(CONTENT_TYPE) {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        let body = response.bytes().await?;

        Ok(ProxyResponse {
            status,
            headers,
            body,
        })
    }
}
