//! HTTP implementation of [`MapProvider`] for the AMap REST API

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, warn};

use super::types::{DirectionResponse, GeocodeResponse};
use super::{MapProvider, TransitQuery};
use crate::config::AmapConfig;
use crate::error::{AppError, Result};
use crate::transport::models::Waypoint;

const GEOCODE_PATH: &str = "/v3/geocode/geo";
const DRIVING_PATH: &str = "/v3/direction/driving";
const WALKING_PATH: &str = "/v3/direction/walking";
const TRANSIT_PATH: &str = "/v3/direction/transit/integrated";

pub struct AmapClient {
    client: Client,
    base_url: String,
    key: Option<String>,
    driving_strategy: u32,
}

impl AmapClient {
    pub fn new(config: &AmapConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        let key = config.resolve_key();
        if key.is_none() {
            warn!(env = %config.key_env, "No AMap key configured, upstream calls will be rejected");
        }

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            key,
            driving_strategy: config.driving_strategy,
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, params: &[(&str, String)]) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "Calling AMap");

        let mut request = self.client.get(&url).query(params);
        if let Some(key) = &self.key {
            request = request.query(&[("key", key)]);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "AMap returned {}: {}",
                status, body
            )));
        }

        response.json::<T>().await.map_err(|e| {
            error!(path = %path, error = %e, "Failed to parse AMap response");
            AppError::Upstream(format!("Failed to parse response: {}", e))
        })
    }
}

#[async_trait]
impl MapProvider for AmapClient {
    async fn geocode(&self, address: &str, city: &str) -> Result<GeocodeResponse> {
        self.get(
            GEOCODE_PATH,
            &[("address", address.to_string()), ("city", city.to_string())],
        )
        .await
    }

    async fn driving(
        &self,
        origin: &Waypoint,
        destination: &Waypoint,
    ) -> Result<DirectionResponse> {
        self.get(
            DRIVING_PATH,
            &[
                ("origin", origin.to_string()),
                ("destination", destination.to_string()),
                ("extensions", "base".to_string()),
                ("strategy", self.driving_strategy.to_string()),
            ],
        )
        .await
    }

    async fn walking(
        &self,
        origin: &Waypoint,
        destination: &Waypoint,
    ) -> Result<DirectionResponse> {
        self.get(
            WALKING_PATH,
            &[
                ("origin", origin.to_string()),
                ("destination", destination.to_string()),
            ],
        )
        .await
    }

    async fn transit(&self, query: &TransitQuery) -> Result<DirectionResponse> {
        let mut params = vec![
            ("origin", query.origin.to_string()),
            ("destination", query.destination.to_string()),
            ("city", query.city.clone()),
            ("extensions", "base".to_string()),
        ];
        if query.exclude_night_bus {
            params.push(("nightflag", "0".to_string()));
        }
        if let Some(departure) = &query.departure_time {
            params.push(("departure_time", departure.clone()));
        }

        self.get(TRANSIT_PATH, &params).await
    }
}
