//! Hourly weather forecast client (Tomorrow.io v4)

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};
use utoipa::ToSchema;

use crate::config::WeatherConfig;
use crate::error::{AppError, Result};

/// Error text the frontend expects for an unknown location
pub const INVALID_LOCATION: &str = "INVALID_LOCATION";

const FORECAST_PATH: &str = "/v4/weather/forecast";
const FIELDS: [&str; 4] = ["temperature", "weatherCode", "humidity", "precipitationProbability"];

/// One simplified forecast hour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HourlyWeather {
    /// UTC, RFC 3339
    pub time: String,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub precipitation_probability: Option<f64>,
    pub weather_code: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    timelines: Timelines,
}

#[derive(Debug, Default, Deserialize)]
struct Timelines {
    #[serde(default)]
    hourly: Vec<HourlyEntry>,
}

#[derive(Debug, Deserialize)]
struct HourlyEntry {
    #[serde(default)]
    time: String,
    #[serde(default)]
    values: HourlyValues,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HourlyValues {
    temperature: Option<f64>,
    humidity: Option<f64>,
    precipitation_probability: Option<f64>,
    weather_code: Option<i64>,
}

/// Trait for forecast providers
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Hourly forecast between `start` and `end`.
    ///
    /// An unknown location is reported as `InvalidRequest(INVALID_LOCATION)`,
    /// any other upstream problem as `ServiceUnavailable`.
    async fn hourly_forecast(
        &self,
        location: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<HourlyWeather>>;
}

pub struct TomorrowClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl TomorrowClient {
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        let api_key = config.resolve_key();
        if api_key.is_none() {
            warn!(env = %config.api_key_env, "No weather API key configured");
        }

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }
}

fn unavailable() -> AppError {
    AppError::ServiceUnavailable("Weather service is temporarily unavailable, please try again later".into())
}

#[async_trait]
impl WeatherProvider for TomorrowClient {
    async fn hourly_forecast(
        &self,
        location: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<HourlyWeather>> {
        let url = format!("{}{}", self.base_url, FORECAST_PATH);

        let mut params: Vec<(&str, String)> = vec![
            ("location", location.to_string()),
            ("timesteps", "1h".to_string()),
            ("startTime", to_iso(start)),
            ("endTime", to_iso(end)),
        ];
        if let Some(key) = &self.api_key {
            params.push(("apikey", key.clone()));
        }
        params.extend(FIELDS.iter().map(|f| ("fields", f.to_string())));

        let response = self.client.get(&url).query(&params).send().await.map_err(|e| {
            warn!(error = %e, "Weather request failed");
            unavailable()
        })?;

        match response.status() {
            StatusCode::OK => {}
            StatusCode::BAD_REQUEST => {
                let body = response.text().await.unwrap_or_default();
                debug!(location = %location, body = %body, "Weather API rejected location");
                return Err(AppError::InvalidRequest(INVALID_LOCATION.into()));
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                warn!(status = %status, body = %body, "Weather API request failed");
                return Err(unavailable());
            }
        }

        let forecast: ForecastResponse = response.json().await.map_err(|e| {
            warn!(error = %e, "Failed to parse weather response");
            unavailable()
        })?;

        if forecast.timelines.hourly.is_empty() {
            debug!(location = %location, "Weather API returned an empty timeline");
            return Err(AppError::InvalidRequest(INVALID_LOCATION.into()));
        }

        Ok(forecast
            .timelines
            .hourly
            .into_iter()
            .map(|entry| HourlyWeather {
                time: entry.time,
                temperature: entry.values.temperature,
                humidity: entry.values.humidity,
                precipitation_probability: entry.values.precipitation_probability,
                weather_code: entry.values.weather_code,
            })
            .collect())
    }
}

/// `YYYY-MM-DDTHH:MM:SSZ`
pub fn to_iso(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}
