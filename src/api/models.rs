//! API request and response models

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::assistant::WeatherSample;
use crate::backend::HourlyWeather;
use crate::store::{SavedRoute, SavedSpot};

/// Multi-modal route search
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub destination: String,
    /// `HH:MM`; omitted or empty means now
    #[serde(default)]
    pub departure_time: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct NewSpotRequest {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct SpotSavedResponse {
    pub success: bool,
    pub spot: SavedSpot,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct RouteSavedResponse {
    pub success: bool,
    pub route: SavedRoute,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct SuggestRequest {
    #[serde(default)]
    pub location: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct SuggestResponse {
    pub suggestion: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct WeatherRequest {
    #[serde(default)]
    pub location: String,
    /// Local date, `YYYY-MM-DD`
    #[serde(default)]
    pub start_date: String,
    /// Local date, `YYYY-MM-DD`
    #[serde(default)]
    pub end_date: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct WeatherResponse {
    pub weather: Vec<HourlyWeather>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct AdviceRequest {
    #[serde(default)]
    pub weather: Vec<WeatherSample>,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct AdviceResponse {
    pub advice: String,
}

/// Health check response
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Generic success response
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Error body returned with every non-2xx status
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
