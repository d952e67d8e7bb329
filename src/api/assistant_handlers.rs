//! Travel assistant handlers: attraction suggestions, weather and advice

use crate::api::extract::ApiJson;
use crate::api::models::{
    AdviceRequest, AdviceResponse, SuggestRequest, SuggestResponse, WeatherRequest,
    WeatherResponse,
};
use crate::assistant;
use crate::error::AppError;
use crate::AppState;
use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::info;

/// Suggest attractions for a destination
#[utoipa::path(
    post,
    path = "/api/ai/suggest",
    tag = "Assistant",
    request_body = SuggestRequest,
    responses(
        (status = 200, body = SuggestResponse),
        (status = 400, description = "Missing location", body = crate::api::models::ErrorResponse),
    )
)]
pub async fn suggest(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<SuggestRequest>,
) -> Result<Json<SuggestResponse>, AppError> {
    let location = request.location.trim();
    if location.is_empty() {
        return Err(AppError::InvalidRequest("location is required".into()));
    }

    info!(location = %location, "Received attraction suggestion request");
    let suggestion = assistant::suggest_attractions(state.suggest_backend.as_ref(), location).await;

    Ok(Json(SuggestResponse { suggestion }))
}

/// Hourly forecast for the trip dates
#[utoipa::path(
    post,
    path = "/api/weather",
    tag = "Assistant",
    request_body = WeatherRequest,
    responses(
        (status = 200, body = WeatherResponse),
        (status = 400, description = "Missing parameters or INVALID_LOCATION", body = crate::api::models::ErrorResponse),
        (status = 503, description = "Weather service unavailable", body = crate::api::models::ErrorResponse),
    )
)]
pub async fn weather(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<WeatherRequest>,
) -> Result<Json<WeatherResponse>, AppError> {
    info!(
        location = %request.location,
        start_date = %request.start_date,
        end_date = %request.end_date,
        "Received weather request"
    );

    let weather = assistant::forecast(
        state.weather.as_ref(),
        &request.location,
        &request.start_date,
        &request.end_date,
        state.settings.weather.utc_offset_hours,
    )
    .await?;

    Ok(Json(WeatherResponse { weather }))
}

/// Clothing and luggage advice for a forecast
#[utoipa::path(
    post,
    path = "/api/advice",
    tag = "Assistant",
    request_body = AdviceRequest,
    responses(
        (status = 200, body = AdviceResponse),
        (status = 400, description = "Missing weather data", body = crate::api::models::ErrorResponse),
        (status = 500, description = "Advice backend failed", body = crate::api::models::ErrorResponse),
    )
)]
pub async fn advice(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<AdviceRequest>,
) -> Result<Json<AdviceResponse>, AppError> {
    info!(hours = request.weather.len(), "Received travel advice request");

    let advice = assistant::travel_advice(state.advice_backend.as_ref(), &request.weather).await?;
    Ok(Json(AdviceResponse { advice }))
}
