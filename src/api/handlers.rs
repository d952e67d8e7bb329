//! HTTP request handlers for route search and saved items

use crate::api::extract::ApiJson;
use crate::api::models::{
    HealthResponse, NewSpotRequest, RouteSavedResponse, SearchRequest, SpotSavedResponse,
    SuccessResponse,
};
use crate::error::AppError;
use crate::store::{NewRoute, SavedRoute, SavedSpot};
use crate::transport::MultiModalRouteResponse;
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use tracing::info;

/// Search routes for every travel mode
#[utoipa::path(
    post,
    path = "/api/transport/search",
    tag = "Transport",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Per-mode results; individual modes may report errors", body = MultiModalRouteResponse),
        (status = 400, description = "Invalid search", body = crate::api::models::ErrorResponse),
    )
)]
pub async fn search_transport(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<SearchRequest>,
) -> Result<Json<MultiModalRouteResponse>, AppError> {
    info!(
        city = %request.city,
        origin = %request.origin,
        destination = %request.destination,
        departure_time = ?request.departure_time,
        "Received route search"
    );

    let response = state
        .planner
        .plan(
            &request.city,
            &request.origin,
            &request.destination,
            request.departure_time.as_deref(),
        )
        .await?;

    Ok(Json(response))
}

/// List saved routes
#[utoipa::path(
    get,
    path = "/api/saved_routes",
    tag = "Saved",
    responses((status = 200, body = Vec<SavedRoute>))
)]
pub async fn list_saved_routes(State(state): State<Arc<AppState>>) -> Json<Vec<SavedRoute>> {
    Json(state.routes.list())
}

/// Save a route
#[utoipa::path(
    post,
    path = "/api/saved_routes",
    tag = "Saved",
    request_body = NewRoute,
    responses((status = 200, body = RouteSavedResponse))
)]
pub async fn save_route(
    State(state): State<Arc<AppState>>,
    ApiJson(route): ApiJson<NewRoute>,
) -> Json<RouteSavedResponse> {
    let route = state.routes.add_route(route);
    Json(RouteSavedResponse {
        success: true,
        route,
    })
}

/// Delete a saved route. Unknown ids are not an error.
#[utoipa::path(
    delete,
    path = "/api/saved_routes/{id}",
    tag = "Saved",
    params(("id" = u64, Path, description = "Saved route id")),
    responses((status = 200, body = SuccessResponse))
)]
pub async fn delete_saved_route(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Json<SuccessResponse> {
    let removed = state.routes.remove(id);
    info!(id, removed, "Delete saved route");
    Json(SuccessResponse { success: true })
}

/// List saved attractions
#[utoipa::path(
    get,
    path = "/api/saved_spots",
    tag = "Saved",
    responses((status = 200, body = Vec<SavedSpot>))
)]
pub async fn list_saved_spots(State(state): State<Arc<AppState>>) -> Json<Vec<SavedSpot>> {
    Json(state.spots.list())
}

/// Save an attraction
#[utoipa::path(
    post,
    path = "/api/saved_spots",
    tag = "Saved",
    request_body = NewSpotRequest,
    responses(
        (status = 200, body = SpotSavedResponse),
        (status = 400, description = "Empty name", body = crate::api::models::ErrorResponse),
        (status = 409, description = "Already saved", body = crate::api::models::ErrorResponse),
    )
)]
pub async fn add_saved_spot(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<NewSpotRequest>,
) -> Result<Json<SpotSavedResponse>, AppError> {
    let spot = state
        .spots
        .add_spot(&request.name, state.settings.saved.reject_duplicate_spots)?;

    Ok(Json(SpotSavedResponse {
        success: true,
        spot,
    }))
}

/// Delete a saved attraction. Unknown ids are not an error.
#[utoipa::path(
    delete,
    path = "/api/saved_spots/{id}",
    tag = "Saved",
    params(("id" = u64, Path, description = "Saved spot id")),
    responses((status = 200, body = SuccessResponse))
)]
pub async fn delete_saved_spot(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Json<SuccessResponse> {
    let removed = state.spots.remove(id);
    info!(id, removed, "Delete saved spot");
    Json(SuccessResponse { success: true })
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses((status = 200, body = HealthResponse))
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
