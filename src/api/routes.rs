//! HTTP route definitions

use crate::api::models::*;
use crate::api::{assistant_handlers, handlers, proxy_handlers};
use crate::assistant::WeatherSample;
use crate::backend::HourlyWeather;
use crate::config::CorsConfig;
use crate::store::{NewRoute, SavedRoute, SavedSpot};
use crate::transport::{MultiModalRouteResponse, PathStep, RouteResult, StepMode};
use axum::{
    http::HeaderValue,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Travel Planner Gateway API",
        description = "Route search across driving, transit, walking and subway, plus attraction suggestions, weather and travel advice.",
        license(name = "MIT"),
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development server")
    ),
    paths(
        handlers::search_transport,
        handlers::list_saved_routes,
        handlers::save_route,
        handlers::delete_saved_route,
        handlers::list_saved_spots,
        handlers::add_saved_spot,
        handlers::delete_saved_spot,
        handlers::health_check,
        assistant_handlers::suggest,
        assistant_handlers::weather,
        assistant_handlers::advice,
    ),
    components(schemas(
        SearchRequest,
        MultiModalRouteResponse,
        RouteResult,
        PathStep,
        StepMode,
        NewRoute,
        SavedRoute,
        SavedSpot,
        NewSpotRequest,
        SpotSavedResponse,
        RouteSavedResponse,
        SuggestRequest,
        SuggestResponse,
        WeatherRequest,
        WeatherResponse,
        HourlyWeather,
        AdviceRequest,
        AdviceResponse,
        WeatherSample,
        HealthResponse,
        SuccessResponse,
        ErrorResponse,
    )),
    tags(
        (name = "Transport", description = "Multi-modal route search"),
        (name = "Saved", description = "Saved attractions and routes"),
        (name = "Assistant", description = "Attraction suggestions, weather and travel advice"),
        (name = "Health", description = "Health endpoint"),
    )
)]
pub struct ApiDoc;

/// Create the main application router
pub fn create_router(state: Arc<crate::AppState>) -> Router {
    let cors = cors_layer(&state.settings.cors);

    let api_routes = Router::new()
        .route("/transport/search", post(handlers::search_transport))
        .route(
            "/saved_routes",
            get(handlers::list_saved_routes).post(handlers::save_route),
        )
        .route("/saved_routes/:id", delete(handlers::delete_saved_route))
        .route(
            "/saved_spots",
            get(handlers::list_saved_spots).post(handlers::add_saved_spot),
        )
        .route("/saved_spots/:id", delete(handlers::delete_saved_spot))
        .route("/ai/suggest", post(assistant_handlers::suggest))
        .route("/weather", post(assistant_handlers::weather))
        .route("/advice", post(assistant_handlers::advice));

    Router::new()
        // Health check endpoint
        .route("/health", get(handlers::health_check))
        // Map SDK web service relay
        .route(
            "/_AMapService/*path",
            get(proxy_handlers::amap_service).post(proxy_handlers::amap_service),
        )
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api_routes)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Any origin when none are configured, otherwise exactly the configured ones
fn cors_layer(config: &CorsConfig) -> CorsLayer {
    if config.allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
