//! Per-mode route fetchers

use chrono::Local;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::backend::amap::types::{DirectionResponse, RoutePath, Transit};
use crate::backend::amap::{MapProvider, TransitQuery};
use crate::error::{AppError, Result};
use crate::transport::geocoder;
use crate::transport::models::{
    DepartureTime, RouteMode, RouteQuery, RouteResult, StepMode, Waypoint,
};
use crate::transport::normalizer::{self, is_subway_line};

/// Reported when origin or destination cannot be resolved
pub const ROUTE_UNAVAILABLE: &str = "Route unavailable";

/// Fetches and normalizes a single travel mode.
///
/// Failures never escape: geocoding, upstream, parse and timeout errors all
/// turn into [`RouteResult::Error`].
#[derive(Clone)]
pub struct RouteFetcher {
    provider: Arc<dyn MapProvider>,
    timeout: Duration,
}

impl RouteFetcher {
    pub fn new(provider: Arc<dyn MapProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    pub async fn fetch(&self, mode: RouteMode, query: &RouteQuery) -> RouteResult {
        let outcome = tokio::time::timeout(self.timeout, self.try_fetch(mode, query)).await;

        match outcome {
            Ok(Ok(result)) => result,
            Ok(Err(AppError::GeocodeFailed(place))) => {
                warn!(mode = %mode, place = %place, "Could not resolve place");
                RouteResult::error(ROUTE_UNAVAILABLE)
            }
            Ok(Err(e)) => {
                warn!(mode = %mode, error = %e, "Route query failed");
                RouteResult::error(mode.failure_message())
            }
            Err(_) => {
                warn!(mode = %mode, timeout_ms = self.timeout.as_millis() as u64, "Route query timed out");
                RouteResult::error(mode.failure_message())
            }
        }
    }

    async fn try_fetch(&self, mode: RouteMode, query: &RouteQuery) -> Result<RouteResult> {
        let provider = self.provider.as_ref();
        let origin = geocoder::resolve(provider, &query.city, &query.origin).await?;
        let destination = geocoder::resolve(provider, &query.city, &query.destination).await?;

        debug!(mode = %mode, origin = %origin, destination = %destination, "Querying directions");

        match mode {
            RouteMode::Driving => {
                let response = provider.driving(&origin, &destination).await?;
                path_route(&response, StepMode::Driving)
            }
            RouteMode::Walking => {
                let response = provider.walking(&origin, &destination).await?;
                path_route(&response, StepMode::Walking)
            }
            RouteMode::Transit => {
                let transit_query = transit_query(query, origin, destination, false);
                let response = provider.transit(&transit_query).await?;
                ensure_success(&response)?;

                let transit = transits(&response)
                    .first()
                    .ok_or_else(|| AppError::NoRoute("no transit alternative".to_string()))?;
                transit_route(transit)
            }
            RouteMode::Subway => {
                let transit_query = transit_query(query, origin, destination, true);
                let response = provider.transit(&transit_query).await?;
                ensure_success(&response)?;

                let transit = transits(&response)
                    .iter()
                    .find(|t| uses_subway(t))
                    .ok_or_else(|| AppError::NoRoute("no alternative uses the subway".to_string()))?;
                transit_route(transit)
            }
        }
    }
}

fn transit_query(
    query: &RouteQuery,
    origin: Waypoint,
    destination: Waypoint,
    exclude_night_bus: bool,
) -> TransitQuery {
    TransitQuery {
        origin,
        destination,
        city: query.city.clone(),
        departure_time: query.departure.map(departure_param),
        exclude_night_bus,
    }
}

/// Today's date combined with the requested clock time
fn departure_param(departure: DepartureTime) -> String {
    Local::now()
        .date_naive()
        .and_time(departure.time())
        .format("%Y%m%d %H:%M")
        .to_string()
}

fn ensure_success(response: &DirectionResponse) -> Result<()> {
    if response.is_success() {
        Ok(())
    } else {
        Err(AppError::Upstream(format!(
            "status={} count={} info={}",
            response.status, response.count, response.info
        )))
    }
}

fn transits(response: &DirectionResponse) -> &[Transit] {
    response
        .route
        .as_ref()
        .map_or(&[][..], |route| route.transits.as_slice())
}

fn uses_subway(transit: &Transit) -> bool {
    transit.segments.iter().any(|segment| {
        segment
            .bus
            .as_ref()
            .map_or(false, |bus| bus.buslines.iter().any(|line| is_subway_line(&line.name)))
    })
}

fn path_route(response: &DirectionResponse, mode: StepMode) -> Result<RouteResult> {
    ensure_success(response)?;

    let path: &RoutePath = response
        .route
        .as_ref()
        .and_then(|route| route.paths.first())
        .ok_or_else(|| AppError::NoRoute(format!("no {:?} path returned", mode)))?;

    Ok(RouteResult::Success {
        duration_minutes: duration_minutes(&path.duration)?,
        distance_km: distance_km(&path.distance)?,
        path: normalizer::normalize_steps(&path.steps, mode)?,
    })
}

fn transit_route(transit: &Transit) -> Result<RouteResult> {
    Ok(RouteResult::Success {
        duration_minutes: duration_minutes(&transit.duration)?,
        distance_km: distance_km(&transit.distance)?,
        path: normalizer::normalize_segments(&transit.segments)?,
    })
}

/// Seconds to whole minutes, rounding down
fn duration_minutes(seconds: &str) -> Result<u64> {
    seconds
        .trim()
        .parse::<u64>()
        .map(|s| s / 60)
        .map_err(|_| AppError::Upstream(format!("invalid duration '{}'", seconds)))
}

fn distance_km(metres: &str) -> Result<f64> {
    match metres.trim().parse::<f64>() {
        Ok(m) if m.is_finite() && m >= 0.0 => Ok(m / 1000.0),
        _ => Err(AppError::Upstream(format!("invalid distance '{}'", metres))),
    }
}
