//! Place name to coordinate resolution

use tracing::debug;

use crate::backend::amap::MapProvider;
use crate::error::{AppError, Result};
use crate::transport::models::Waypoint;

/// Resolve `place` within `city`.
///
/// A place that already reads as `lng,lat` is returned unchanged, text
/// included, without asking the provider. Otherwise the first geocode of a successful lookup is used.
/// Every failure, transport errors included, is [`AppError::GeocodeFailed`].
pub async fn resolve(provider: &dyn MapProvider, city: &str, place: &str) -> Result<Waypoint> {
    if let Some(waypoint) = Waypoint::parse(place) {
        return Ok(waypoint);
    }

    let response = provider.geocode(place, city).await.map_err(|e| {
        debug!(place = %place, error = %e, "Geocoding request failed");
        AppError::GeocodeFailed(place.to_string())
    })?;
    if !response.is_success() {
        debug!(place = %place, status = %response.status, info = %response.info, "Geocoding returned no result");
        return Err(AppError::GeocodeFailed(place.to_string()));
    }

    response
        .geocodes
        .first()
        .and_then(|geocode| Waypoint::parse(&geocode.location))
        .ok_or_else(|| AppError::GeocodeFailed(place.to_string()))
}
