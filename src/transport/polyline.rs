//! Decoder for the `lng,lat;lng,lat;...` polyline strings returned by the
//! directions API.

use thiserror::Error;

use crate::transport::models::Coordinate;

/// Failure to decode a polyline string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolylineError {
    #[error("token '{0}' is not a 'lng,lat' pair")]
    MalformedToken(String),
}

/// Decode a semicolon separated list of `lng,lat` tokens.
///
/// An empty string yields no points. Any malformed token fails the whole
/// decode; tokens are never skipped.
pub fn decode(polyline: &str) -> Result<Vec<Coordinate>, PolylineError> {
    if polyline.is_empty() {
        return Ok(Vec::new());
    }

    polyline
        .split(';')
        .map(|token| {
            Coordinate::parse_pair(token)
                .ok_or_else(|| PolylineError::MalformedToken(token.to_string()))
        })
        .collect()
}
