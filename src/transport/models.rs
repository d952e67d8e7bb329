//! Route query and result types

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

use crate::error::{AppError, Result};

/// A `(longitude, latitude)` pair, serialized as a two element array
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    pub lng: f64,
    pub lat: f64,
}

impl Coordinate {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// Parse a `lng,lat` string. Both halves must be finite numbers.
    pub fn parse_pair(s: &str) -> Option<Self> {
        let (lng, lat) = s.split_once(',')?;
        if lat.contains(',') {
            return None;
        }

        let lng: f64 = lng.trim().parse().ok()?;
        let lat: f64 = lat.trim().parse().ok()?;
        if !lng.is_finite() || !lat.is_finite() {
            return None;
        }

        Some(Self { lng, lat })
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([lng, lat]: [f64; 2]) -> Self {
        Self { lng, lat }
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(c: Coordinate) -> Self {
        [c.lng, c.lat]
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lng, self.lat)
    }
}

/// A resolved place: its coordinate plus the `lng,lat` text it was read from.
///
/// Upstream requests send the text, so a place given as coordinates reaches
/// the directions API exactly as the caller wrote it.
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    pub coordinate: Coordinate,
    text: String,
}

impl Waypoint {
    pub fn parse(s: &str) -> Option<Self> {
        Coordinate::parse_pair(s).map(|coordinate| Self {
            coordinate,
            text: s.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Waypoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// How a single path step is travelled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StepMode {
    Driving,
    Walking,
    Bus,
    Subway,
}

/// One normalized leg of a route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PathStep {
    pub mode: StepMode,
    /// Display text with markup removed
    pub instruction: String,
    #[schema(value_type = Vec<Vec<f64>>)]
    #[serde(default)]
    pub coordinates: Vec<Coordinate>,
}

/// Outcome of one travel mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RouteResult {
    Success {
        /// Whole minutes, rounded down
        #[serde(rename = "duration")]
        duration_minutes: u64,
        #[serde(rename = "distance")]
        distance_km: f64,
        path: Vec<PathStep>,
    },
    Error {
        message: String,
    },
}

impl RouteResult {
    pub fn error(message: impl Into<String>) -> Self {
        RouteResult::Error {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RouteResult::Success { .. })
    }
}

/// Results for every travel mode of one search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MultiModalRouteResponse {
    pub driving: RouteResult,
    pub transit: RouteResult,
    pub walking: RouteResult,
    pub subway: RouteResult,
}

/// Travel modes queried by a search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteMode {
    Driving,
    Transit,
    Walking,
    Subway,
}

impl RouteMode {
    pub const ALL: [RouteMode; 4] = [
        RouteMode::Driving,
        RouteMode::Transit,
        RouteMode::Walking,
        RouteMode::Subway,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RouteMode::Driving => "driving",
            RouteMode::Transit => "transit",
            RouteMode::Walking => "walking",
            RouteMode::Subway => "subway",
        }
    }

    /// Message reported when this mode cannot produce a route
    pub fn failure_message(&self) -> &'static str {
        match self {
            RouteMode::Driving => "Unable to fetch driving route",
            RouteMode::Transit => "Unable to fetch transit route",
            RouteMode::Walking => "Unable to fetch walking route",
            RouteMode::Subway => "Unable to fetch subway route",
        }
    }
}

impl fmt::Display for RouteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated `HH:MM` departure time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepartureTime(NaiveTime);

impl DepartureTime {
    /// Hours 0-23 and minutes 0-59, one or two digits each
    pub fn parse(s: &str) -> Option<Self> {
        NaiveTime::parse_from_str(s, "%H:%M").ok().map(Self)
    }

    pub fn time(&self) -> NaiveTime {
        self.0
    }
}

impl fmt::Display for DepartureTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

/// A route search that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct RouteQuery {
    pub city: String,
    pub origin: String,
    pub destination: String,
    pub departure: Option<DepartureTime>,
}

impl RouteQuery {
    /// Validate raw request fields. An empty departure time means "now".
    pub fn new(
        city: &str,
        origin: &str,
        destination: &str,
        departure_time: Option<&str>,
    ) -> Result<Self> {
        if city.trim().is_empty() {
            return Err(AppError::InvalidRequest("city must not be empty".into()));
        }
        if origin.trim().is_empty() || destination.trim().is_empty() {
            return Err(AppError::InvalidRequest(
                "origin and destination must not be empty".into(),
            ));
        }

        let departure = match departure_time.filter(|t| !t.is_empty()) {
            Some(raw) => Some(DepartureTime::parse(raw).ok_or_else(|| {
                AppError::InvalidRequest("departureTime must use the HH:MM format".into())
            })?),
            None => None,
        };

        Ok(Self {
            city: city.trim().to_string(),
            origin: origin.trim().to_string(),
            destination: destination.trim().to_string(),
            departure,
        })
    }
}
