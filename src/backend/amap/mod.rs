//! AMap web service client: geocoding and directions

pub mod client;
pub mod proxy;
pub mod types;

use async_trait::async_trait;

use crate::error::Result;
use crate::transport::models::Waypoint;

pub use client::AmapClient;
pub use proxy::{AmapProxy, ProxyRequest, ProxyResponse};
pub use types::{DirectionResponse, GeocodeResponse};

/// Parameters of a public transport directions query
#[derive(Debug, Clone, PartialEq)]
pub struct TransitQuery {
    pub origin: Waypoint,
    pub destination: Waypoint,
    pub city: String,
    /// `YYYYMMDD HH:MM`
    pub departure_time: Option<String>,
    pub exclude_night_bus: bool,
}

/// Trait for map providers consumed by the route planner
#[async_trait]
pub trait MapProvider: Send + Sync {
    /// Resolve a free-form address within a city
    async fn geocode(&self, address: &str, city: &str) -> Result<GeocodeResponse>;

    async fn driving(&self, origin: &Waypoint, destination: &Waypoint)
        -> Result<DirectionResponse>;

    async fn walking(&self, origin: &Waypoint, destination: &Waypoint)
        -> Result<DirectionResponse>;

    async fn transit(&self, query: &TransitQuery) -> Result<DirectionResponse>;
}
