//! Multi-modal route aggregation

use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::backend::amap::MapProvider;
use crate::error::Result;
use crate::transport::fetcher::RouteFetcher;
use crate::transport::models::{MultiModalRouteResponse, RouteMode, RouteQuery};

/// Answers a route search across every travel mode
pub struct RoutePlanner {
    fetcher: RouteFetcher,
}

impl RoutePlanner {
    pub fn new(provider: Arc<dyn MapProvider>, route_timeout: Duration) -> Self {
        Self {
            fetcher: RouteFetcher::new(provider, route_timeout),
        }
    }

    /// Validate the raw search fields, then aggregate.
    ///
    /// Validation failures return before any upstream call is made.
    pub async fn plan(
        &self,
        city: &str,
        origin: &str,
        destination: &str,
        departure_time: Option<&str>,
    ) -> Result<MultiModalRouteResponse> {
        let query = RouteQuery::new(city, origin, destination, departure_time)?;
        Ok(self.aggregate(&query).await)
    }

    /// Query all modes concurrently. One mode failing leaves the others intact.
    pub async fn aggregate(&self, query: &RouteQuery) -> MultiModalRouteResponse {
        let (driving, transit, walking, subway) = futures::join!(
            self.fetcher.fetch(RouteMode::Driving, query),
            self.fetcher.fetch(RouteMode::Transit, query),
            self.fetcher.fetch(RouteMode::Walking, query),
            self.fetcher.fetch(RouteMode::Subway, query),
        );

        info!(
            city = %query.city,
            origin = %query.origin,
            destination = %query.destination,
            driving = driving.is_success(),
            transit = transit.is_success(),
            walking = walking.is_success(),
            subway = subway.is_success(),
            "Route search completed"
        );

        MultiModalRouteResponse {
            driving,
            transit,
            walking,
            subway,
        }
    }
}
