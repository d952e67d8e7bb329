//! Multi-modal route search: geocoding, per-mode fetchers and path normalization

pub mod fetcher;
pub mod geocoder;
pub mod models;
pub mod normalizer;
pub mod planner;
pub mod polyline;


pub use fetcher::RouteFetcher;
pub use models::{
    Coordinate, MultiModalRouteResponse, PathStep, RouteMode, RouteQuery, RouteResult, StepMode,
};
pub use planner::RoutePlanner;
