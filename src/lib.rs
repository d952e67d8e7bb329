//! Travel Planner Gateway
//!
//! Backend for a travel planning frontend: multi-modal route search over a
//! map directions service, saved attractions and routes, plus AI attraction
//! suggestions, hourly weather and weather-based travel advice.

pub mod api;
pub mod assistant;
pub mod backend;
pub mod config;
pub mod error;
pub mod store;
pub mod transport;

pub use error::{AppError, Result};

use std::sync::Arc;
use std::time::Duration;

use backend::{AmapClient, AmapProxy, ChatBackend, OpenAICompatibleBackend, TomorrowClient, WeatherProvider};
use config::Settings;
use store::{RouteStore, SpotStore};
use transport::RoutePlanner;

/// Application state shared across all handlers
pub struct AppState {
    pub settings: Arc<Settings>,
    pub planner: Arc<RoutePlanner>,
    pub spots: Arc<SpotStore>,
    pub routes: Arc<RouteStore>,
    pub suggest_backend: Arc<dyn ChatBackend>,
    pub advice_backend: Arc<dyn ChatBackend>,
    pub weather: Arc<dyn WeatherProvider>,
    pub map_proxy: Arc<AmapProxy>,
}

impl AppState {
    /// Build every upstream client from configuration, with empty stores
    pub fn from_settings(settings: Settings) -> Result<Self> {
        let amap = Arc::new(AmapClient::new(&settings.amap)?);
        let planner = RoutePlanner::new(amap, Duration::from_millis(settings.amap.route_timeout_ms));

        let suggest_backend = Arc::new(OpenAICompatibleBackend::new(&settings.assistant.suggest)?);
        let advice_backend = Arc::new(OpenAICompatibleBackend::new(&settings.assistant.advice)?);
        let weather = Arc::new(TomorrowClient::new(&settings.weather)?);
        let map_proxy = Arc::new(AmapProxy::new(&settings.amap)?);

        Ok(Self {
            settings: Arc::new(settings),
            planner: Arc::new(planner),
            spots: Arc::new(SpotStore::new()),
            routes: Arc::new(RouteStore::new()),
            suggest_backend,
            advice_backend,
            weather,
            map_proxy,
        })
    }
}
