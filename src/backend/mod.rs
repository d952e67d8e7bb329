//! Upstream service clients: map/directions, weather forecast and chat completion

pub mod amap;
pub mod chat;
pub mod weather;

pub use amap::{AmapClient, AmapProxy, MapProvider};
pub use chat::{ChatBackend, ChatMessage, OpenAICompatibleBackend};
pub use weather::{HourlyWeather, TomorrowClient, WeatherProvider};
