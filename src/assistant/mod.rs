//! Travel assistant features built on the chat and weather backends

pub mod advice;
pub mod forecast;
pub mod suggest;

pub use advice::{travel_advice, WeatherSample};
pub use forecast::forecast;
pub use suggest::suggest_attractions;

#[cfg(test)]
pub(crate) mod testing;
