//! Clothing and luggage advice from a weather forecast

use serde::{Deserialize, Serialize};
use std::fmt::Write;
use tracing::warn;
use utoipa::ToSchema;

use crate::backend::chat::{ChatBackend, ChatMessage};
use crate::error::{AppError, Result};

/// Only the first hours of a forecast go into the prompt
pub const MAX_SAMPLES: usize = 6;

/// Forecast hour as posted back by the client
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSample {
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub precipitation_probability: Option<f64>,
}

fn or_unknown(value: Option<f64>) -> String {
    value.map_or_else(|| "未知".to_string(), |v| v.to_string())
}

pub fn advice_prompt(samples: &[WeatherSample]) -> String {
    let mut prompt =
        String::from("我将在以下时间段出行，总结一些天气状况，并请根据天气数据给出穿衣建议和行李建议：\n\n");

    for sample in samples.iter().take(MAX_SAMPLES) {
        let _ = writeln!(
            prompt,
            "时间：{}，温度：{}℃，降雨概率：{}%",
            sample.time.as_deref().unwrap_or("未知时间"),
            or_unknown(sample.temperature),
            or_unknown(sample.precipitation_probability),
        );
    }

    prompt.push_str("\n请告诉我该穿什么、是否需要带伞或其他物品，简洁清晰，分点给出回答，每一点换一行");
    prompt
}

pub async fn travel_advice(backend: &dyn ChatBackend, samples: &[WeatherSample]) -> Result<String> {
    if samples.is_empty() {
        return Err(AppError::InvalidRequest("weather data is required".into()));
    }

    backend
        .complete(vec![ChatMessage::user(advice_prompt(samples))])
        .await
        .map_err(|e| {
            warn!(backend = %backend.name(), error = %e, "Travel advice failed");
            AppError::Internal("Failed to get travel advice, please try again later".into())
        })
}
