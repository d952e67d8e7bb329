//! Forecast for a trip between two local dates

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use tracing::info;

use crate::backend::weather::{HourlyWeather, WeatherProvider};
use crate::error::{AppError, Result};

/// Convert a local `YYYY-MM-DD` date at `hour` o'clock to UTC
pub fn local_date_to_utc(date: &str, hour: u32, utc_offset_hours: i32) -> Result<DateTime<Utc>> {
    let invalid = || AppError::InvalidRequest(format!("invalid date '{}', expected YYYY-MM-DD", date));

    let naive = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| invalid())?
        .and_hms_opt(hour, 0, 0)
        .ok_or_else(invalid)?;

    let offset = FixedOffset::east_opt(utc_offset_hours * 3600)
        .ok_or_else(|| AppError::Internal(format!("invalid UTC offset {}", utc_offset_hours)))?;

    offset
        .from_local_datetime(&naive)
        .single()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(invalid)
}

/// Keep entries whose time lies within `[start, end]`; unparseable times are dropped
pub fn within(entries: Vec<HourlyWeather>, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<HourlyWeather> {
    entries
        .into_iter()
        .filter(|entry| {
            DateTime::parse_from_rfc3339(&entry.time)
                .map(|t| {
                    let t = t.with_timezone(&Utc);
                    start <= t && t <= end
                })
                .unwrap_or(false)
        })
        .collect()
}

/// Hourly forecast from 00:00 of `start_date` to 23:00 of `end_date`, local time
pub async fn forecast(
    provider: &dyn WeatherProvider,
    location: &str,
    start_date: &str,
    end_date: &str,
    utc_offset_hours: i32,
) -> Result<Vec<HourlyWeather>> {
    if location.trim().is_empty() || start_date.is_empty() || end_date.is_empty() {
        return Err(AppError::InvalidRequest(
            "location, start_date and end_date are required".into(),
        ));
    }

    let start = local_date_to_utc(start_date, 0, utc_offset_hours)?;
    let end = local_date_to_utc(end_date, 23, utc_offset_hours)?;
    if start > end {
        return Err(AppError::InvalidRequest("start_date must not be after end_date".into()));
    }

    let hours = within(provider.hourly_forecast(location, start, end).await?, start, end);
    info!(location = %location, hours = hours.len(), "Forecast retrieved");
    Ok(hours)
}
