//! Forecast normalization: reduce the provider's 3-hour series to one
//! representative sample per calendar day.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::error::WeatherError;
use crate::types::{ForecastDay, RawForecast};

/// Keep the first sample seen for each calendar date, in order of first
/// occurrence. The input series is chronological, so the result is one
/// entry per day in ascending date order, carrying the earliest reported
/// slot of that day.
///
/// Pure and deterministic: no clock access, no side effects.
///
/// # Errors
///
/// Returns [`WeatherError::Parse`] when a retained sample has an empty
/// conditions block (a malformed payload).
pub fn normalize_daily(forecast: &RawForecast) -> Result<Vec<ForecastDay>, WeatherError> {
    let mut seen: HashSet<NaiveDate> = HashSet::new();
    let mut days = Vec::new();

    for sample in &forecast.list {
        let date = sample.timestamp.date();
        if !seen.insert(date) {
            continue;
        }

        let condition = sample.weather.first().ok_or_else(|| {
            WeatherError::Parse(format!(
                "forecast sample for {} has no weather entries",
                date
            ))
        })?;

        days.push(ForecastDay {
            date,
            description: condition.description.clone(),
            icon: condition.icon.clone(),
            temperature: sample.main.temp,
        });
    }

    Ok(days)
}
