//! Wire schemas for the weather provider and the view models derived from
//! them.
//!
//! The raw types mirror the provider payloads field-for-field (only the
//! fields we consume) so that shape problems surface as parse errors at the
//! client boundary instead of ad hoc field access downstream.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::WeatherError;

/// Format of the combined date-time strings in forecast samples.
const PROVIDER_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const ICON_URL_BASE: &str = "https://openweathermap.org/img/wn";

fn deserialize_provider_datetime<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    NaiveDateTime::parse_from_str(&raw, PROVIDER_DATETIME_FORMAT)
        .map_err(serde::de::Error::custom)
}

/// One entry of the provider's conditions block.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCondition {
    pub description: String,
    pub icon: String,
}

/// The provider's measurements block.
#[derive(Debug, Clone, Deserialize)]
pub struct RawMeasurements {
    /// Celsius (requests always use metric units).
    pub temp: f64,
    /// Percent.
    pub humidity: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawWind {
    pub speed: f64,
}

/// Current-conditions payload as received from the `weather` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCurrent {
    /// Provider-canonicalized location name.
    pub name: String,
    pub weather: Vec<RawCondition>,
    pub main: RawMeasurements,
    pub wind: RawWind,
}

/// Forecast payload as received from the `forecast` endpoint: a
/// chronological series of 3-hour samples spanning roughly five days.
#[derive(Debug, Clone, Deserialize)]
pub struct RawForecast {
    pub list: Vec<ForecastSample>,
}

/// One 3-hour forecast slot.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastSample {
    #[serde(rename = "dt_txt", deserialize_with = "deserialize_provider_datetime")]
    pub timestamp: NaiveDateTime,
    pub weather: Vec<RawCondition>,
    pub main: RawMeasurements,
}

/// Both payloads of one combined lookup.
#[derive(Debug, Clone)]
pub struct CurrentAndForecast {
    pub current: RawCurrent,
    pub forecast: RawForecast,
}

/// Current conditions for one location at fetch time.
///
/// Immutable once constructed; the session replaces it wholesale on the next
/// completed fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub city: String,
    pub description: String,
    pub icon: String,
    /// Celsius.
    pub temperature: f64,
    /// Percent.
    pub humidity: u8,
    pub wind_speed: f64,
}

impl WeatherSnapshot {
    /// Build a snapshot from the raw current-conditions payload.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::Parse`] when the conditions block is empty,
    /// which counts as a malformed payload.
    pub fn from_raw(raw: &RawCurrent) -> Result<Self, WeatherError> {
        let condition = raw.weather.first().ok_or_else(|| {
            WeatherError::Parse("current conditions payload has no weather entries".to_string())
        })?;

        Ok(Self {
            city: raw.name.clone(),
            description: condition.description.clone(),
            icon: condition.icon.clone(),
            temperature: raw.main.temp,
            humidity: raw.main.humidity,
            wind_speed: raw.wind.speed,
        })
    }
}

/// One calendar day's representative forecast sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub description: String,
    pub icon: String,
    /// Celsius.
    pub temperature: f64,
}

/// Hosted image URL for a provider icon identifier.
pub fn icon_url(icon: &str) -> String {
    format!("{}/{}.png", ICON_URL_BASE, icon)
}
