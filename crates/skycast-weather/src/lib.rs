//! Weather lookup client for skycast
//!
//! Provides typed access to the OpenWeatherMap current-conditions and
//! forecast endpoints, plus the per-day forecast reduction consumed by the
//! search session.

pub mod client;
pub mod error;
pub mod forecast;
pub mod types;

pub use client::WeatherClient;
pub use error::WeatherError;
pub use forecast::normalize_daily;
pub use types::*;
