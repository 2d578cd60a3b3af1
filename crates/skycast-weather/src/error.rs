//! Weather-service error types.

use thiserror::Error;

/// Failure of either outbound call or of decoding its payload.
///
/// Callers collapse all variants into a single user-visible failure; the
/// distinction exists for logging and diagnostics only.
#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("City not found: {0}")]
    CityNotFound(String),

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("API error: {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_status() {
        let err = WeatherError::Api {
            status: 503,
            message: "unavailable".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("503"));
        assert!(msg.contains("unavailable"));
    }

    #[test]
    fn test_display_city_not_found() {
        let err = WeatherError::CityNotFound("Nowhereistan".to_string());
        assert!(err.to_string().contains("Nowhereistan"));
    }
}
