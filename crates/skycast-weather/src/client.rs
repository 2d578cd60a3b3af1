//! OpenWeatherMap API client.

use tracing::instrument;

use crate::error::WeatherError;
use crate::types::{CurrentAndForecast, RawCurrent, RawForecast};

const OPENWEATHER_API_BASE: &str = "https://api.openweathermap.org/data/2.5";

/// Measurement-unit preference sent with every request.
const UNITS: &str = "metric";

/// Client for the provider's current-conditions and forecast endpoints.
///
/// Holds no lookup state beyond the connection pool; one instance serves
/// any number of lookups. No retries, no caching, transport-default
/// timeouts.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl WeatherClient {
    pub fn new(api_key: &str) -> Self {
        Self::with_base_url(api_key, OPENWEATHER_API_BASE)
    }

    /// Point the client at a non-default endpoint (configured override, or
    /// a mock server in tests).
    pub fn with_base_url(api_key: &str, base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch current conditions and the 5-day/3-hour forecast for a city.
    ///
    /// The two requests are issued sequentially (conditions first); either
    /// failure fails the combined lookup, with no partial result. Callers
    /// enforce that `city` is non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError`] when either request fails or either payload
    /// does not decode.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_current_and_forecast(
        &self,
        city: &str,
    ) -> Result<CurrentAndForecast, WeatherError> {
        let current = self.fetch_current(city).await?;
        let forecast = self.fetch_forecast(city).await?;
        Ok(CurrentAndForecast { current, forecast })
    }

    /// Fetch the current-conditions payload.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError`] on transport failure, a non-success status,
    /// or an undecodable body.
    #[instrument(skip(self), level = "debug")]
    pub async fn fetch_current(&self, city: &str) -> Result<RawCurrent, WeatherError> {
        let url = self.endpoint_url("weather", city);
        let response = self.client.get(&url).send().await?;
        self.handle_response(response).await
    }

    /// Fetch the raw 3-hour forecast series.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError`] on transport failure, a non-success status,
    /// or an undecodable body.
    #[instrument(skip(self), level = "debug")]
    pub async fn fetch_forecast(&self, city: &str) -> Result<RawForecast, WeatherError> {
        let url = self.endpoint_url("forecast", city);
        let response = self.client.get(&url).send().await?;
        self.handle_response(response).await
    }

    fn endpoint_url(&self, endpoint: &str, city: &str) -> String {
        format!(
            "{}/{}?q={}&appid={}&units={}",
            self.base_url,
            endpoint,
            urlencoding::encode(city),
            urlencoding::encode(&self.api_key),
            UNITS,
        )
    }

    /// Helper to handle API responses and errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, WeatherError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| WeatherError::Parse(format!("JSON parse error: {}", e)))
        } else if status.as_u16() == 401 {
            Err(WeatherError::InvalidApiKey)
        } else if status.as_u16() == 404 {
            let text = response.text().await.unwrap_or_default();
            Err(WeatherError::CityNotFound(text))
        } else {
            let text = response.text().await.unwrap_or_default();
            Err(WeatherError::Api {
                status: status.as_u16(),
                message: text,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn current_body() -> serde_json::Value {
        serde_json::json!({
            "name": "Paris",
            "weather": [{"description": "clear sky", "icon": "01d"}],
            "main": {"temp": 18.5, "humidity": 55},
            "wind": {"speed": 3.1}
        })
    }

    fn forecast_body() -> serde_json::Value {
        serde_json::json!({
            "list": [
                {
                    "dt_txt": "2024-01-01 00:00:00",
                    "weather": [{"description": "light rain", "icon": "10d"}],
                    "main": {"temp": 6.0, "humidity": 80}
                },
                {
                    "dt_txt": "2024-01-02 00:00:00",
                    "weather": [{"description": "overcast clouds", "icon": "04d"}],
                    "main": {"temp": 7.5, "humidity": 75}
                }
            ]
        })
    }

    #[tokio::test]
    async fn test_fetch_current_and_forecast() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("q", "Paris"))
            .and(query_param("appid", "test_key"))
            .and(query_param("units", "metric"))
            .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/forecast"))
            .and(query_param("q", "Paris"))
            .and(query_param("appid", "test_key"))
            .and(query_param("units", "metric"))
            .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
            .mount(&mock_server)
            .await;

        let client = WeatherClient::with_base_url("test_key", &mock_server.uri());
        let payload = client.fetch_current_and_forecast("Paris").await.unwrap();

        assert_eq!(payload.current.name, "Paris");
        assert_eq!(payload.current.weather[0].icon, "01d");
        assert_eq!(payload.forecast.list.len(), 2);
    }

    #[tokio::test]
    async fn test_city_query_is_url_encoded() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("q", "New York"))
            .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
            .mount(&mock_server)
            .await;

        let client = WeatherClient::with_base_url("test_key", &mock_server.uri());
        let result = client.fetch_current("New York").await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_unknown_city_maps_to_city_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({"cod": "404", "message": "city not found"})),
            )
            .mount(&mock_server)
            .await;

        let client = WeatherClient::with_base_url("test_key", &mock_server.uri());
        let result = client.fetch_current_and_forecast("Nowhereistan").await;

        assert!(matches!(result, Err(WeatherError::CityNotFound(_))));
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_invalid_api_key() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let client = WeatherClient::with_base_url("bad_key", &mock_server.uri());
        let result = client.fetch_current("Paris").await;

        assert!(matches!(result, Err(WeatherError::InvalidApiKey)));
    }

    #[tokio::test]
    async fn test_server_error_maps_to_api_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
            .mount(&mock_server)
            .await;

        let client = WeatherClient::with_base_url("test_key", &mock_server.uri());
        let result = client.fetch_current("Paris").await;

        match result {
            Err(WeatherError::Api { status, message }) => {
                assert_eq!(status, 503);
                assert_eq!(message, "unavailable");
            }
            other => panic!("expected Api error, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_maps_to_parse_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let client = WeatherClient::with_base_url("test_key", &mock_server.uri());
        let result = client.fetch_current("Paris").await;

        assert!(matches!(result, Err(WeatherError::Parse(_))));
    }

    #[tokio::test]
    async fn test_forecast_failure_fails_combined_lookup() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = WeatherClient::with_base_url("test_key", &mock_server.uri());
        let result = client.fetch_current_and_forecast("Paris").await;

        assert!(matches!(result, Err(WeatherError::CityNotFound(_))));
    }
}
