//! Environment-sourced configuration.
//!
//! The dashboard is configured entirely from the process environment at
//! startup: a provider credential, an optional endpoint override, and the
//! initial display mode. A missing credential is deliberately not a hard
//! failure; requests will simply be rejected by the provider.

use serde::{Deserialize, Serialize};
use url::Url;

use skycast_weather::WeatherClient;

/// Environment variable holding the provider credential.
pub const ENV_API_KEY: &str = "OPENWEATHER_API_KEY";

/// Environment variable overriding the provider base URL.
pub const ENV_BASE_URL: &str = "OPENWEATHER_BASE_URL";

/// Environment variable selecting the initial display mode (`1` or `true`).
pub const ENV_DARK_MODE: &str = "SKYCAST_DARK_MODE";

/// Configuration validation issue.
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Weather provider settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// UI preferences
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Provider API key. Empty when the environment does not supply one.
    pub api_key: String,

    /// Optional endpoint override (proxies, tests).
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    /// Dark mode enabled at startup
    pub dark_mode: bool,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self {
            weather: WeatherConfig {
                api_key: std::env::var(ENV_API_KEY).unwrap_or_default(),
                base_url: std::env::var(ENV_BASE_URL).ok(),
            },
            ui: UiConfig {
                dark_mode: std::env::var(ENV_DARK_MODE)
                    .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                    .unwrap_or(false),
            },
        }
    }

    /// Validate the configuration.
    ///
    /// Returns a ValidationResult containing any errors or warnings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        if self.weather.api_key.is_empty() {
            result.add_warning(
                "weather.api_key",
                format!("{} is not set - lookups will fail", ENV_API_KEY),
            );
        }

        if let Some(base_url) = &self.weather.base_url {
            match Url::parse(base_url) {
                Ok(url) => {
                    if url.scheme() != "http" && url.scheme() != "https" {
                        result.add_error(
                            "weather.base_url",
                            format!("URL must use http or https scheme, got: {}", url.scheme()),
                        );
                    }
                    if url.host().is_none() {
                        result.add_error("weather.base_url", "URL must have a host");
                    }
                }
                Err(e) => {
                    result.add_error("weather.base_url", format!("Invalid URL: {}", e));
                }
            }
        }

        result
    }

    /// Build the weather client for this configuration, honoring the
    /// endpoint override when present.
    pub fn weather_client(&self) -> WeatherClient {
        match &self.weather.base_url {
            Some(base_url) => WeatherClient::with_base_url(&self.weather.api_key, base_url),
            None => WeatherClient::new(&self.weather.api_key),
        }
    }
}
