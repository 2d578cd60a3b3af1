//! Session core for the skycast weather dashboard.
//!
//! Owns configuration, logging setup, and the search session state machine
//! that the view layer renders from.

pub mod config;
pub mod history;
pub mod session;

pub use config::{Config, UiConfig, ValidationResult, WeatherConfig};
pub use history::SearchHistory;
pub use session::{
    FetchState, SearchSession, SearchTicket, SessionState, SEARCH_FAILED_MESSAGE,
};

use anyhow::Result;

/// Initialize logging for the application.
///
/// # Errors
///
/// Currently infallible; returns `Result` to leave room for startup wiring.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("skycast core initialized");
    Ok(())
}
