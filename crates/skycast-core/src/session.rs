//! Search session: the single-writer view state behind the dashboard.
//!
//! The session owns the current query, the last successful weather snapshot
//! and normalized forecast, the loading/error flags, the display mode, and
//! the recent-search history. All mutation happens here, in response to
//! user-initiated search, refresh, and history-recall events; the view layer
//! only ever reads [`SessionState`].

use skycast_weather::{
    normalize_daily, CurrentAndForecast, ForecastDay, WeatherClient, WeatherError,
    WeatherSnapshot,
};

use crate::history::SearchHistory;

/// The one user-facing failure message. Fetch-error detail goes to the logs
/// and is never surfaced in the session state.
pub const SEARCH_FAILED_MESSAGE: &str = "City not found. Please try again.";

/// Request lifecycle of the most recent search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchState {
    #[default]
    Idle,
    Loading,
    Success,
    Failed,
}

/// Identifier for one issued search.
///
/// Tickets increase monotonically; completions carrying anything but the
/// most recently issued ticket are discarded, so the latest *request* wins
/// regardless of completion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket(u64);

/// Aggregate view state rendered by the view layer.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// Current input text.
    pub query: String,
    /// Last successful current-conditions reading, if any.
    pub snapshot: Option<WeatherSnapshot>,
    /// Normalized forecast matching `snapshot`. Empty when absent.
    pub forecast: Vec<ForecastDay>,
    /// User-facing error message, if the last search failed.
    pub error: Option<String>,
    pub fetch: FetchState,
    /// Display mode. Toggles independently of fetching.
    pub dark_mode: bool,
    pub history: SearchHistory,
}

impl SessionState {
    pub fn is_loading(&self) -> bool {
        self.fetch == FetchState::Loading
    }
}

/// Orchestrates lookups and owns the session state for one user visit.
pub struct SearchSession {
    client: WeatherClient,
    state: SessionState,
    /// Ticket of the most recently issued search.
    issued: u64,
}

impl SearchSession {
    pub fn new(client: WeatherClient) -> Self {
        Self {
            client,
            state: SessionState::default(),
            issued: 0,
        }
    }

    /// Session starting in a non-default display mode.
    pub fn with_dark_mode(client: WeatherClient, dark_mode: bool) -> Self {
        let mut session = Self::new(client);
        session.state.dark_mode = dark_mode;
        session
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Update the current input text.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.state.query = query.into();
    }

    /// Take the current input text, clearing the field (submit semantics).
    pub fn take_query(&mut self) -> String {
        std::mem::take(&mut self.state.query)
    }

    /// Flip the display mode.
    pub fn toggle_dark_mode(&mut self) {
        self.state.dark_mode = !self.state.dark_mode;
    }

    /// Look up a city and apply the result.
    ///
    /// Returns false when the search was a no-op (empty name) or its
    /// completion was discarded as stale.
    pub async fn search(&mut self, city: &str) -> bool {
        let Some(ticket) = self.begin_search(city) else {
            return false;
        };
        let result = self.client.fetch_current_and_forecast(city).await;
        self.complete_search(ticket, city, result)
    }

    /// Re-run the last successful lookup. No-op without a snapshot.
    pub async fn refresh(&mut self) -> bool {
        let Some(city) = self.state.snapshot.as_ref().map(|s| s.city.clone()) else {
            tracing::debug!("refresh ignored: no prior successful search");
            return false;
        };
        self.search(&city).await
    }

    /// Search for a history entry by index. No-op for an absent index.
    pub async fn recall(&mut self, index: usize) -> bool {
        let Some(city) = self.state.history.get(index).map(str::to_string) else {
            return false;
        };
        self.search(&city).await
    }

    /// Enter `Loading` and issue a ticket for a new search.
    ///
    /// Returns `None` without any state change when the city name is empty;
    /// the session does not validate names beyond non-emptiness.
    pub fn begin_search(&mut self, city: &str) -> Option<SearchTicket> {
        if city.is_empty() {
            return None;
        }

        self.issued += 1;
        self.state.fetch = FetchState::Loading;
        self.state.error = None;
        Some(SearchTicket(self.issued))
    }

    /// Apply a completed fetch for a previously issued ticket.
    ///
    /// A completion that is not the most recently issued ticket is dropped
    /// without touching the state. On success the snapshot and forecast are
    /// replaced and the searched name is promoted in the history; on failure
    /// (either request, or a malformed payload) the snapshot is cleared, the
    /// forecast emptied, and the single user-facing message set. The history
    /// is never modified by a failed search.
    pub fn complete_search(
        &mut self,
        ticket: SearchTicket,
        city: &str,
        result: Result<CurrentAndForecast, WeatherError>,
    ) -> bool {
        if ticket.0 != self.issued {
            tracing::debug!(
                ticket = ticket.0,
                latest = self.issued,
                "discarding stale search completion"
            );
            return false;
        }

        match result.and_then(|payload| Self::build_view(&payload)) {
            Ok((snapshot, forecast)) => {
                tracing::info!(%city, days = forecast.len(), "weather lookup succeeded");
                self.state.snapshot = Some(snapshot);
                self.state.forecast = forecast;
                self.state.error = None;
                self.state.fetch = FetchState::Success;
                self.state.history.record(city);
            }
            Err(err) => {
                tracing::warn!(%city, error = %err, "weather lookup failed");
                self.state.snapshot = None;
                self.state.forecast.clear();
                self.state.error = Some(SEARCH_FAILED_MESSAGE.to_string());
                self.state.fetch = FetchState::Failed;
            }
        }

        true
    }

    fn build_view(
        payload: &CurrentAndForecast,
    ) -> Result<(WeatherSnapshot, Vec<ForecastDay>), WeatherError> {
        let snapshot = WeatherSnapshot::from_raw(&payload.current)?;
        let forecast = normalize_daily(&payload.forecast)?;
        Ok((snapshot, forecast))
    }
}
