//! Explicit state container for the fetch-and-render flow.

use tracing::info;

use crate::{
    error::{LocationError, WeatherFetchError},
    model::{Location, WeatherSnapshot},
};

/// What the screen shows. Exactly one at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum UiState {
    Loading,
    Error(ErrorBanner),
    Loaded(Box<WeatherSnapshot>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ErrorBanner {
    pub message: String,
    pub dismissed: bool,
}

impl ErrorBanner {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), dismissed: false }
    }
}

/// Session state. The location is set at most once.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    ui: UiState,
    location: Option<Location>,
}

impl Default for AppState {
    fn default() -> Self {
        Self { ui: UiState::Loading, location: None }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    pub fn is_error(&self) -> bool {
        matches!(self.ui, UiState::Error(_))
    }

    /// Record a resolved position. Returns the location to fetch for on the
    /// first resolution only; later resolutions are ignored.
    pub fn location_resolved(&mut self, location: Location) -> Option<Location> {
        if self.location.is_some() || !matches!(self.ui, UiState::Loading) {
            return None;
        }

        info!(lat = location.latitude, lon = location.longitude, "location resolved");
        self.location = Some(location.clone());
        Some(location)
    }

    pub fn location_failed(&mut self, error: &LocationError) {
        info!(%error, "location unavailable");
        self.ui = UiState::Error(ErrorBanner::new(error.to_string()));
    }

    pub fn weather_loaded(&mut self, snapshot: WeatherSnapshot) {
        info!("weather loaded");
        self.ui = UiState::Loaded(Box::new(snapshot));
    }

    pub fn weather_failed(&mut self, error: &WeatherFetchError) {
        info!(%error, "weather fetch failed");
        self.ui = UiState::Error(ErrorBanner::new(error.to_string()));
    }

    /// Hide the error banner. No effect in other states.
    pub fn dismiss_error(&mut self) {
        if let UiState::Error(banner) = &mut self.ui {
            banner.dismissed = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_loading_without_location() {
        let state = AppState::new();
        assert_eq!(state.ui(), &UiState::Loading);
        assert!(state.location().is_none());
    }

    #[test]
    fn location_is_handed_out_once() {
        let mut state = AppState::new();

        let first = state.location_resolved(Location::new(10.0, 20.0));
        let second = state.location_resolved(Location::new(30.0, 40.0));

        assert_eq!(first, Some(Location::new(10.0, 20.0)));
        assert_eq!(second, None);
        assert_eq!(state.location(), Some(&Location::new(10.0, 20.0)));
    }

    #[test]
    fn location_failure_sets_error() {
        let mut state = AppState::new();
        state.location_failed(&LocationError::PermissionDenied);

        match state.ui() {
            UiState::Error(banner) => {
                assert!(banner.message.contains("enable location access"));
                assert!(!banner.dismissed);
            }
            other => panic!("expected error, got {other:?}"),
        }
        assert!(state.location_resolved(Location::new(1.0, 1.0)).is_none());
    }

    #[test]
    fn fetch_failure_and_dismiss() {
        let mut state = AppState::new();
        state.location_resolved(Location::new(1.0, 2.0));
        state.weather_failed(&WeatherFetchError::Status(500));

        state.dismiss_error();

        assert_eq!(
            state.ui(),
            &UiState::Error(ErrorBanner {
                message: "Failed to fetch weather data: HTTP error! status: 500".into(),
                dismissed: true,
            })
        );
    }

    #[test]
    fn dismiss_is_noop_when_loaded() {
        let mut state = AppState::new();
        state.weather_loaded(WeatherSnapshot::default());
        state.dismiss_error();
        assert!(matches!(state.ui(), UiState::Loaded(_)));
    }
}
