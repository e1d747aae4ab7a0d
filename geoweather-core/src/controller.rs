use tracing::debug;

use crate::{geolocation::Geolocator, provider::WeatherProvider, state::AppState};

/// Drives one session: locate, fetch once, record the outcome.
#[derive(Debug)]
pub struct Controller<G, P> {
    geolocator: G,
    provider: P,
}

impl<G: Geolocator, P: WeatherProvider> Controller<G, P> {
    pub fn new(geolocator: G, provider: P) -> Self {
        Self { geolocator, provider }
    }

    /// Run the flow to completion. `state` ends as `Loaded` or `Error`.
    pub async fn run(&self, state: &mut AppState) {
        let location = match self.geolocator.locate().await {
            Ok(location) => location,
            Err(e) => {
                state.location_failed(&e);
                return;
            }
        };

        let Some(location) = state.location_resolved(location) else {
            debug!("location already resolved, skipping fetch");
            return;
        };

        match self.provider.fetch(&location).await {
            Ok(snapshot) => state.weather_loaded(snapshot),
            Err(e) => state.weather_failed(&e),
        }
    }
}
