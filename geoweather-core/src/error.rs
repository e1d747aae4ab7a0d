use thiserror::Error;

/// Failure to obtain the user's position. Terminal for the session.
#[derive(Debug, Error)]
pub enum LocationError {
    /// Location access has been turned off by the user.
    #[error("Please enable location access for accurate weather data")]
    PermissionDenied,

    /// No geolocation source exists on this host.
    #[error("Geolocation is not supported on this system")]
    Unsupported,

    /// The source was reachable in principle but could not produce a position.
    #[error("Unable to determine your location")]
    Unavailable { reason: String },
}

/// Failure of the single weather request. Terminal for the session.
#[derive(Debug, Error)]
pub enum WeatherFetchError {
    #[error("Failed to fetch weather data: HTTP error! status: {0}")]
    Status(u16),

    /// The request URL is stripped so the `appid` query never reaches the message.
    #[error("Failed to fetch weather data: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Failed to fetch weather data: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for WeatherFetchError {
    fn from(e: reqwest::Error) -> Self {
        WeatherFetchError::Network(e.without_url())
    }
}
