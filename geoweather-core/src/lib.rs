//! Core library for the `geoweather` CLI.
//!
//! This crate defines:
//! - Configuration handling
//! - Geolocation sources and the OpenWeather provider
//! - The session state container and the controller that drives it
//! - Text views and the display clock
//!
//! It is used by `geoweather-cli`, but can also be reused by other binaries.

pub mod clock;
pub mod config;
pub mod controller;
pub mod error;
pub mod geolocation;
pub mod icon;
pub mod model;
pub mod provider;
pub mod render;
pub mod state;

pub use clock::{Clock, ClockHandle};
pub use config::Config;
pub use controller::Controller;
pub use error::{LocationError, WeatherFetchError};
pub use geolocation::Geolocator;
pub use model::{Location, Product, Units, WeatherSnapshot};
pub use provider::{OpenWeatherProvider, WeatherProvider};
pub use render::Renderer;
pub use state::{AppState, UiState};
