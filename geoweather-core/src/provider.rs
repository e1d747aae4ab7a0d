use crate::{Config, error::WeatherFetchError, model::{Location, WeatherSnapshot}};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// The single outbound weather request.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch(&self, location: &Location) -> Result<WeatherSnapshot, WeatherFetchError>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<OpenWeatherProvider> {
    let api_key = config.require_api_key()?;

    Ok(OpenWeatherProvider::new(api_key.to_owned())
        .with_base_url(config.api_base_url.clone())
        .with_units(config.units)
        .with_product(config.product))
}
