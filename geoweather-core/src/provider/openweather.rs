use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::{
    config::DEFAULT_API_BASE_URL,
    error::WeatherFetchError,
    model::{Location, Product, Units, WeatherSnapshot},
};

use super::WeatherProvider;

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    units: Units,
    product: Product,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_API_BASE_URL.to_string(),
            units: Units::default(),
            product: Product::default(),
            http: Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_units(mut self, units: Units) -> Self {
        self.units = units;
        self
    }

    pub fn with_product(mut self, product: Product) -> Self {
        self.product = product;
        self
    }

    pub fn units(&self) -> Units {
        self.units
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, self.product.path())
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn fetch(&self, location: &Location) -> Result<WeatherSnapshot, WeatherFetchError> {
        let url = self.endpoint();
        debug!(%url, lat = location.latitude, lon = location.longitude, "fetching weather");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("lat", location.latitude.to_string()),
                ("lon", location.longitude.to_string()),
                ("units", self.units.as_str().to_string()),
                ("appid", self.api_key.clone()),
            ])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "OpenWeather request failed");
            return Err(WeatherFetchError::Status(status.as_u16()));
        }

        let body = res.text().await?;
        let snapshot: WeatherSnapshot = serde_json::from_str(&body)?;

        debug!(
            hourly = snapshot.hourly.len(),
            daily = snapshot.daily.len(),
            "weather payload decoded"
        );
        Ok(snapshot)
    }
}
