//! Sources for the user's position.
//!
//! A terminal host has no permission-gated location API, so the position comes
//! from explicit coordinates or from an IP lookup. Turning `location_access`
//! off in the config plays the part of a denied permission.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt::Debug;
use tracing::{debug, warn};

use crate::{Config, error::LocationError, model::Location};

#[async_trait]
pub trait Geolocator: Send + Sync + Debug {
    async fn locate(&self) -> Result<Location, LocationError>;
}

#[async_trait]
impl<T: Geolocator + ?Sized> Geolocator for Box<T> {
    async fn locate(&self) -> Result<Location, LocationError> {
        (**self).locate().await
    }
}

/// Coordinates given up front, e.g. from `--lat/--lon`.
#[derive(Debug, Clone)]
pub struct FixedLocation(pub Location);

#[async_trait]
impl Geolocator for FixedLocation {
    async fn locate(&self) -> Result<Location, LocationError> {
        Ok(self.0.clone())
    }
}

/// Location access switched off.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledGeolocator;

#[async_trait]
impl Geolocator for DisabledGeolocator {
    async fn locate(&self) -> Result<Location, LocationError> {
        Err(LocationError::PermissionDenied)
    }
}

/// No position source available at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedGeolocator;

#[async_trait]
impl Geolocator for UnsupportedGeolocator {
    async fn locate(&self) -> Result<Location, LocationError> {
        Err(LocationError::Unsupported)
    }
}

/// Position derived from the public IP address via ip-api.com.
#[derive(Debug, Clone)]
pub struct IpGeolocator {
    url: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    country: Option<String>,
}

impl IpGeolocator {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), http: Client::new() }
    }

    async fn lookup(&self) -> Result<Location, String> {
        debug!(url = %self.url, "requesting IP geolocation");

        let res = self.http.get(&self.url).send().await.map_err(|e| e.to_string())?;

        let status = res.status();
        if !status.is_success() {
            return Err(format!("geolocation lookup returned status {status}"));
        }

        let body: IpApiResponse = res.json().await.map_err(|e| e.to_string())?;

        if body.status != "success" {
            return Err(body.message.unwrap_or_else(|| format!("status {}", body.status)));
        }

        let (Some(lat), Some(lon)) = (body.lat, body.lon) else {
            return Err("geolocation response carried no coordinates".to_string());
        };

        let location = Location::new(lat, lon);
        Ok(match (body.city, body.country) {
            (Some(city), Some(country)) => location.with_label(format!("{city}, {country}")),
            (Some(city), None) => location.with_label(city),
            _ => location,
        })
    }
}

#[async_trait]
impl Geolocator for IpGeolocator {
    async fn locate(&self) -> Result<Location, LocationError> {
        self.lookup().await.map_err(|reason| {
            warn!(%reason, "IP geolocation failed");
            LocationError::Unavailable { reason }
        })
    }
}

/// Pick the position source from explicit coordinates and config.
pub fn geolocator_from_config(
    coordinates: Option<(f64, f64)>,
    config: &Config,
) -> Box<dyn Geolocator> {
    match coordinates {
        Some((lat, lon)) => Box::new(FixedLocation(Location::new(lat, lon))),
        None if !config.location_access => Box::new(DisabledGeolocator),
        None if config.geolocation_url.trim().is_empty() => Box::new(UnsupportedGeolocator),
        None => Box::new(IpGeolocator::new(config.geolocation_url.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixed_location_returns_its_coordinates() {
        let loc = FixedLocation(Location::new(48.85, 2.35)).locate().await.unwrap();
        assert_eq!(loc, Location::new(48.85, 2.35));
    }

    #[tokio::test]
    async fn explicit_coordinates_win_over_disabled_access() {
        let cfg = Config { location_access: false, ..Config::default() };
        let loc = geolocator_from_config(Some((1.0, 2.0)), &cfg).locate().await.unwrap();
        assert_eq!(loc, Location::new(1.0, 2.0));
    }

    #[tokio::test]
    async fn disabled_access_is_permission_denied() {
        let cfg = Config { location_access: false, ..Config::default() };
        let err = geolocator_from_config(None, &cfg).locate().await.unwrap_err();
        assert!(matches!(err, LocationError::PermissionDenied));
    }

    #[tokio::test]
    async fn blank_lookup_url_is_unsupported() {
        let cfg = Config { geolocation_url: " ".into(), ..Config::default() };
        let err = geolocator_from_config(None, &cfg).locate().await.unwrap_err();
        assert!(matches!(err, LocationError::Unsupported));
    }
}
