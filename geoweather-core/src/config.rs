use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::model::{Product, Units};

pub const DEFAULT_API_BASE_URL: &str = "https://api.openweathermap.org";
pub const DEFAULT_GEOLOCATION_URL: &str = "http://ip-api.com/json/";

/// API key injected at build time, if any.
const BUILD_API_KEY: Option<&str> = option_env!("OPENWEATHER_API_KEY");

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// units = "metric"
/// product = "onecall"
/// location_access = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub units: Units,
    pub product: Product,
    /// When false, geolocation is refused as if the user denied permission.
    pub location_access: bool,
    pub api_base_url: String,
    pub geolocation_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            units: Units::default(),
            product: Product::default(),
            location_access: true,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            geolocation_url: DEFAULT_GEOLOCATION_URL.to_string(),
        }
    }
}

impl Config {
    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "geoweather", "geoweather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// API key from the config file, falling back to the one baked in at build time.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .or(BUILD_API_KEY)
    }

    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key().ok_or_else(|| {
            anyhow!(
                "No OpenWeather API key configured.\n\
                 Hint: run `geoweather configure` and enter your API key."
            )
        })
    }

    pub fn set_api_key(&mut self, api_key: String) {
        let trimmed = api_key.trim();
        self.api_key = if trimmed.is_empty() { None } else { Some(trimmed.to_string()) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_metric_and_current_product() {
        let cfg = Config::default();

        assert_eq!(cfg.units, Units::Metric);
        assert_eq!(cfg.product, Product::Current);
        assert!(cfg.location_access);
        assert_eq!(cfg.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn partial_toml_keeps_defaults_for_missing_fields() {
        let cfg = Config::from_toml("units = \"imperial\"\nlocation_access = false\n").unwrap();

        assert_eq!(cfg.units, Units::Imperial);
        assert!(!cfg.location_access);
        assert_eq!(cfg.product, Product::Current);
        assert_eq!(cfg.geolocation_url, DEFAULT_GEOLOCATION_URL);
    }

    #[test]
    fn toml_roundtrip_preserves_values() {
        let mut cfg = Config { product: Product::OneCall, ..Config::default() };
        cfg.set_api_key("KEY".into());

        let text = toml::to_string_pretty(&cfg).unwrap();
        let parsed = Config::from_toml(&text).unwrap();

        assert_eq!(parsed, cfg);
    }

    #[test]
    fn invalid_units_are_rejected() {
        assert!(Config::from_toml("units = \"kelvin\"").is_err());
    }

    #[test]
    fn set_api_key_trims_and_clears_blank() {
        let mut cfg = Config::default();

        cfg.set_api_key("  OPEN_KEY \n".into());
        assert_eq!(cfg.api_key(), Some("OPEN_KEY"));

        cfg.set_api_key("   ".into());
        assert_eq!(cfg.api_key, None);
    }

    #[test]
    fn require_api_key_hints_at_configure() {
        let cfg = Config::default();
        if BUILD_API_KEY.is_none() {
            let err = cfg.require_api_key().unwrap_err();
            assert!(err.to_string().contains("geoweather configure"));
        }
    }
}
