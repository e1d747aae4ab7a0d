use serde::{Deserialize, Serialize};
use std::fmt;

/// Coordinates the weather is fetched for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    /// Place label when the geolocation source knows one.
    #[serde(default)]
    pub label: Option<String>,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude, label: None }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Unit system passed to the API as `units=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
    Standard,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
            Units::Standard => "standard",
        }
    }

    pub const fn all() -> &'static [Units] {
        &[Units::Metric, Units::Imperial, Units::Standard]
    }

    pub fn temperature_suffix(&self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
            Units::Standard => "K",
        }
    }

    pub fn speed_suffix(&self) -> &'static str {
        match self {
            Units::Imperial => "mph",
            Units::Metric | Units::Standard => "m/s",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Units {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            "standard" => Ok(Units::Standard),
            _ => Err(anyhow::anyhow!(
                "Unknown unit system '{value}'. Supported: metric, imperial, standard."
            )),
        }
    }
}

/// Which OpenWeather product is queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Product {
    /// `/data/2.5/weather`: current conditions only.
    #[default]
    Current,
    /// `/data/3.0/onecall`: current conditions plus hourly and daily arrays.
    OneCall,
}

impl Product {
    pub fn as_str(&self) -> &'static str {
        match self {
            Product::Current => "current",
            Product::OneCall => "onecall",
        }
    }

    pub const fn all() -> &'static [Product] {
        &[Product::Current, Product::OneCall]
    }

    pub fn path(&self) -> &'static str {
        match self {
            Product::Current => "/data/2.5/weather",
            Product::OneCall => "/data/3.0/onecall",
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Product {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "current" => Ok(Product::Current),
            "onecall" => Ok(Product::OneCall),
            _ => Err(anyhow::anyhow!("Unknown product '{value}'. Supported: current, onecall.")),
        }
    }
}

/// Decoded API payload. Read-only; every field is optional.
///
/// The `/weather` product puts current readings under `main`/`wind`/`weather`,
/// the One Call product under `current`. Accessors check the former first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub weather: Vec<Condition>,
    #[serde(default)]
    pub main: Option<MainReadings>,
    #[serde(default)]
    pub wind: Option<Wind>,
    #[serde(default)]
    pub current: Option<CurrentReadings>,
    #[serde(default)]
    pub hourly: Vec<HourlyEntry>,
    #[serde(default)]
    pub daily: Vec<DailyEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MainReadings {
    #[serde(default)]
    pub temp: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    #[serde(default)]
    pub speed: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentReadings {
    #[serde(default)]
    pub temp: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
    #[serde(default)]
    pub wind_speed: Option<f64>,
    #[serde(default)]
    pub weather: Vec<Condition>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HourlyEntry {
    /// Unix seconds.
    #[serde(default)]
    pub dt: Option<i64>,
    #[serde(default)]
    pub temp: Option<f64>,
    #[serde(default)]
    pub weather: Vec<Condition>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyEntry {
    /// Unix seconds.
    #[serde(default)]
    pub dt: Option<i64>,
    #[serde(default)]
    pub temp: Option<DailyTemperature>,
    #[serde(default)]
    pub weather: Vec<Condition>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyTemperature {
    #[serde(default)]
    pub day: Option<f64>,
    #[serde(default)]
    pub night: Option<f64>,
}

impl WeatherSnapshot {
    fn condition(&self) -> Option<&Condition> {
        self.weather
            .first()
            .or_else(|| self.current.as_ref().and_then(|c| c.weather.first()))
    }

    pub fn temperature(&self) -> Option<f64> {
        self.main
            .as_ref()
            .and_then(|m| m.temp)
            .or_else(|| self.current.as_ref().and_then(|c| c.temp))
    }

    pub fn humidity(&self) -> Option<f64> {
        self.main
            .as_ref()
            .and_then(|m| m.humidity)
            .or_else(|| self.current.as_ref().and_then(|c| c.humidity))
    }

    pub fn wind_speed(&self) -> Option<f64> {
        self.wind
            .as_ref()
            .and_then(|w| w.speed)
            .or_else(|| self.current.as_ref().and_then(|c| c.wind_speed))
    }

    pub fn icon(&self) -> Option<&str> {
        self.condition().and_then(|c| c.icon.as_deref())
    }

    pub fn description(&self) -> Option<&str> {
        self.condition().and_then(|c| c.description.as_deref())
    }
}

impl HourlyEntry {
    pub fn icon(&self) -> Option<&str> {
        self.weather.first().and_then(|c| c.icon.as_deref())
    }
}

impl DailyEntry {
    pub fn icon(&self) -> Option<&str> {
        self.weather.first().and_then(|c| c.icon.as_deref())
    }

    pub fn day_temperature(&self) -> Option<f64> {
        self.temp.as_ref().and_then(|t| t.day)
    }

    pub fn night_temperature(&self) -> Option<f64> {
        self.temp.as_ref().and_then(|t| t.night)
    }
}
