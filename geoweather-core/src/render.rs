//! Text views over [`UiState`]. Pure: same state, zone and units give the same output.

use chrono::{DateTime, TimeZone};
use std::fmt::{Display, Write};

use crate::{
    clock::format_clock,
    icon::{IconSize, icon_glyph, icon_url},
    model::{DailyEntry, HourlyEntry, Units, WeatherSnapshot},
    state::{ErrorBanner, UiState},
};

pub const HOURLY_LIMIT: usize = 24;
pub const DAILY_LIMIT: usize = 7;

const PLACEHOLDER: &str = "--";
const SPINNER: &str = "⠋";

#[derive(Debug, Clone)]
pub struct Renderer<Tz: TimeZone> {
    tz: Tz,
    units: Units,
}

impl<Tz> Renderer<Tz>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    pub fn new(tz: Tz, units: Units) -> Self {
        Self { tz, units }
    }

    pub fn render(&self, state: &UiState) -> String {
        match state {
            UiState::Loading => loading(),
            UiState::Error(banner) => error_banner(banner),
            UiState::Loaded(snapshot) => self.loaded(snapshot),
        }
    }

    pub fn loaded(&self, snapshot: &WeatherSnapshot) -> String {
        [
            self.current(snapshot),
            self.hourly(&snapshot.hourly),
            self.weekly(&snapshot.daily),
        ]
        .join("\n")
    }

    pub fn current(&self, snapshot: &WeatherSnapshot) -> String {
        let mut out = match snapshot.name.as_deref().filter(|n| !n.is_empty()) {
            Some(name) => format!("Current Weather ({name})\n"),
            None => String::from("Current Weather\n"),
        };

        if let Some(icon) = snapshot.icon() {
            writeln!(out, "  {}  {}", icon_glyph(icon), icon_url(icon, IconSize::Large)).ok();
        }

        writeln!(out, "  {}", self.temperature(snapshot.temperature())).ok();
        writeln!(out, "  {}", snapshot.description().unwrap_or(PLACEHOLDER)).ok();
        writeln!(out, "  Humidity: {}%", or_placeholder(snapshot.humidity())).ok();
        writeln!(
            out,
            "  Wind Speed: {} {}",
            or_placeholder(snapshot.wind_speed()),
            self.units.speed_suffix()
        )
        .ok();

        out
    }

    /// First [`HOURLY_LIMIT`] entries, input order.
    pub fn hourly(&self, entries: &[HourlyEntry]) -> String {
        let mut out = String::from("24-Hour Forecast\n");
        if entries.is_empty() {
            out.push_str("  No forecast data\n");
            return out;
        }

        for entry in entries.iter().take(HOURLY_LIMIT) {
            writeln!(
                out,
                "  {:<5}  {}  {}",
                self.timestamp(entry.dt, "%H:%M"),
                entry.icon().map_or(PLACEHOLDER, icon_glyph),
                self.temperature(entry.temp),
            )
            .ok();
        }
        out
    }

    /// First [`DAILY_LIMIT`] entries, input order.
    pub fn weekly(&self, entries: &[DailyEntry]) -> String {
        let mut out = String::from("7-Day Forecast\n");
        if entries.is_empty() {
            out.push_str("  No forecast data\n");
            return out;
        }

        for entry in entries.iter().take(DAILY_LIMIT) {
            writeln!(
                out,
                "  {:<9}  {}  {}  {}",
                self.timestamp(entry.dt, "%A"),
                entry.icon().map_or(PLACEHOLDER, icon_glyph),
                self.temperature(entry.day_temperature()),
                self.temperature(entry.night_temperature()),
            )
            .ok();
        }
        out
    }

    pub fn navbar(&self, now: &DateTime<Tz>) -> String {
        format!("geoweather | {}", format_clock(now))
    }

    fn temperature(&self, value: Option<f64>) -> String {
        let suffix = self.units.temperature_suffix();
        match value {
            Some(t) => format!("{}{suffix}", t.round() as i64),
            None => format!("{PLACEHOLDER}{suffix}"),
        }
    }

    fn timestamp(&self, dt: Option<i64>, fmt: &str) -> String {
        dt.and_then(|secs| DateTime::from_timestamp(secs, 0))
            .map(|at| at.with_timezone(&self.tz).format(fmt).to_string())
            .unwrap_or_else(|| PLACEHOLDER.to_string())
    }
}

pub fn loading() -> String {
    format!("{SPINNER} Detecting your location...\n")
}

/// Dismissed banners render as nothing.
pub fn error_banner(banner: &ErrorBanner) -> String {
    if banner.dismissed {
        String::new()
    } else {
        format!("[x] {}!\n", banner.message)
    }
}

fn or_placeholder(value: Option<f64>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), |v| v.to_string())
}
