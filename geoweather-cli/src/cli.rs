use std::{
    io::{self, Write},
    process::ExitCode,
};

use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand};
use geoweather_core::{
    AppState, Clock, Config, Controller, Product, Renderer, Units,
    clock::TICK,
    geolocation::geolocator_from_config,
    provider::provider_from_config,
};
use inquire::{Confirm, Password, PasswordDisplayMode, Select};
use tokio::sync::mpsc;
use tracing::debug;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "geoweather", version, about = "Weather for your current location")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Detect the location and show current, hourly and weekly weather.
    Show {
        /// Latitude; skips location detection when given with --lon.
        #[arg(long, allow_negative_numbers = true, requires = "lon")]
        lat: Option<f64>,

        /// Longitude; skips location detection when given with --lat.
        #[arg(long, allow_negative_numbers = true, requires = "lat")]
        lon: Option<f64>,

        /// Unit system: metric, imperial or standard.
        #[arg(long, value_parser = parse_units)]
        units: Option<Units>,

        /// API product: current or onecall.
        #[arg(long, value_parser = parse_product)]
        product: Option<Product>,
    },

    /// Show a live clock, updated every second.
    Clock {
        /// Stop after this many updates; runs until Ctrl-C otherwise.
        #[arg(long)]
        ticks: Option<u64>,
    },

    /// Interactively set the API key and display preferences.
    Configure,

    /// Print the path of the config file.
    ConfigPath,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Command::Show { lat, lon, units, product } => {
                let mut config = Config::load()?;
                if let Some(units) = units {
                    config.units = units;
                }
                if let Some(product) = product {
                    config.product = product;
                }
                show(&config, lat.zip(lon)).await
            }
            Command::Clock { ticks } => {
                let config = Config::load()?;
                clock(&config, ticks).await?;
                Ok(ExitCode::SUCCESS)
            }
            Command::Configure => {
                configure()?;
                Ok(ExitCode::SUCCESS)
            }
            Command::ConfigPath => {
                println!("{}", Config::config_file_path()?.display());
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

async fn show(config: &Config, coordinates: Option<(f64, f64)>) -> anyhow::Result<ExitCode> {
    let provider = provider_from_config(config)?;
    let geolocator = geolocator_from_config(coordinates, config);
    let renderer = Renderer::new(Local, config.units);
    let mut state = AppState::new();

    println!("{}", renderer.navbar(&Local::now()));
    eprint!("{}", renderer.render(state.ui()));

    Controller::new(geolocator, provider).run(&mut state).await;

    print!("{}", renderer.render(state.ui()));

    Ok(if state.is_error() { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

async fn clock(config: &Config, ticks: Option<u64>) -> anyhow::Result<()> {
    let renderer = Renderer::new(Local, config.units);
    let (tx, mut rx) = mpsc::unbounded_channel();
    let handle = Clock::start(TICK, move |now| {
        let _ = tx.send(now);
    });

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut shown = 0u64;
    let mut out = io::stdout();
    loop {
        tokio::select! {
            Some(now) = rx.recv() => {
                write!(out, "\r{}", renderer.navbar(&now))?;
                out.flush()?;
                shown += 1;
                if ticks.is_some_and(|limit| shown >= limit) {
                    break;
                }
            }
            _ = &mut ctrl_c => {
                debug!("interrupted");
                break;
            }
        }
    }

    handle.stop();
    writeln!(out)?;
    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let key = Password::new("OpenWeather API key (leave empty to keep the current one):")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .prompt()
        .context("Failed to read API key")?;
    if !key.trim().is_empty() {
        config.set_api_key(key);
    }

    let units = Units::all();
    let current = units.iter().position(|u| *u == config.units).unwrap_or(0);
    config.units = Select::new("Units:", units.to_vec())
        .with_starting_cursor(current)
        .prompt()
        .context("Failed to read units")?;

    let products = Product::all();
    let current = products.iter().position(|p| *p == config.product).unwrap_or(0);
    config.product = Select::new("API product:", products.to_vec())
        .with_starting_cursor(current)
        .prompt()
        .context("Failed to read API product")?;

    config.location_access = Confirm::new("Allow location lookup from your IP address?")
        .with_default(config.location_access)
        .prompt()
        .context("Failed to read location preference")?;

    config.save()?;
    println!("Configuration saved to {}", Config::config_file_path()?.display());
    Ok(())
}

fn parse_units(value: &str) -> Result<Units, String> {
    Units::try_from(value).map_err(|e| e.to_string())
}

fn parse_product(value: &str) -> Result<Product, String> {
    Product::try_from(value).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_accepts_negative_coordinates() {
        let cli =
            Cli::try_parse_from(["geoweather", "show", "--lat", "-33.9", "--lon", "18.4"])
                .unwrap();
        match cli.command {
            Command::Show { lat, lon, .. } => {
                assert_eq!(lat, Some(-33.9));
                assert_eq!(lon, Some(18.4));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn lat_without_lon_is_rejected() {
        assert!(Cli::try_parse_from(["geoweather", "show", "--lat", "1.0"]).is_err());
    }

    #[test]
    fn units_and_product_flags_parse() {
        let cli = Cli::try_parse_from([
            "geoweather", "show", "--units", "imperial", "--product", "onecall",
        ])
        .unwrap();
        match cli.command {
            Command::Show { units, product, .. } => {
                assert_eq!(units, Some(Units::Imperial));
                assert_eq!(product, Some(Product::OneCall));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn unknown_units_are_rejected() {
        assert!(Cli::try_parse_from(["geoweather", "show", "--units", "kelvin"]).is_err());
    }

    #[test]
    fn clock_ticks_flag() {
        let cli = Cli::try_parse_from(["geoweather", "clock", "--ticks", "3"]).unwrap();
        assert!(matches!(cli.command, Command::Clock { ticks: Some(3) }));
    }
}
