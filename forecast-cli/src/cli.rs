use anyhow::Context;
use clap::{Parser, Subcommand};
use forecast_core::{
    Config, DisplayContext, ForecastRequest, ForecastResponse, Location, UnitSystem,
    provider_from_config,
};
use inquire::{Password, PasswordDisplayMode, Select, Text};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{info, warn};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "Current weather and a four-day forecast")]
pub struct Cli {
    /// Print debug logs to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key, location and preferred units.
    Configure,

    /// Show current weather and the next four days.
    Show {
        /// Unit system, "metric" or "imperial"; defaults to the configured one.
        #[arg(long, value_parser = parse_units)]
        units: Option<UnitSystem>,

        /// Location as "latitude,longitude"; defaults to the configured one.
        #[arg(long, value_parser = parse_location)]
        location: Option<Location>,

        /// Read a saved provider response instead of calling the provider.
        #[arg(long)]
        from_file: Option<PathBuf>,

        /// Print the normalized model as JSON.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { units, location, from_file, json } => {
                show(units, location, from_file, json).await
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;
    let path = Config::config_file_path()?;
    println!("{}", configure_banner(&config, &path));

    let api_key = Password::new("Forecast.io API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?;

    let current_location = config.location.map(|l| l.to_string()).unwrap_or_default();
    let location = Text::new("Location (latitude,longitude):")
        .with_default(&current_location)
        .prompt()?;
    let location = Location::try_from(location.as_str())?;

    let start = UnitSystem::all().iter().position(|u| *u == config.units).unwrap_or(0);
    let units = Select::new("Units:", UnitSystem::all().to_vec())
        .with_starting_cursor(start)
        .prompt()?;

    config.set_api_key(api_key.trim().to_string());
    config.set_location(location);
    config.set_units(units);
    config.save()?;

    info!(path = %path.display(), "configuration saved");
    println!("Saved configuration to {}", path.display());

    Ok(())
}

async fn show(
    units: Option<UnitSystem>,
    location: Option<Location>,
    from_file: Option<PathBuf>,
    json: bool,
) -> anyhow::Result<()> {
    let config = Config::load()?;
    let units = units.unwrap_or(config.units);

    let response = match from_file {
        Some(path) => read_response(&path)?,
        None => {
            let location = match location {
                Some(location) => location,
                None => config.location()?,
            };
            let provider = provider_from_config(&config)?;
            provider.fetch(&ForecastRequest { location, units }).await?
        }
    };

    let weather = response
        .normalize(units, DisplayContext::local())
        .inspect_err(|err| warn!(%err, "provider response rejected"))
        .context("Forecast unavailable")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&weather)?);
    } else {
        print!("{}", render::render(&weather));
    }

    Ok(())
}

fn configure_banner(config: &Config, path: &Path) -> String {
    if config.is_configured() {
        format!("Updating configuration in {}", path.display())
    } else {
        format!("Creating configuration in {}", path.display())
    }
}

fn read_response(path: &Path) -> anyhow::Result<ForecastResponse> {
    let body = fs::read_to_string(path)
        .with_context(|| format!("Failed to read response file: {}", path.display()))?;

    serde_json::from_str(&body)
        .with_context(|| format!("Failed to parse response file: {}", path.display()))
}

fn parse_units(value: &str) -> Result<UnitSystem, String> {
    UnitSystem::try_from(value).map_err(|e| e.to_string())
}

fn parse_location(value: &str) -> Result<Location, String> {
    Location::try_from(value).map_err(|e| format!("{e:#}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_show_flags() {
        let cli = Cli::try_parse_from([
            "forecast",
            "show",
            "--units",
            "imperial",
            "--location",
            "40.71,-74.01",
            "--json",
        ])
        .expect("valid arguments");

        match cli.command {
            Command::Show { units, location, from_file, json } => {
                assert_eq!(units, Some(UnitSystem::Imperial));
                assert_eq!(location, Some(Location { latitude: 40.71, longitude: -74.01 }));
                assert!(from_file.is_none());
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_units() {
        let err = Cli::try_parse_from(["forecast", "show", "--units", "kelvin"]).unwrap_err();
        assert!(err.to_string().contains("Unknown unit system"));
    }

    #[test]
    fn verbose_is_global() {
        let cli = Cli::try_parse_from(["forecast", "show", "-v"]).expect("valid arguments");
        assert!(cli.verbose);
    }

    #[test]
    fn configure_banner_reflects_existing_setup() {
        let path = Path::new("/tmp/forecast/config.toml");
        let mut config = Config::default();
        config.set_api_key("KEY".into());

        assert_eq!(
            configure_banner(&config, path),
            "Creating configuration in /tmp/forecast/config.toml"
        );

        config.set_location(Location { latitude: 52.37, longitude: 4.89 });
        assert_eq!(
            configure_banner(&config, path),
            "Updating configuration in /tmp/forecast/config.toml"
        );
    }

    #[test]
    fn read_response_reports_missing_file() {
        let err = read_response(Path::new("/nonexistent/forecast.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read response file"));
    }
}
