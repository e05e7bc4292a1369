use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::{model::Location, units::UnitSystem};

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// units = "metric"
///
/// [location]
/// latitude = 52.37
/// longitude = 4.89
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    pub api_key: Option<String>,

    #[serde(default)]
    pub units: UnitSystem,

    pub location: Option<Location>,
}

impl Config {
    /// Returns the API key, or an error telling the user how to set one.
    pub fn api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            anyhow!(
                "No API key configured.\n\
                 Hint: run `forecast configure` and enter your Forecast.io API key."
            )
        })
    }

    /// Returns the configured location, or an error telling the user how to set one.
    pub fn location(&self) -> Result<Location> {
        self.location.ok_or_else(|| {
            anyhow!(
                "No location configured.\n\
                 Hint: run `forecast configure` or pass `--location <lat,lon>`."
            )
        })
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    pub fn set_location(&mut self, location: Location) {
        self.location = Some(location);
    }

    pub fn set_units(&mut self, units: UnitSystem) {
        self.units = units;
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some() && self.location.is_some()
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
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
        let dirs = ProjectDirs::from("dev", "forecast", "forecast-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    fn from_toml(contents: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(contents)?;

        if let Some(location) = cfg.location {
            Location::new(location.latitude, location.longitude)?;
        }

        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_errors_when_not_set() {
        let cfg = Config::default();
        let err = cfg.api_key().unwrap_err();

        assert!(err.to_string().contains("No API key configured"));
    }

    #[test]
    fn location_errors_when_not_set() {
        let cfg = Config::default();
        let err = cfg.location().unwrap_err();

        assert!(err.to_string().contains("No location configured"));
        assert!(err.to_string().contains("--location"));
    }

    #[test]
    fn defaults_to_metric() {
        assert_eq!(Config::default().units, UnitSystem::Metric);
    }

    #[test]
    fn setters_mark_config_as_configured() {
        let mut cfg = Config::default();
        assert!(!cfg.is_configured());

        cfg.set_api_key("KEY".into());
        assert!(!cfg.is_configured());

        cfg.set_location(Location { latitude: 52.37, longitude: 4.89 });
        cfg.set_units(UnitSystem::Imperial);

        assert!(cfg.is_configured());
        assert_eq!(cfg.api_key().unwrap(), "KEY");
        assert_eq!(cfg.units, UnitSystem::Imperial);
    }

    #[test]
    fn toml_roundtrip() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".into());
        cfg.set_location(Location { latitude: -33.87, longitude: 151.21 });
        cfg.set_units(UnitSystem::Imperial);

        let text = toml::to_string_pretty(&cfg).unwrap();
        assert!(text.contains("units = \"imperial\""));

        let parsed = Config::from_toml(&text).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn units_may_be_omitted() {
        let cfg = Config::from_toml("api_key = \"KEY\"\n").unwrap();
        assert_eq!(cfg.units, UnitSystem::Metric);
        assert!(cfg.location.is_none());
    }

    #[test]
    fn out_of_range_location_is_rejected() {
        let err = Config::from_toml("[location]\nlatitude = 123.0\nlongitude = 4.0\n").unwrap_err();
        assert!(err.to_string().contains("Latitude"));
    }
}
