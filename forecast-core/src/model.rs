use anyhow::Context;
use chrono::TimeZone;
use serde::{Deserialize, Serialize};

use crate::{
    ValidationError,
    icon::IconId,
    normalize::{DisplayContext, ForecastNormalizer},
    units::UnitSystem,
};

/// Location the forecast is requested for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> anyhow::Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(anyhow::anyhow!("Latitude {latitude} is outside -90..=90."));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(anyhow::anyhow!("Longitude {longitude} is outside -180..=180."));
        }

        Ok(Self { latitude, longitude })
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

impl TryFrom<&str> for Location {
    type Error = anyhow::Error;

    /// Parses `"lat,lon"`, e.g. `"52.37,4.89"`.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let (lat, lon) = value.split_once(',').ok_or_else(|| {
            anyhow::anyhow!("Invalid location '{value}'. Expected `latitude,longitude`, e.g. 52.37,4.89.")
        })?;

        let latitude: f64 = lat
            .trim()
            .parse()
            .with_context(|| format!("Invalid latitude '{}'", lat.trim()))?;
        let longitude: f64 = lon
            .trim()
            .parse()
            .with_context(|| format!("Invalid longitude '{}'", lon.trim()))?;

        Self::new(latitude, longitude)
    }
}

#[derive(Debug, Clone)]
pub struct ForecastRequest {
    pub location: Location,
    pub units: UnitSystem,
}

/// Provider's current-conditions snapshot.
///
/// Numeric fields are optional on the wire; the normalizer rejects a response
/// where any of them is missing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawConditions {
    pub time: Option<i64>,
    #[serde(rename = "icon", default)]
    pub condition_code: String,
    #[serde(default)]
    pub summary: String,
    pub temperature: Option<f64>,
    pub apparent_temperature: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_bearing: Option<f64>,
    /// Fraction between 0 and 1.
    pub humidity: Option<f64>,
    pub pressure: Option<f64>,
    pub visibility: Option<f64>,
}

/// One future day of the provider's daily forecast.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDayEntry {
    pub time: Option<i64>,
    #[serde(rename = "icon", default)]
    pub condition_code: String,
    pub temperature_min: Option<f64>,
    pub temperature_max: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DailyBlock {
    #[serde(default)]
    pub data: Vec<RawDayEntry>,
}

/// Deserialized provider response.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub currently: RawConditions,
    #[serde(default)]
    pub daily: DailyBlock,
}

impl ForecastResponse {
    pub fn normalize<Tz: TimeZone>(
        &self,
        units: UnitSystem,
        context: DisplayContext<Tz>,
    ) -> Result<CurrentWeather, ValidationError>
    where
        Tz::Offset: std::fmt::Display,
    {
        ForecastNormalizer::new(context).normalize(&self.currently, &self.daily.data, units)
    }
}

/// Display-ready current weather.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentWeather {
    pub icon_id: IconId,
    pub summary: String,
    pub temperature: String,
    pub last_updated: String,
    pub wind_info: String,
    pub humidity: String,
    pub pressure: String,
    pub visibility: String,
    pub forecast: Vec<DayForecast>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayForecast {
    pub icon_id: IconId,
    pub temperature: String,
    pub date: String,
}
