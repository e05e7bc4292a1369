//! Turns a raw provider response into the display model.
//!
//! Temperatures, wind speed, pressure and visibility are truncated toward
//! zero. Humidity is rounded to the nearest percent.

use chrono::{DateTime, Local, TimeZone, Utc};
use std::fmt::Display;
use tracing::debug;

use crate::{
    ValidationError,
    icon::resolve_icon,
    model::{CurrentWeather, DayForecast, RawConditions, RawDayEntry},
    units::{DEGREE, UnitSystem, UnitTokens, resolve_direction},
};

/// Number of forecast days shown. Extra provider days are ignored.
pub const FORECAST_DAYS: usize = 4;

const LAST_UPDATED_PATTERN: &str = "%-I:%M";

/// Clock and locale used to render timestamps.
///
/// Only the time zone varies. The locale is fixed to English month
/// abbreviations (chrono's default), so labels do not depend on the host
/// locale.
#[derive(Debug, Clone)]
pub struct DisplayContext<Tz: TimeZone> {
    tz: Tz,
}

impl<Tz: TimeZone> DisplayContext<Tz> {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn time_zone(&self) -> &Tz {
        &self.tz
    }
}

impl DisplayContext<Utc> {
    pub fn utc() -> Self {
        Self::new(Utc)
    }
}

impl DisplayContext<Local> {
    pub fn local() -> Self {
        Self::new(Local)
    }
}

#[derive(Debug, Clone)]
pub struct ForecastNormalizer<Tz: TimeZone> {
    context: DisplayContext<Tz>,
}

impl<Tz: TimeZone> ForecastNormalizer<Tz>
where
    Tz::Offset: Display,
{
    pub fn new(context: DisplayContext<Tz>) -> Self {
        Self { context }
    }

    /// Build the display model from the current snapshot and the first
    /// [`FORECAST_DAYS`] entries of `days`.
    ///
    /// Either every field is valid and a complete model is returned, or the
    /// first offending field is reported.
    pub fn normalize(
        &self,
        current: &RawConditions,
        days: &[RawDayEntry],
        units: UnitSystem,
    ) -> Result<CurrentWeather, ValidationError> {
        if days.len() < FORECAST_DAYS {
            return Err(ValidationError::NotEnoughDays {
                required: FORECAST_DAYS,
                actual: days.len(),
            });
        }

        debug!(%units, provided_days = days.len(), "normalizing forecast");

        let tokens = units.tokens();
        let date_pattern = units.date_order().pattern();

        let updated_at = self.timestamp("currently.time", current.time)?;
        let temperature = required("currently.temperature", current.temperature)?;
        let apparent = required("currently.apparentTemperature", current.apparent_temperature)?;
        let wind_speed = required("currently.windSpeed", current.wind_speed)?;
        let wind_bearing = required("currently.windBearing", current.wind_bearing)?;
        let humidity = required("currently.humidity", current.humidity)?;
        let pressure = required("currently.pressure", current.pressure)?;
        let visibility = required("currently.visibility", current.visibility)?;

        let direction = resolve_direction(wind_bearing);

        let forecast = days
            .iter()
            .take(FORECAST_DAYS)
            .enumerate()
            .map(|(i, day)| self.day_forecast(i, day, &tokens, date_pattern))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CurrentWeather {
            icon_id: resolve_icon(&current.condition_code),
            summary: current.summary.clone(),
            temperature: temperature_label(truncate(temperature), &tokens),
            last_updated: updated_at.format(LAST_UPDATED_PATTERN).to_string(),
            wind_info: format!(
                "{}{} {} | {}",
                truncate(wind_speed),
                tokens.speed,
                direction,
                temperature_label(truncate(apparent), &tokens),
            ),
            humidity: format!("{}%", (humidity * 100.0).round() as i64),
            pressure: format!("{}{}", truncate(pressure), tokens.pressure),
            visibility: format!("{}{}", truncate(visibility), tokens.distance),
            forecast,
        })
    }

    fn day_forecast(
        &self,
        index: usize,
        day: &RawDayEntry,
        tokens: &UnitTokens,
        date_pattern: &str,
    ) -> Result<DayForecast, ValidationError> {
        let date = self.timestamp(&format!("daily.data[{index}].time"), day.time)?;
        let min = required(&format!("daily.data[{index}].temperatureMin"), day.temperature_min)?;
        let max = required(&format!("daily.data[{index}].temperatureMax"), day.temperature_max)?;

        // Each bound is truncated before averaging. Summed as i128 so
        // saturated bounds cannot overflow.
        let average = ((i128::from(truncate(min)) + i128::from(truncate(max))) / 2) as i64;

        Ok(DayForecast {
            icon_id: resolve_icon(&day.condition_code),
            temperature: temperature_label(average, tokens),
            date: date.format(date_pattern).to_string(),
        })
    }

    fn timestamp(&self, field: &str, value: Option<i64>) -> Result<DateTime<Tz>, ValidationError> {
        let secs = value.ok_or_else(|| ValidationError::MissingField { field: field.to_string() })?;

        DateTime::<Utc>::from_timestamp(secs, 0)
            .map(|utc| utc.with_timezone(self.context.time_zone()))
            .ok_or_else(|| ValidationError::TimestampOutOfRange {
                field: field.to_string(),
                value: secs,
            })
    }
}

/// Normalize with an explicit display context.
pub fn normalize<Tz: TimeZone>(
    current: &RawConditions,
    days: &[RawDayEntry],
    units: UnitSystem,
    context: DisplayContext<Tz>,
) -> Result<CurrentWeather, ValidationError>
where
    Tz::Offset: Display,
{
    ForecastNormalizer::new(context).normalize(current, days, units)
}

fn required(field: &str, value: Option<f64>) -> Result<f64, ValidationError> {
    match value {
        None => Err(ValidationError::MissingField { field: field.to_string() }),
        Some(v) if !v.is_finite() => Err(ValidationError::NonFinite {
            field: field.to_string(),
            value: v,
        }),
        Some(v) => Ok(v),
    }
}

fn truncate(value: f64) -> i64 {
    value.trunc() as i64
}

fn temperature_label(value: i64, tokens: &UnitTokens) -> String {
    format!("{value}{DEGREE}{}", tokens.temperature)
}
