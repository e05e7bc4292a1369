//! Core library for the `forecast` CLI.
//!
//! This crate defines:
//! - Normalization of raw provider responses into a display-ready model
//! - Condition-code to icon mapping and unit handling
//! - Configuration & credentials handling
//! - Access to the forecast provider
//!
//! It is used by `forecast-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod icon;
pub mod model;
pub mod normalize;
pub mod provider;
pub mod units;

pub use config::Config;
pub use error::ValidationError;
pub use icon::{IconId, resolve_icon};
pub use model::{
    CurrentWeather, DayForecast, ForecastRequest, ForecastResponse, Location, RawConditions,
    RawDayEntry,
};
pub use normalize::{DisplayContext, ForecastNormalizer, normalize};
pub use provider::{ForecastSource, provider_from_config};
pub use units::{CardinalDirection, UnitSystem, resolve_direction};
