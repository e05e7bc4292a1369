use serde::{Deserialize, Serialize};
use std::fmt;

/// Degree sign placed between a temperature and its unit token.
pub const DEGREE: &str = "º";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

/// Unit tokens appended to formatted values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitTokens {
    pub distance: &'static str,
    pub pressure: &'static str,
    pub speed: &'static str,
    pub temperature: &'static str,
}

/// Order of day and month in forecast date labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOrder {
    /// `17 Oct`
    DayMonth,
    /// `Oct 17`
    MonthDay,
}

impl DateOrder {
    /// chrono format string for a day label.
    pub fn pattern(self) -> &'static str {
        match self {
            DateOrder::DayMonth => "%-d %b",
            DateOrder::MonthDay => "%b %-d",
        }
    }
}

const METRIC_TOKENS: UnitTokens = UnitTokens {
    distance: "km",
    pressure: "hPa",
    speed: "km/h",
    temperature: "C",
};

const IMPERIAL_TOKENS: UnitTokens = UnitTokens {
    distance: "mi",
    pressure: "mb",
    speed: "mph",
    temperature: "F",
};

impl UnitSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
        }
    }

    pub const fn all() -> &'static [UnitSystem] {
        &[UnitSystem::Metric, UnitSystem::Imperial]
    }

    pub fn tokens(&self) -> UnitTokens {
        match self {
            UnitSystem::Metric => METRIC_TOKENS,
            UnitSystem::Imperial => IMPERIAL_TOKENS,
        }
    }

    pub fn date_order(&self) -> DateOrder {
        match self {
            UnitSystem::Metric => DateOrder::DayMonth,
            UnitSystem::Imperial => DateOrder::MonthDay,
        }
    }

    /// Value of the provider's `units` query parameter.
    ///
    /// `ca` is SI with wind speed in km/h, which is what the metric tokens describe.
    pub fn provider_query(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "ca",
            UnitSystem::Imperial => "us",
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for UnitSystem {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.trim().to_lowercase();

        match lower.as_str() {
            "metric" | "si" => Ok(UnitSystem::Metric),
            "imperial" | "us" => Ok(UnitSystem::Imperial),
            _ => Err(anyhow::anyhow!(
                "Unknown unit system '{value}'. Supported unit systems: metric, imperial."
            )),
        }
    }
}

/// The eight compass points used for wind direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardinalDirection {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

const COMPASS: [CardinalDirection; 8] = [
    CardinalDirection::North,
    CardinalDirection::NorthEast,
    CardinalDirection::East,
    CardinalDirection::SouthEast,
    CardinalDirection::South,
    CardinalDirection::SouthWest,
    CardinalDirection::West,
    CardinalDirection::NorthWest,
];

impl CardinalDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardinalDirection::North => "N",
            CardinalDirection::NorthEast => "NE",
            CardinalDirection::East => "E",
            CardinalDirection::SouthEast => "SE",
            CardinalDirection::South => "S",
            CardinalDirection::SouthWest => "SW",
            CardinalDirection::West => "W",
            CardinalDirection::NorthWest => "NW",
        }
    }

    pub const fn all() -> &'static [CardinalDirection] {
        &COMPASS
    }
}

impl fmt::Display for CardinalDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compass point nearest to `bearing` degrees.
///
/// Each point owns a 45° sector centred on it. Exact sector boundaries round
/// up, so 22.5° is NE, and 360° wraps back to N.
pub fn resolve_direction(bearing: f64) -> CardinalDirection {
    let sector = (bearing.rem_euclid(360.0) / 45.0 + 0.5).floor() as usize;
    COMPASS[sector % COMPASS.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_system_as_str_roundtrip() {
        for units in UnitSystem::all() {
            let parsed = UnitSystem::try_from(units.as_str()).expect("roundtrip should succeed");
            assert_eq!(*units, parsed);
        }
    }

    #[test]
    fn unit_system_accepts_provider_aliases() {
        assert_eq!(UnitSystem::try_from("SI").unwrap(), UnitSystem::Metric);
        assert_eq!(UnitSystem::try_from(" us ").unwrap(), UnitSystem::Imperial);
    }

    #[test]
    fn unknown_unit_system_error() {
        let err = UnitSystem::try_from("kelvin").unwrap_err();
        assert!(err.to_string().contains("Unknown unit system"));
    }

    #[test]
    fn tokens_per_system() {
        let metric = UnitSystem::Metric.tokens();
        assert_eq!(metric.speed, "km/h");
        assert_eq!(metric.temperature, "C");

        let imperial = UnitSystem::Imperial.tokens();
        assert_eq!(imperial.speed, "mph");
        assert_eq!(imperial.distance, "mi");
        assert_eq!(imperial.temperature, "F");
    }

    #[test]
    fn date_order_per_system() {
        assert_eq!(UnitSystem::Metric.date_order(), DateOrder::DayMonth);
        assert_eq!(UnitSystem::Imperial.date_order(), DateOrder::MonthDay);
    }

    #[test]
    fn compass_points() {
        assert_eq!(resolve_direction(0.0), CardinalDirection::North);
        assert_eq!(resolve_direction(45.0), CardinalDirection::NorthEast);
        assert_eq!(resolve_direction(90.0), CardinalDirection::East);
        assert_eq!(resolve_direction(100.0), CardinalDirection::East);
        assert_eq!(resolve_direction(180.0), CardinalDirection::South);
        assert_eq!(resolve_direction(270.0), CardinalDirection::West);
        assert_eq!(resolve_direction(315.0), CardinalDirection::NorthWest);
    }

    #[test]
    fn wraps_around_north() {
        assert_eq!(resolve_direction(360.0), CardinalDirection::North);
        assert_eq!(resolve_direction(337.5), CardinalDirection::North);
        assert_eq!(resolve_direction(359.9), CardinalDirection::North);
        assert_eq!(resolve_direction(720.0), CardinalDirection::North);
        assert_eq!(resolve_direction(-90.0), CardinalDirection::West);
        assert_eq!(resolve_direction(0.0).as_str(), "N");
        assert_eq!(resolve_direction(360.0).to_string(), "N");
    }

    #[test]
    fn boundaries_round_up() {
        assert_eq!(resolve_direction(22.4), CardinalDirection::North);
        assert_eq!(resolve_direction(22.5), CardinalDirection::NorthEast);
        assert_eq!(resolve_direction(67.5), CardinalDirection::East);
        assert_eq!(resolve_direction(292.5), CardinalDirection::NorthWest);
    }

    #[test]
    fn every_bearing_maps_to_a_compass_point() {
        for tenth in 0..3600 {
            let direction = resolve_direction(f64::from(tenth) / 10.0);
            assert!(CardinalDirection::all().contains(&direction));
        }
    }
}
