use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Icon identifiers understood by the display layer.
///
/// The discriminants are stable and are what gets serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "u8")]
#[repr(u8)]
pub enum IconId {
    Unknown = 0,
    ClearDay = 1,
    ClearNight = 2,
    Rain = 3,
    Snow = 4,
    Sleet = 5,
    Wind = 6,
    Fog = 7,
    Cloudy = 8,
    PartlyCloudyDay = 9,
    PartlyCloudyNight = 10,
    Hail = 11,
    Thunderstorm = 12,
    Tornado = 13,
}

/// Provider condition codes and the icon each one maps to.
///
/// Supporting a new condition means adding a row here.
const CONDITION_ICONS: &[(&str, IconId)] = &[
    ("clear-day", IconId::ClearDay),
    ("clear-night", IconId::ClearNight),
    ("rain", IconId::Rain),
    ("snow", IconId::Snow),
    ("sleet", IconId::Sleet),
    ("wind", IconId::Wind),
    ("fog", IconId::Fog),
    ("cloudy", IconId::Cloudy),
    ("partly-cloudy-day", IconId::PartlyCloudyDay),
    ("partly-cloudy-night", IconId::PartlyCloudyNight),
    ("hail", IconId::Hail),
    ("thunderstorm", IconId::Thunderstorm),
    ("tornado", IconId::Tornado),
];

impl IconId {
    /// Icon used when the provider sends a code outside the table.
    pub const FALLBACK: IconId = IconId::Unknown;

    pub fn id(self) -> u8 {
        self as u8
    }

    /// Provider code for this icon, `None` for the fallback.
    pub fn condition_code(self) -> Option<&'static str> {
        CONDITION_ICONS
            .iter()
            .find(|(_, icon)| *icon == self)
            .map(|(code, _)| *code)
    }
}

impl From<IconId> for u8 {
    fn from(icon: IconId) -> Self {
        icon.id()
    }
}

impl fmt::Display for IconId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.condition_code().unwrap_or("unknown"))
    }
}

/// Map a provider condition code to an icon. Matching is case-sensitive.
pub fn resolve_icon(condition_code: &str) -> IconId {
    match CONDITION_ICONS.iter().find(|(code, _)| *code == condition_code) {
        Some((_, icon)) => *icon,
        None => {
            debug!(condition_code, "unrecognized condition code, using fallback icon");
            IconId::FALLBACK
        }
    }
}
