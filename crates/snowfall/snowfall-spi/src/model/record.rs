//! Canonical snow record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Weather data providers known to the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    OpenWeatherMap,
    WeatherApi,
}

impl Source {
    /// Human-readable provider name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::OpenWeatherMap => "OpenWeatherMap",
            Source::WeatherApi => "WeatherAPI.com",
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provider-independent, unit-normalized snow observation.
///
/// Immutable once built; one instance per (location, source, polling cycle).
/// Depths are inches, temperatures Fahrenheit, and no rounding has been
/// applied. Rounding, if any, happens at presentation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnowRecord {
    /// Location this record describes.
    pub location_id: String,
    /// Provider the raw payload came from.
    pub source: Source,
    /// Snow observed over the last 24 hours, in inches.
    pub observed_snow_in: f64,
    /// Snow expected over the next 24 hours, in inches.
    pub forecast_snow_in: f64,
    /// When the observation was made (UTC).
    pub observed_at: DateTime<Utc>,
    /// Current temperature in Fahrenheit.
    pub temperature_f: f64,
    /// Provider's conditions description, if any.
    pub conditions: Option<String>,
}
