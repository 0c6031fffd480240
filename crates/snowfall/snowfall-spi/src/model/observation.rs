//! Raw provider observation types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::record::Source;

/// Unit a provider reports snow depth in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepthUnit {
    Inches,
    Centimeters,
    Millimeters,
}

/// Unit a provider reports temperature in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureUnit {
    Fahrenheit,
    Celsius,
}

/// Provider-tagged raw payload, before normalization.
///
/// Values carry whatever units the provider uses; the canonical record
/// builder owns the conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawObservation {
    /// Provider that produced this payload.
    pub source: Source,
    /// Snow observed over the last 24 hours.
    pub snow_depth: f64,
    /// Unit of `snow_depth` and `forecast_depth`.
    pub depth_unit: DepthUnit,
    /// Snow expected over the next 24 hours.
    pub forecast_depth: f64,
    /// Current temperature.
    pub temperature: f64,
    /// Unit of `temperature`.
    pub temperature_unit: TemperatureUnit,
    /// When the observation was made (UTC).
    pub observed_at: DateTime<Utc>,
    /// Provider's conditions description, if any.
    pub conditions: Option<String>,
}

/// One location's fetched inputs for a polling cycle.
///
/// A missing primary means the fetch collaborator failed for this location;
/// the engine converts it into a non-notifying decision rather than an
/// error, so one bad location never aborts the batch.
#[derive(Debug, Clone)]
pub struct LocationReading {
    /// Location being evaluated.
    pub location_id: String,
    /// Primary source payload, if the fetch succeeded.
    pub primary: Option<RawObservation>,
    /// Secondary source payload, if fetched at all.
    pub secondary: Option<RawObservation>,
}

impl LocationReading {
    /// Create a reading with both payloads as fetched.
    pub fn new(
        location_id: impl Into<String>,
        primary: Option<RawObservation>,
        secondary: Option<RawObservation>,
    ) -> Self {
        Self {
            location_id: location_id.into(),
            primary,
            secondary,
        }
    }

    /// A reading for a location whose primary fetch failed.
    pub fn unavailable(location_id: impl Into<String>) -> Self {
        Self::new(location_id, None, None)
    }
}
