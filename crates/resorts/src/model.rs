//! Resort data model.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use weather_spi::Coordinates;

/// A monitored ski resort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resort {
    /// Resort name; used as the location id throughout the system.
    pub name: String,
    /// Reference coordinates passed to weather providers.
    pub coordinates: Coordinates,
    /// Base elevation in feet.
    pub elevation_ft: u32,
    /// Resort website.
    pub website: String,
    /// Region grouping, e.g. "Little Cottonwood Canyon".
    #[serde(default)]
    pub region: String,
    /// Terrain style, e.g. "Alpine" or "Alpine (Ski Only)".
    #[serde(default)]
    pub terrain: String,
    /// Vertical drop in feet.
    #[serde(default)]
    pub vertical_drop_ft: u32,
}

/// Registry I/O errors.
#[derive(Debug, Error)]
pub enum ResortError {
    /// File could not be read or written.
    #[error("cannot access {path}: {reason}")]
    Io { path: String, reason: String },

    /// File contents were not a valid resort list.
    #[error("invalid resort data: {0}")]
    Parse(String),
}
