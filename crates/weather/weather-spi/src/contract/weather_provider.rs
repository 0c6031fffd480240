//! Weather provider trait definition.

use snowfall_spi::{RawObservation, Source};

use crate::error::Result;
use crate::model::Coordinates;

/// Trait for weather providers that can observe snowfall conditions.
///
/// Implementations fetch from a concrete upstream API and must tag the
/// returned observation with their own source id so records are attributed
/// correctly.
pub trait WeatherProvider: Send + Sync {
    /// Provider identity used to tag observations.
    fn source(&self) -> Source;

    /// Fetch a snowfall observation for a location (blocking).
    fn observe(&self, coordinates: &Coordinates) -> Result<RawObservation>;
}
