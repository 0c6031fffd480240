//! Cross-source verification result types.

use serde::{Deserialize, Serialize};

use super::record::SnowRecord;

/// Confidence attached to a verification outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    /// Two independent sources agreed within tolerance.
    Corroborated,
    /// Secondary source unavailable or intentionally skipped; the primary
    /// value is accepted with reduced confidence.
    SingleSource,
    /// Sources disagreed beyond tolerance; the estimate is not trusted.
    Rejected,
}

/// Outcome of cross-checking two sources for one location.
///
/// Produced fresh each cycle and never persisted beyond it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verification {
    /// Location the verification applies to.
    pub location_id: String,
    /// Trusted snowfall estimate, in inches. Always the primary source's
    /// number, never an average.
    pub verified_snow_in: f64,
    /// Whether the estimate may be acted on.
    pub is_verified: bool,
    /// How much trust backs the estimate.
    pub confidence: Confidence,
    /// The primary record the estimate came from.
    pub primary: SnowRecord,
    /// The secondary record, when one was available.
    pub secondary: Option<SnowRecord>,
    /// Absolute difference between the sources, when both were available.
    pub disagreement_in: Option<f64>,
}
