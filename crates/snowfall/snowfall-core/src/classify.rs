//! Severity classification.

use snowfall_api::TierThresholds;
use snowfall_spi::Severity;

/// Classify a verified snowfall amount into a severity tier.
///
/// Walks thresholds from highest to lowest and returns the first tier whose
/// inclusive lower bound is met. Thresholds are validated at configuration
/// time, not here.
pub fn classify(snow_in: f64, thresholds: &TierThresholds) -> Severity {
    if snow_in >= thresholds.heavy {
        Severity::Heavy
    } else if snow_in >= thresholds.moderate {
        Severity::Moderate
    } else if snow_in >= thresholds.light {
        Severity::Light
    } else {
        Severity::None
    }
}
