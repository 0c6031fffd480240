//! Alert decision and cycle report types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::record::SnowRecord;
use super::severity::Severity;
use super::verification::Confidence;

/// Why a decision did not notify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuppressReason {
    /// The fetch collaborator produced no primary data for the location.
    DataUnavailable,
    /// The primary payload was malformed.
    DataFormat,
    /// Cross-source verification rejected the estimate.
    VerificationFailed,
    /// Verified snowfall did not reach the light threshold.
    BelowThreshold,
    /// An alert already fired inside the cooldown window.
    CooldownActive,
}

impl SuppressReason {
    /// Wire name of the reason.
    pub fn as_str(&self) -> &'static str {
        match self {
            SuppressReason::DataUnavailable => "data_unavailable",
            SuppressReason::DataFormat => "data_format",
            SuppressReason::VerificationFailed => "verification_failed",
            SuppressReason::BelowThreshold => "below_threshold",
            SuppressReason::CooldownActive => "cooldown_active",
        }
    }
}

impl std::fmt::Display for SuppressReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of evaluating one location for one cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertDecision {
    /// Location the decision applies to.
    pub location_id: String,
    /// Classified severity tier.
    pub tier: Severity,
    /// Verified snowfall estimate, in inches.
    pub verified_snow_in: f64,
    /// Whether the notifier should deliver an alert.
    pub should_notify: bool,
    /// Present exactly when `should_notify` is false.
    pub suppress_reason: Option<SuppressReason>,
    /// Verification confidence, when the data reached verification.
    pub confidence: Option<Confidence>,
    /// The canonical primary record, for message rendering.
    pub record: Option<SnowRecord>,
}

impl AlertDecision {
    /// A non-notifying decision for a location whose data never reached
    /// verification.
    pub fn suppressed(location_id: &str, reason: SuppressReason) -> Self {
        Self {
            location_id: location_id.to_string(),
            tier: Severity::None,
            verified_snow_in: 0.0,
            should_notify: false,
            suppress_reason: Some(reason),
            confidence: None,
            record: None,
        }
    }

    /// Wire name of the suppress reason, if suppressed.
    pub fn reason_str(&self) -> Option<&'static str> {
        self.suppress_reason.map(|r| r.as_str())
    }
}

/// Result of one orchestration pass over the configured locations.
///
/// Contains every decision, including non-notifying ones, so callers can
/// monitor cycle health.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CycleReport {
    /// When the cycle was evaluated (UTC).
    pub evaluated_at: DateTime<Utc>,
    /// One decision per input location, in input order.
    pub decisions: Vec<AlertDecision>,
    /// Number of locations evaluated.
    pub locations_evaluated: usize,
    /// Decisions with `should_notify == true`.
    pub alerts_triggered: usize,
    /// Locations whose data was unavailable or malformed.
    pub errors: usize,
}

impl CycleReport {
    /// Decisions that should be delivered.
    pub fn alerts(&self) -> impl Iterator<Item = &AlertDecision> {
        self.decisions.iter().filter(|d| d.should_notify)
    }
}
