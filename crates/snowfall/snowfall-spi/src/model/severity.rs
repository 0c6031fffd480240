//! Severity tiers and alert markers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snowfall severity tiers, in ascending order.
///
/// The derived ordering is load-bearing: the cooldown tracker compares
/// tiers to let escalating conditions bypass an active cooldown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    None,
    Light,
    Moderate,
    Heavy,
}

impl Severity {
    /// Wire name of the tier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::None => "none",
            Severity::Light => "light",
            Severity::Moderate => "moderate",
            Severity::Heavy => "heavy",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record of the last alert fired for a location.
///
/// Serialized field names match the persisted cooldown-state layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlertMarker {
    /// When the alert fired (UTC).
    #[serde(rename = "last_alert_time")]
    pub fired_at: DateTime<Utc>,
    /// Tier of the alert that fired.
    #[serde(rename = "last_alert_tier")]
    pub tier: Severity,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::None < Severity::Light);
        assert!(Severity::Light < Severity::Moderate);
        assert!(Severity::Moderate < Severity::Heavy);
    }

    #[test]
    fn test_severity_wire_names() {
        assert_eq!(Severity::None.as_str(), "none");
        assert_eq!(Severity::Light.as_str(), "light");
        assert_eq!(Severity::Moderate.as_str(), "moderate");
        assert_eq!(Severity::Heavy.as_str(), "heavy");
    }

    #[test]
    fn test_marker_persisted_layout() {
        let marker = AlertMarker {
            fired_at: Utc.with_ymd_and_hms(2025, 1, 15, 6, 30, 0).unwrap(),
            tier: Severity::Moderate,
        };
        let json = serde_json::to_string(&marker).unwrap();
        assert!(json.contains("\"last_alert_time\""));
        assert!(json.contains("\"last_alert_tier\":\"moderate\""));

        let back: AlertMarker = serde_json::from_str(&json).unwrap();
        assert_eq!(back, marker);
    }
}
