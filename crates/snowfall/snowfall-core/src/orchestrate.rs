//! Cycle orchestration.
//!
//! Composes the builder, verifier, classifier, and cooldown tracker for a
//! batch of locations each polling cycle.

use chrono::{DateTime, Utc};
use snowfall_api::EngineConfig;
use snowfall_spi::{
    AlertDecision, CooldownStore, CycleReport, LocationReading, Result, Severity, SuppressReason,
    Verification,
};
use tracing::{info, warn};

use crate::classify::classify;
use crate::cooldown::CooldownTracker;
use crate::normalize::canonical;
use crate::verify::verify;

/// Snowfall evaluation engine.
///
/// Synchronous and single-threaded by design: every step operates on data
/// already fetched. The cooldown store is injected so state can be held in
/// memory, persisted to disk, or faked in tests.
pub struct Engine<S: CooldownStore> {
    config: EngineConfig,
    tracker: CooldownTracker<S>,
}

impl<S: CooldownStore> Engine<S> {
    /// Create an engine, validating configuration eagerly.
    ///
    /// Invalid thresholds or windows fail here, never per-call.
    pub fn new(config: EngineConfig, store: S) -> Result<Self> {
        config.validate()?;
        let tracker = CooldownTracker::new(store, config.cooldown);
        Ok(Self { config, tracker })
    }

    /// Engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evaluate one location's readings into a decision.
    pub fn evaluate(&mut self, reading: &LocationReading, now: DateTime<Utc>) -> AlertDecision {
        let location_id = reading.location_id.as_str();

        let raw = match &reading.primary {
            Some(raw) => raw,
            None => {
                warn!(location = location_id, "no primary data for cycle");
                return AlertDecision::suppressed(location_id, SuppressReason::DataUnavailable);
            }
        };

        let primary = match canonical(location_id, raw) {
            Ok(record) => record,
            Err(e) => {
                warn!(location = location_id, error = %e, "malformed primary payload");
                return AlertDecision::suppressed(location_id, SuppressReason::DataFormat);
            }
        };

        // A corrupt secondary must not suppress an alert the primary
        // supports; drop it and proceed single-source.
        let secondary = match &reading.secondary {
            Some(raw) => match canonical(location_id, raw) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(location = location_id, error = %e, "dropping malformed secondary payload");
                    None
                }
            },
            None => None,
        };

        let verification = verify(&primary, secondary.as_ref(), &self.config.verifier);
        self.decide(verification, now)
    }

    fn decide(&mut self, verification: Verification, now: DateTime<Utc>) -> AlertDecision {
        let location_id = verification.location_id.clone();
        let verified_snow_in = verification.verified_snow_in;
        let confidence = Some(verification.confidence);
        let record = Some(verification.primary);

        // An unverified estimate never classifies above None.
        if !verification.is_verified {
            return AlertDecision {
                location_id,
                tier: Severity::None,
                verified_snow_in,
                should_notify: false,
                suppress_reason: Some(SuppressReason::VerificationFailed),
                confidence,
                record,
            };
        }

        let tier = classify(verified_snow_in, &self.config.thresholds);
        if tier == Severity::None {
            return AlertDecision {
                location_id,
                tier,
                verified_snow_in,
                should_notify: false,
                suppress_reason: Some(SuppressReason::BelowThreshold),
                confidence,
                record,
            };
        }

        if self.tracker.should_alert(&location_id, tier, now) {
            info!(
                location = %location_id,
                tier = %tier,
                inches = verified_snow_in,
                "alert fires"
            );
            AlertDecision {
                location_id,
                tier,
                verified_snow_in,
                should_notify: true,
                suppress_reason: None,
                confidence,
                record,
            }
        } else {
            AlertDecision {
                location_id,
                tier,
                verified_snow_in,
                should_notify: false,
                suppress_reason: Some(SuppressReason::CooldownActive),
                confidence,
                record,
            }
        }
    }

    /// Run one full polling cycle.
    ///
    /// Locations are independent; a failure for one becomes a non-notifying
    /// decision and processing continues. The report includes every
    /// decision so the caller can monitor cycle health.
    pub fn run_cycle(&mut self, readings: &[LocationReading], now: DateTime<Utc>) -> CycleReport {
        let mut decisions = Vec::with_capacity(readings.len());
        for reading in readings {
            decisions.push(self.evaluate(reading, now));
        }

        let alerts_triggered = decisions.iter().filter(|d| d.should_notify).count();
        let errors = decisions
            .iter()
            .filter(|d| {
                matches!(
                    d.suppress_reason,
                    Some(SuppressReason::DataUnavailable) | Some(SuppressReason::DataFormat)
                )
            })
            .count();

        info!(
            locations = decisions.len(),
            alerts = alerts_triggered,
            errors,
            "cycle complete"
        );

        CycleReport {
            evaluated_at: now,
            locations_evaluated: decisions.len(),
            alerts_triggered,
            errors,
            decisions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cooldown::MemoryCooldownStore;
    use chrono::TimeZone;
    use snowfall_spi::{Confidence, DepthUnit, RawObservation, Source, TemperatureUnit};

    fn engine() -> Engine<MemoryCooldownStore> {
        Engine::new(EngineConfig::default(), MemoryCooldownStore::new()).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, 6, 0, 0).unwrap()
    }

    fn raw(source: Source, inches: f64) -> RawObservation {
        RawObservation {
            source,
            snow_depth: inches,
            depth_unit: DepthUnit::Inches,
            forecast_depth: 0.0,
            temperature: 25.0,
            temperature_unit: TemperatureUnit::Fahrenheit,
            observed_at: now(),
            conditions: None,
        }
    }

    fn reading(location: &str, primary: f64, secondary: Option<f64>) -> LocationReading {
        LocationReading::new(
            location,
            Some(raw(Source::OpenWeatherMap, primary)),
            secondary.map(|inches| raw(Source::WeatherApi, inches)),
        )
    }

    #[test]
    fn test_invalid_config_fails_construction() {
        let mut config = EngineConfig::default();
        config.thresholds.light = 12.0;
        assert!(Engine::new(config, MemoryCooldownStore::new()).is_err());
    }

    #[test]
    fn test_corroborated_alert_notifies() {
        let decision = engine().evaluate(&reading("Alta", 8.5, Some(9.0)), now());
        assert_eq!(decision.tier, Severity::Moderate);
        assert!(decision.should_notify);
        assert_eq!(decision.confidence, Some(Confidence::Corroborated));
    }

    #[test]
    fn test_missing_primary_is_data_unavailable() {
        let decision = engine().evaluate(&LocationReading::unavailable("Alta"), now());
        assert!(!decision.should_notify);
        assert_eq!(decision.reason_str(), Some("data_unavailable"));
    }

    #[test]
    fn test_malformed_primary_is_data_format() {
        let reading = LocationReading::new("Alta", Some(raw(Source::OpenWeatherMap, -4.0)), None);
        let decision = engine().evaluate(&reading, now());
        assert!(!decision.should_notify);
        assert_eq!(decision.reason_str(), Some("data_format"));
    }

    #[test]
    fn test_malformed_secondary_degrades_to_single_source() {
        let reading = LocationReading::new(
            "Alta",
            Some(raw(Source::OpenWeatherMap, 8.5)),
            Some(raw(Source::WeatherApi, f64::NAN)),
        );
        let decision = engine().evaluate(&reading, now());
        assert!(decision.should_notify);
        assert_eq!(decision.confidence, Some(Confidence::SingleSource));
    }

    #[test]
    fn test_rejected_verification_never_classifies() {
        let decision = engine().evaluate(&reading("Alta", 8.5, Some(20.0)), now());
        assert_eq!(decision.tier, Severity::None);
        assert!(!decision.should_notify);
        assert_eq!(decision.reason_str(), Some("verification_failed"));
    }

    #[test]
    fn test_below_threshold_suppressed() {
        let decision = engine().evaluate(&reading("Alta", 1.0, None), now());
        assert_eq!(decision.tier, Severity::None);
        assert_eq!(decision.reason_str(), Some("below_threshold"));
    }

    #[test]
    fn test_repeat_poll_hits_cooldown() {
        let mut engine = engine();
        let first = engine.evaluate(&reading("Alta", 8.5, Some(9.0)), now());
        assert!(first.should_notify);

        let one_hour_later = now() + chrono::Duration::hours(1);
        let second = engine.evaluate(&reading("Alta", 8.7, Some(9.0)), one_hour_later);
        assert!(!second.should_notify);
        assert_eq!(second.reason_str(), Some("cooldown_active"));
        assert_eq!(second.tier, Severity::Moderate);
    }

    #[test]
    fn test_batch_resilience() {
        let mut engine = engine();
        let readings = vec![
            reading("Alta", 8.5, Some(9.0)),
            reading("Brighton", 6.5, Some(7.0)),
            LocationReading::unavailable("Snowbird"),
            reading("Solitude", 13.0, Some(12.5)),
            reading("Sundance", 2.5, Some(3.0)),
        ];
        let report = engine.run_cycle(&readings, now());

        assert_eq!(report.decisions.len(), 5);
        assert_eq!(report.locations_evaluated, 5);
        assert_eq!(report.alerts_triggered, 4);
        assert_eq!(report.errors, 1);
        assert_eq!(
            report.decisions[2].reason_str(),
            Some("data_unavailable")
        );
    }

    #[test]
    fn test_report_preserves_input_order() {
        let mut engine = engine();
        let readings = vec![
            reading("Alta", 0.0, None),
            reading("Brighton", 8.5, Some(9.0)),
        ];
        let report = engine.run_cycle(&readings, now());
        assert_eq!(report.decisions[0].location_id, "Alta");
        assert_eq!(report.decisions[1].location_id, "Brighton");
    }
}
