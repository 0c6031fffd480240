//! Integration tests for the snowfall engine

use chrono::{DateTime, Duration, TimeZone, Utc};
use snowfall::{
    classify, Confidence, DepthUnit, Engine, EngineConfig, LocationReading, MemoryCooldownStore,
    RawObservation, Severity, Source, TemperatureUnit, TierThresholds,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 15, 6, 0, 0).unwrap()
}

fn observation(source: Source, inches: f64) -> RawObservation {
    RawObservation {
        source,
        snow_depth: inches,
        depth_unit: DepthUnit::Inches,
        forecast_depth: 4.0,
        temperature: 25.0,
        temperature_unit: TemperatureUnit::Fahrenheit,
        observed_at: now(),
        conditions: Some("Snow".to_string()),
    }
}

fn reading(location: &str, primary: f64, secondary: Option<f64>) -> LocationReading {
    LocationReading::new(
        location,
        Some(observation(Source::OpenWeatherMap, primary)),
        secondary.map(|inches| observation(Source::WeatherApi, inches)),
    )
}

fn engine() -> Engine<MemoryCooldownStore> {
    Engine::new(EngineConfig::default(), MemoryCooldownStore::new()).unwrap()
}

#[test]
fn corroborated_moderate_snowfall_alerts() {
    let mut engine = engine();
    let decision = engine.evaluate(&reading("Park City Mountain", 8.5, Some(9.0)), now());

    assert_eq!(decision.tier, Severity::Moderate);
    assert!(decision.should_notify);
    assert!(decision.suppress_reason.is_none());
    assert_eq!(decision.confidence, Some(Confidence::Corroborated));
    assert_eq!(decision.verified_snow_in, 8.5);
}

#[test]
fn repeat_poll_one_hour_later_is_suppressed() {
    let mut engine = engine();
    assert!(engine
        .evaluate(&reading("Park City Mountain", 8.5, Some(9.0)), now())
        .should_notify);

    let later = now() + Duration::hours(1);
    let decision = engine.evaluate(&reading("Park City Mountain", 8.7, Some(9.0)), later);

    assert!(!decision.should_notify);
    assert_eq!(decision.reason_str(), Some("cooldown_active"));
}

#[test]
fn escalation_during_cooldown_still_alerts() {
    let mut engine = engine();
    assert!(engine
        .evaluate(&reading("Alta", 3.0, Some(3.5)), now())
        .should_notify);

    let later = now() + Duration::hours(2);
    let decision = engine.evaluate(&reading("Alta", 14.0, Some(13.0)), later);

    assert_eq!(decision.tier, Severity::Heavy);
    assert!(decision.should_notify);
}

#[test]
fn same_tier_after_window_expiry_alerts_again() {
    let mut engine = engine();
    assert!(engine
        .evaluate(&reading("Alta", 8.5, Some(9.0)), now())
        .should_notify);

    let past_window = now() + Duration::hours(12) + Duration::seconds(1);
    let decision = engine.evaluate(&reading("Alta", 8.5, Some(9.0)), past_window);
    assert!(decision.should_notify);
}

#[test]
fn disagreement_rejects_and_never_classifies() {
    let mut engine = engine();
    let decision = engine.evaluate(&reading("Alta", 8.5, Some(20.0)), now());

    assert_eq!(decision.tier, Severity::None);
    assert!(!decision.should_notify);
    assert_eq!(decision.reason_str(), Some("verification_failed"));
    assert_eq!(decision.confidence, Some(Confidence::Rejected));
}

#[test]
fn single_source_reading_alerts_with_disclosure() {
    let mut engine = engine();
    let decision = engine.evaluate(&reading("Alta", 8.5, None), now());

    assert!(decision.should_notify);
    assert_eq!(decision.confidence, Some(Confidence::SingleSource));
}

#[test]
fn metric_units_normalize_before_classification() {
    let mut engine = engine();
    // 33 cm is just shy of 13 inches.
    let raw = RawObservation {
        source: Source::WeatherApi,
        snow_depth: 33.0,
        depth_unit: DepthUnit::Centimeters,
        forecast_depth: 0.0,
        temperature: -7.0,
        temperature_unit: TemperatureUnit::Celsius,
        observed_at: now(),
        conditions: None,
    };
    let decision = engine.evaluate(&LocationReading::new("Alta", Some(raw), None), now());

    assert_eq!(decision.tier, Severity::Heavy);
    let record = decision.record.unwrap();
    assert!((record.observed_snow_in - 33.0 / 2.54).abs() < 1e-9);
    assert!((record.temperature_f - 19.4).abs() < 1e-9);
}

#[test]
fn one_bad_location_does_not_abort_the_batch() {
    let mut engine = engine();
    let readings = vec![
        reading("Park City Mountain", 8.5, Some(9.0)),
        reading("Deer Valley", 7.0, Some(6.0)),
        LocationReading::unavailable("Snowbird"),
        reading("Alta", 12.5, Some(13.0)),
        reading("Brighton", 3.0, Some(2.5)),
    ];
    let report = engine.run_cycle(&readings, now());

    assert_eq!(report.decisions.len(), 5);
    assert_eq!(report.alerts_triggered, 4);
    assert_eq!(report.errors, 1);

    let failed = &report.decisions[2];
    assert_eq!(failed.location_id, "Snowbird");
    assert_eq!(failed.reason_str(), Some("data_unavailable"));
}

#[test]
fn classification_is_monotonic_under_custom_thresholds() {
    let thresholds = TierThresholds::new(1.5, 4.0, 10.0);
    let mut previous = Severity::None;
    for step in 0..300 {
        let tier = classify(step as f64 * 0.05, &thresholds);
        assert!(tier >= previous);
        previous = tier;
    }
}
