//! End-to-end tests for the snowfall engine
//!
//! Exercise complete cycle workflows, including cooldown state surviving an
//! engine restart through the JSON file store.

use chrono::{DateTime, Duration, TimeZone, Utc};
use snowfall::{
    DepthUnit, Engine, EngineConfig, JsonFileCooldownStore, LocationReading, RawObservation,
    Source, TemperatureUnit,
};
use std::path::PathBuf;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 15, 6, 0, 0).unwrap()
}

fn observation(source: Source, inches: f64) -> RawObservation {
    RawObservation {
        source,
        snow_depth: inches,
        depth_unit: DepthUnit::Inches,
        forecast_depth: 0.0,
        temperature: 20.0,
        temperature_unit: TemperatureUnit::Fahrenheit,
        observed_at: now(),
        conditions: None,
    }
}

fn reading(location: &str, inches: f64) -> LocationReading {
    LocationReading::new(
        location,
        Some(observation(Source::OpenWeatherMap, inches)),
        Some(observation(Source::WeatherApi, inches + 0.3)),
    )
}

struct StateFile(PathBuf);

impl StateFile {
    fn new(tag: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "snowfall-e2e-{}-{}.json",
            tag,
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        Self(path)
    }
}

impl Drop for StateFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

#[test]
fn e2e_cooldown_state_survives_restart() {
    let state = StateFile::new("restart");

    // First process: alert fires and is persisted.
    {
        let store = JsonFileCooldownStore::open(&state.0).unwrap();
        let mut engine = Engine::new(EngineConfig::default(), store).unwrap();
        let report = engine.run_cycle(&[reading("Alta", 8.5)], now());
        assert_eq!(report.alerts_triggered, 1);
    }

    let contents = std::fs::read_to_string(&state.0).unwrap();
    assert!(contents.contains("Alta"));
    assert!(contents.contains("last_alert_time"));
    assert!(contents.contains("\"last_alert_tier\": \"moderate\""));

    // Second process one hour later: the restart does not forget the alert.
    {
        let store = JsonFileCooldownStore::open(&state.0).unwrap();
        let mut engine = Engine::new(EngineConfig::default(), store).unwrap();
        let report = engine.run_cycle(&[reading("Alta", 8.7)], now() + Duration::hours(1));
        assert_eq!(report.alerts_triggered, 0);
        assert_eq!(
            report.decisions[0].reason_str(),
            Some("cooldown_active")
        );
    }

    // Third process past the window: alerting resumes.
    {
        let store = JsonFileCooldownStore::open(&state.0).unwrap();
        let mut engine = Engine::new(EngineConfig::default(), store).unwrap();
        let report = engine.run_cycle(&[reading("Alta", 8.5)], now() + Duration::hours(13));
        assert_eq!(report.alerts_triggered, 1);
    }
}

#[test]
fn e2e_absent_state_file_means_idle() {
    let state = StateFile::new("fresh");
    let store = JsonFileCooldownStore::open(&state.0).unwrap();
    let mut engine = Engine::new(EngineConfig::default(), store).unwrap();

    let report = engine.run_cycle(&[reading("Brighton", 6.5)], now());
    assert_eq!(report.alerts_triggered, 1);
}

#[test]
fn e2e_corrupt_state_file_refuses_to_open() {
    let state = StateFile::new("corrupt");
    std::fs::write(&state.0, "not json at all").unwrap();
    assert!(JsonFileCooldownStore::open(&state.0).is_err());
}

#[test]
fn e2e_multi_cycle_storm_produces_one_alert_per_escalation() {
    let state = StateFile::new("storm");
    let store = JsonFileCooldownStore::open(&state.0).unwrap();
    let mut engine = Engine::new(EngineConfig::default(), store).unwrap();

    // A storm building over four 1-hour polls: light, light, moderate, heavy.
    let amounts = [2.5, 3.0, 7.0, 12.5];
    let mut fired = Vec::new();
    for (hour, &inches) in amounts.iter().enumerate() {
        let at = now() + Duration::hours(hour as i64);
        let report = engine.run_cycle(&[reading("Snowbird", inches)], at);
        if report.alerts_triggered > 0 {
            fired.push(report.decisions[0].tier);
        }
    }

    // One alert per severity step, none for the repeat light reading.
    assert_eq!(
        fired.iter().map(|t| t.as_str()).collect::<Vec<_>>(),
        vec!["light", "moderate", "heavy"]
    );
}
