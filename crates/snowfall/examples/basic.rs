//! Basic example demonstrating the snowfall decision engine
//!
//! Run with: cargo run --example basic -p snowfall

use chrono::{Duration, Utc};
use snowfall::{
    DepthUnit, Engine, EngineConfig, LocationReading, MemoryCooldownStore, RawObservation, Source,
    TemperatureUnit,
};

fn observation(source: Source, inches: f64) -> RawObservation {
    RawObservation {
        source,
        snow_depth: inches,
        depth_unit: DepthUnit::Inches,
        forecast_depth: 3.0,
        temperature: 24.0,
        temperature_unit: TemperatureUnit::Fahrenheit,
        observed_at: Utc::now(),
        conditions: Some("Heavy snow".to_string()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== snowfall Basic Example ===\n");

    let mut engine = Engine::new(EngineConfig::default(), MemoryCooldownStore::new())?;
    let now = Utc::now();

    // Cycle 1: fresh snow at two resorts, one provider outage.
    let readings = vec![
        LocationReading::new(
            "Alta",
            Some(observation(Source::OpenWeatherMap, 9.0)),
            Some(observation(Source::WeatherApi, 8.6)),
        ),
        LocationReading::new(
            "Brighton",
            Some(observation(Source::OpenWeatherMap, 1.2)),
            None,
        ),
        LocationReading::unavailable("Snowbird"),
    ];

    println!("Cycle 1:");
    let report = engine.run_cycle(&readings, now);
    for decision in &report.decisions {
        match decision.suppress_reason {
            None => println!(
                "   {}: {} alert at {:.1}\"",
                decision.location_id, decision.tier, decision.verified_snow_in
            ),
            Some(reason) => println!("   {}: suppressed ({})", decision.location_id, reason),
        }
    }

    // Cycle 2, an hour later: the same storm should not re-alert.
    println!("\nCycle 2 (1 hour later):");
    let readings = vec![LocationReading::new(
        "Alta",
        Some(observation(Source::OpenWeatherMap, 9.4)),
        Some(observation(Source::WeatherApi, 9.1)),
    )];
    let report = engine.run_cycle(&readings, now + Duration::hours(1));
    for decision in &report.decisions {
        match decision.suppress_reason {
            None => println!(
                "   {}: {} alert at {:.1}\"",
                decision.location_id, decision.tier, decision.verified_snow_in
            ),
            Some(reason) => println!("   {}: suppressed ({})", decision.location_id, reason),
        }
    }

    Ok(())
}
