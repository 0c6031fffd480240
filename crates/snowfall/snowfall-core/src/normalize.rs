//! Canonical snow record builder.
//!
//! Converts provider-tagged raw payloads into unit-normalized records.
//! Conversions are exact; rounding happens only at presentation time.

use snowfall_spi::{
    DepthUnit, RawObservation, Result, SnowRecord, SnowfallError, TemperatureUnit,
};

/// Build a canonical record from a raw provider observation.
///
/// Negative or non-finite depths indicate a corrupt upstream payload and
/// are rejected rather than clamped.
pub fn canonical(location_id: &str, raw: &RawObservation) -> Result<SnowRecord> {
    check_depth(raw, "snow_depth", raw.snow_depth)?;
    check_depth(raw, "forecast_depth", raw.forecast_depth)?;
    if !raw.temperature.is_finite() {
        return Err(data_format(raw, "temperature is not a finite number".to_string()));
    }

    Ok(SnowRecord {
        location_id: location_id.to_string(),
        source: raw.source,
        observed_snow_in: depth_to_inches(raw.snow_depth, raw.depth_unit),
        forecast_snow_in: depth_to_inches(raw.forecast_depth, raw.depth_unit),
        observed_at: raw.observed_at,
        temperature_f: temp_to_fahrenheit(raw.temperature, raw.temperature_unit),
        conditions: raw.conditions.clone(),
    })
}

fn depth_to_inches(value: f64, unit: DepthUnit) -> f64 {
    match unit {
        DepthUnit::Inches => value,
        DepthUnit::Centimeters => value / 2.54,
        DepthUnit::Millimeters => value / 25.4,
    }
}

fn temp_to_fahrenheit(value: f64, unit: TemperatureUnit) -> f64 {
    match unit {
        TemperatureUnit::Fahrenheit => value,
        TemperatureUnit::Celsius => value * 9.0 / 5.0 + 32.0,
    }
}

fn check_depth(raw: &RawObservation, field: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(data_format(raw, format!("{} is not a finite number", field)));
    }
    if value < 0.0 {
        return Err(data_format(raw, format!("negative {}: {}", field, value)));
    }
    Ok(())
}

fn data_format(raw: &RawObservation, reason: String) -> SnowfallError {
    SnowfallError::DataFormat {
        source: raw.source.to_string(),
        reason,
    }
}
