//! Cross-source verification.

use snowfall_api::VerifierConfig;
use snowfall_spi::{Confidence, SnowRecord, Verification};
use tracing::{debug, info};

/// Whether a primary reading is worth a secondary-source call.
///
/// Readings at or below the noise floor skip verification entirely so the
/// secondary source's quota is not spent on negligible snowfall.
pub fn needs_secondary(primary_snow_in: f64, config: &VerifierConfig) -> bool {
    primary_snow_in > config.noise_floor_in
}

/// Cross-check a primary record against an optional secondary record.
///
/// When the secondary record is unavailable the primary value is accepted
/// as-is, with [`Confidence::SingleSource`] recorded so downstream
/// consumers can disclose the reduced confidence. The verified amount is
/// always the primary source's number, never an average: once
/// corroborated, the primary source's absolute reading is trusted.
pub fn verify(
    primary: &SnowRecord,
    secondary: Option<&SnowRecord>,
    config: &VerifierConfig,
) -> Verification {
    match secondary {
        Some(record) => {
            let disagreement = (primary.observed_snow_in - record.observed_snow_in).abs();
            let agreed = disagreement <= config.tolerance_in;
            if agreed {
                debug!(
                    location = %primary.location_id,
                    disagreement_in = disagreement,
                    "sources agree"
                );
            } else {
                info!(
                    location = %primary.location_id,
                    disagreement_in = disagreement,
                    tolerance_in = config.tolerance_in,
                    "sources disagree beyond tolerance, rejecting estimate"
                );
            }
            Verification {
                location_id: primary.location_id.clone(),
                verified_snow_in: primary.observed_snow_in,
                is_verified: agreed,
                confidence: if agreed {
                    Confidence::Corroborated
                } else {
                    Confidence::Rejected
                },
                primary: primary.clone(),
                secondary: Some(record.clone()),
                disagreement_in: Some(disagreement),
            }
        }
        None => {
            debug!(
                location = %primary.location_id,
                "no secondary record, accepting primary single-source"
            );
            Verification {
                location_id: primary.location_id.clone(),
                verified_snow_in: primary.observed_snow_in,
                is_verified: true,
                confidence: Confidence::SingleSource,
                primary: primary.clone(),
                secondary: None,
                disagreement_in: None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use snowfall_spi::Source;

    fn record(source: Source, inches: f64) -> SnowRecord {
        SnowRecord {
            location_id: "Snowbird".to_string(),
            source,
            observed_snow_in: inches,
            forecast_snow_in: 0.0,
            observed_at: Utc.with_ymd_and_hms(2025, 1, 15, 6, 0, 0).unwrap(),
            temperature_f: 25.0,
            conditions: None,
        }
    }

    #[test]
    fn test_agreement_within_tolerance() {
        let primary = record(Source::OpenWeatherMap, 8.5);
        let secondary = record(Source::WeatherApi, 9.0);
        let verification = verify(&primary, Some(&secondary), &VerifierConfig::default());

        assert!(verification.is_verified);
        assert_eq!(verification.confidence, Confidence::Corroborated);
        assert_eq!(verification.verified_snow_in, 8.5);
        assert!((verification.disagreement_in.unwrap() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_disagreement_beyond_tolerance() {
        let primary = record(Source::OpenWeatherMap, 8.5);
        let secondary = record(Source::WeatherApi, 20.0);
        let verification = verify(&primary, Some(&secondary), &VerifierConfig::default());

        assert!(!verification.is_verified);
        assert_eq!(verification.confidence, Confidence::Rejected);
    }

    #[test]
    fn test_exact_tolerance_boundary_agrees() {
        let primary = record(Source::OpenWeatherMap, 8.0);
        let secondary = record(Source::WeatherApi, 10.0);
        let verification = verify(&primary, Some(&secondary), &VerifierConfig::default());
        assert!(verification.is_verified);
    }

    #[test]
    fn test_missing_secondary_defaults_to_verified() {
        let primary = record(Source::OpenWeatherMap, 8.5);
        let verification = verify(&primary, None, &VerifierConfig::default());

        assert!(verification.is_verified);
        assert_eq!(verification.confidence, Confidence::SingleSource);
        assert_eq!(verification.verified_snow_in, 8.5);
        assert!(verification.secondary.is_none());
        assert!(verification.disagreement_in.is_none());
    }

    #[test]
    fn test_verified_amount_is_primary_not_average() {
        let primary = record(Source::OpenWeatherMap, 8.0);
        let secondary = record(Source::WeatherApi, 9.5);
        let verification = verify(&primary, Some(&secondary), &VerifierConfig::default());
        assert_eq!(verification.verified_snow_in, 8.0);
    }

    #[test]
    fn test_noise_floor_gate() {
        let config = VerifierConfig::default();
        assert!(!needs_secondary(0.0, &config));
        assert!(!needs_secondary(0.1, &config));
        assert!(needs_secondary(0.11, &config));
        assert!(needs_secondary(8.5, &config));
    }
}
