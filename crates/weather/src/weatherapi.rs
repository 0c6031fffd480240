//! WeatherAPI.com client (secondary source).
//!
//! Uses the forecast.json endpoint. Snow totals arrive as `totalsnow_cm`
//! in centimeters; temperatures as `temp_f`. The free tier carries no
//! usable second-day forecast, so `forecast_depth` is always zero here.

use std::sync::Mutex;

use chrono::{TimeZone, Utc};
use serde::Deserialize;
use snowfall_spi::{DepthUnit, RawObservation, Source, TemperatureUnit};
use weather_spi::{Result, WeatherError};

use crate::cache::ResponseCache;

const BASE_URL: &str = "https://api.weatherapi.com/v1";

// ============================================================================
// Response DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: CurrentEntry,
    forecast: ForecastEntry,
}

#[derive(Debug, Deserialize)]
struct CurrentEntry {
    temp_f: f64,
    condition: Option<ConditionEntry>,
    last_updated_epoch: i64,
}

#[derive(Debug, Deserialize)]
struct ConditionEntry {
    text: String,
}

#[derive(Debug, Deserialize)]
struct ForecastEntry {
    #[serde(default)]
    forecastday: Vec<ForecastDay>,
}

#[derive(Debug, Deserialize)]
struct ForecastDay {
    day: DayEntry,
}

#[derive(Debug, Deserialize)]
struct DayEntry {
    totalsnow_cm: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: i64,
    message: String,
}

// ============================================================================
// Client
// ============================================================================

/// WeatherAPI.com client.
#[derive(Debug)]
pub struct WeatherApiClient {
    api_key: String,
    base_url: String,
    cache: Mutex<ResponseCache>,
}

impl WeatherApiClient {
    /// Create a client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
            cache: Mutex::new(ResponseCache::default()),
        }
    }

    /// Override the base URL (tests and proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn forecast_url(&self, lat: f64, lon: f64) -> String {
        format!(
            "{}/forecast.json?key={}&q={},{}&days=1",
            self.base_url, self.api_key, lat, lon
        )
    }

    /// Parse a forecast.json response into a raw observation.
    ///
    /// The day's snow total stays in centimeters; the canonical record
    /// builder owns unit conversion.
    pub fn parse_observation(json: &str) -> Result<RawObservation> {
        let response: ForecastResponse = match serde_json::from_str(json) {
            Ok(response) => response,
            Err(parse_error) => {
                if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(json) {
                    return Err(WeatherError::Api {
                        code: envelope.error.code.to_string(),
                        description: envelope.error.message,
                    });
                }
                return Err(WeatherError::Parse(parse_error.to_string()));
            }
        };

        let day = response
            .forecast
            .forecastday
            .first()
            .ok_or(WeatherError::NoData)?;
        let snow_cm = day
            .day
            .totalsnow_cm
            .ok_or_else(|| WeatherError::MissingField("totalsnow_cm".to_string()))?;

        let epoch = response.current.last_updated_epoch;
        let observed_at = Utc
            .timestamp_opt(epoch, 0)
            .single()
            .ok_or_else(|| WeatherError::Parse(format!("invalid observation timestamp: {}", epoch)))?;

        Ok(RawObservation {
            source: Source::WeatherApi,
            snow_depth: snow_cm,
            depth_unit: DepthUnit::Centimeters,
            forecast_depth: 0.0,
            temperature: response.current.temp_f,
            temperature_unit: TemperatureUnit::Fahrenheit,
            observed_at,
            conditions: response.current.condition.map(|c| c.text),
        })
    }

    #[cfg(feature = "fetch")]
    fn fetch_body(&self, url: &str) -> Result<String> {
        {
            let cache = self.cache.lock().unwrap();
            if let Some(body) = cache.get(url) {
                tracing::debug!(endpoint = "forecast.json", "cache hit");
                return Ok(body.to_string());
            }
        }
        let client = crate::transport::blocking_client()?;
        let body = crate::transport::get_with_retry(&client, url, "forecast.json")?;
        self.cache.lock().unwrap().put(url, body.clone());
        Ok(body)
    }

    /// Fetch a snow observation for coordinates (blocking).
    #[cfg(feature = "fetch")]
    pub fn fetch_observation(&self, coordinates: &weather_spi::Coordinates) -> Result<RawObservation> {
        let body = self.fetch_body(&self.forecast_url(coordinates.lat, coordinates.lon))?;
        Self::parse_observation(&body)
    }

    /// Fetch a snow observation for coordinates (async). Bypasses the
    /// response cache; intended for async hosts that manage their own.
    #[cfg(feature = "fetch")]
    pub async fn fetch_observation_async(
        &self,
        coordinates: &weather_spi::Coordinates,
    ) -> Result<RawObservation> {
        let client = crate::transport::async_client()?;
        let url = self.forecast_url(coordinates.lat, coordinates.lon);
        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| WeatherError::RequestFailed(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Http {
                status: status.as_u16(),
            });
        }
        let body = response
            .text()
            .await
            .map_err(|e| WeatherError::RequestFailed(e.to_string()))?;
        Self::parse_observation(&body)
    }
}

#[cfg(feature = "fetch")]
impl weather_spi::WeatherProvider for WeatherApiClient {
    fn source(&self) -> Source {
        Source::WeatherApi
    }

    fn observe(&self, coordinates: &weather_spi::Coordinates) -> Result<RawObservation> {
        self.fetch_observation(coordinates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORECAST_FIXTURE: &str = r#"{
        "current": {
            "temp_f": 26.6,
            "condition": {"text": "Light snow"},
            "last_updated_epoch": 1736920800
        },
        "forecast": {
            "forecastday": [
                {"day": {"totalsnow_cm": 21.6, "maxtemp_f": 30.2}}
            ]
        }
    }"#;

    #[test]
    fn test_parse_observation() {
        let observation = WeatherApiClient::parse_observation(FORECAST_FIXTURE).unwrap();

        assert_eq!(observation.source, Source::WeatherApi);
        assert_eq!(observation.snow_depth, 21.6);
        assert_eq!(observation.depth_unit, DepthUnit::Centimeters);
        assert_eq!(observation.forecast_depth, 0.0);
        assert_eq!(observation.temperature, 26.6);
        assert_eq!(observation.conditions.as_deref(), Some("Light snow"));
        assert_eq!(observation.observed_at.timestamp(), 1736920800);
    }

    #[test]
    fn test_empty_forecastday_is_no_data() {
        let body = r#"{
            "current": {"temp_f": 26.6, "condition": null, "last_updated_epoch": 1736920800},
            "forecast": {"forecastday": []}
        }"#;
        assert!(matches!(
            WeatherApiClient::parse_observation(body),
            Err(WeatherError::NoData)
        ));
    }

    #[test]
    fn test_missing_snow_total_is_missing_field() {
        let body = r#"{
            "current": {"temp_f": 26.6, "condition": null, "last_updated_epoch": 1736920800},
            "forecast": {"forecastday": [{"day": {"maxtemp_f": 30.2}}]}
        }"#;
        assert!(matches!(
            WeatherApiClient::parse_observation(body),
            Err(WeatherError::MissingField(_))
        ));
    }

    #[test]
    fn test_api_error_payload_is_surfaced() {
        let body = r#"{"error": {"code": 2006, "message": "API key provided is invalid"}}"#;
        match WeatherApiClient::parse_observation(body) {
            Err(WeatherError::Api { code, description }) => {
                assert_eq!(code, "2006");
                assert_eq!(description, "API key provided is invalid");
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_url_builder() {
        let client = WeatherApiClient::new("key456");
        let url = client.forecast_url(40.5884, -111.6387);
        assert!(url.starts_with("https://api.weatherapi.com/v1/forecast.json?"));
        assert!(url.contains("key=key456"));
        assert!(url.contains("q=40.5884,-111.6387"));
        assert!(url.contains("days=1"));
    }
}
