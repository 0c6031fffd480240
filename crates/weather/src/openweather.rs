//! OpenWeatherMap client (primary source).
//!
//! Uses the free current-weather and 5-day/3-hour forecast endpoints.
//! Snow depths are reported in millimeters regardless of the requested
//! unit system; temperatures follow `units=imperial`.

use std::sync::Mutex;

use chrono::{TimeZone, Utc};
use serde::Deserialize;
use snowfall_spi::{DepthUnit, RawObservation, Source, TemperatureUnit};
use weather_spi::{Result, WeatherError};

use crate::cache::ResponseCache;

const BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
/// Forecast periods summed for the next-24h estimate (8 x 3 h).
const FORECAST_PERIODS_24H: usize = 8;

// ============================================================================
// Response DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    #[serde(default)]
    weather: Vec<ConditionEntry>,
    main: MainEntry,
    snow: Option<PrecipEntry>,
    dt: i64,
}

#[derive(Debug, Deserialize)]
struct ConditionEntry {
    description: String,
}

#[derive(Debug, Deserialize)]
struct MainEntry {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct PrecipEntry {
    #[serde(rename = "1h")]
    one_hour: Option<f64>,
    #[serde(rename = "3h")]
    three_hour: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    list: Vec<ForecastPeriod>,
}

#[derive(Debug, Deserialize)]
struct ForecastPeriod {
    snow: Option<PrecipEntry>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    cod: serde_json::Value,
    message: String,
}

// ============================================================================
// Client
// ============================================================================

/// OpenWeatherMap API client.
#[derive(Debug)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    cache: Mutex<ResponseCache>,
}

impl OpenWeatherClient {
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

    fn weather_url(&self, lat: f64, lon: f64) -> String {
        format!(
            "{}/weather?lat={}&lon={}&units=imperial&appid={}",
            self.base_url, lat, lon, self.api_key
        )
    }

    fn forecast_url(&self, lat: f64, lon: f64) -> String {
        format!(
            "{}/forecast?lat={}&lon={}&units=imperial&appid={}",
            self.base_url, lat, lon, self.api_key
        )
    }

    /// Combine current and forecast responses into a raw observation.
    ///
    /// Current snow comes from the `1h` accumulation (falling back to `3h`);
    /// the 24-hour forecast sums the next eight 3-hour periods. Depths stay
    /// in millimeters; the canonical record builder owns unit conversion.
    pub fn parse_observation(current_json: &str, forecast_json: &str) -> Result<RawObservation> {
        let current: CurrentResponse = parse_or_api_error(current_json)?;
        let forecast: ForecastResponse = parse_or_api_error(forecast_json)?;

        let snow_mm = current
            .snow
            .as_ref()
            .and_then(|s| s.one_hour.or(s.three_hour))
            .unwrap_or(0.0);

        let forecast_mm: f64 = forecast
            .list
            .iter()
            .take(FORECAST_PERIODS_24H)
            .filter_map(|p| p.snow.as_ref().and_then(|s| s.three_hour.or(s.one_hour)))
            .sum();

        let observed_at = Utc.timestamp_opt(current.dt, 0).single().ok_or_else(|| {
            WeatherError::Parse(format!("invalid observation timestamp: {}", current.dt))
        })?;

        Ok(RawObservation {
            source: Source::OpenWeatherMap,
            snow_depth: snow_mm,
            depth_unit: DepthUnit::Millimeters,
            forecast_depth: forecast_mm,
            temperature: current.main.temp,
            temperature_unit: TemperatureUnit::Fahrenheit,
            observed_at,
            conditions: current.weather.first().map(|w| w.description.clone()),
        })
    }

    #[cfg(feature = "fetch")]
    fn fetch_body(&self, url: &str, endpoint: &str) -> Result<String> {
        {
            let cache = self.cache.lock().unwrap();
            if let Some(body) = cache.get(url) {
                tracing::debug!(endpoint, "cache hit");
                return Ok(body.to_string());
            }
        }
        let client = crate::transport::blocking_client()?;
        let body = crate::transport::get_with_retry(&client, url, endpoint)?;
        self.cache.lock().unwrap().put(url, body.clone());
        Ok(body)
    }

    /// Fetch a snow observation for coordinates (blocking).
    #[cfg(feature = "fetch")]
    pub fn fetch_observation(&self, coordinates: &weather_spi::Coordinates) -> Result<RawObservation> {
        let current = self.fetch_body(&self.weather_url(coordinates.lat, coordinates.lon), "weather")?;
        let forecast =
            self.fetch_body(&self.forecast_url(coordinates.lat, coordinates.lon), "forecast")?;
        Self::parse_observation(&current, &forecast)
    }

    /// Fetch a snow observation for coordinates (async). Bypasses the
    /// response cache; intended for async hosts that manage their own.
    ///
    /// ```no_run
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), weather_spi::WeatherError> {
    /// use weather::OpenWeatherClient;
    /// use weather_spi::Coordinates;
    ///
    /// let client = OpenWeatherClient::new("api-key");
    /// let observation = client
    ///     .fetch_observation_async(&Coordinates::new(40.6514, -111.5080))
    ///     .await?;
    /// println!("{} mm observed", observation.snow_depth);
    /// # Ok(())
    /// # }
    /// ```
    #[cfg(feature = "fetch")]
    pub async fn fetch_observation_async(
        &self,
        coordinates: &weather_spi::Coordinates,
    ) -> Result<RawObservation> {
        let client = crate::transport::async_client()?;
        let current = get_async(&client, &self.weather_url(coordinates.lat, coordinates.lon)).await?;
        let forecast =
            get_async(&client, &self.forecast_url(coordinates.lat, coordinates.lon)).await?;
        Self::parse_observation(&current, &forecast)
    }
}

#[cfg(feature = "fetch")]
impl weather_spi::WeatherProvider for OpenWeatherClient {
    fn source(&self) -> Source {
        Source::OpenWeatherMap
    }

    fn observe(&self, coordinates: &weather_spi::Coordinates) -> Result<RawObservation> {
        self.fetch_observation(coordinates)
    }
}

#[cfg(feature = "fetch")]
async fn get_async(client: &reqwest::Client, url: &str) -> Result<String> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| WeatherError::RequestFailed(e.to_string()))?;
    let status = response.status();
    if !status.is_success() {
        return Err(WeatherError::Http {
            status: status.as_u16(),
        });
    }
    response
        .text()
        .await
        .map_err(|e| WeatherError::RequestFailed(e.to_string()))
}

/// Parse a response body, surfacing the provider's own error payload when
/// the expected shape does not match.
fn parse_or_api_error<T: for<'de> Deserialize<'de>>(json: &str) -> Result<T> {
    match serde_json::from_str(json) {
        Ok(value) => Ok(value),
        Err(parse_error) => {
            if let Ok(api_error) = serde_json::from_str::<ErrorResponse>(json) {
                return Err(WeatherError::Api {
                    code: api_error.cod.to_string(),
                    description: api_error.message,
                });
            }
            Err(WeatherError::Parse(parse_error.to_string()))
        }
    }
}
