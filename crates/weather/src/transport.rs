//! HTTP transport with retry.

use std::time::Duration;

use tracing::{debug, warn};
use weather_spi::{Result, WeatherError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_ATTEMPTS: u32 = 3;
const RETRY_BASE_DELAY_MS: u64 = 1_000;

/// Build a blocking client with the shared request timeout.
pub(crate) fn blocking_client() -> Result<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| WeatherError::RequestFailed(e.to_string()))
}

/// Build an async client with the shared request timeout.
pub(crate) fn async_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| WeatherError::RequestFailed(e.to_string()))
}

/// GET a URL, retrying transient failures with exponential backoff.
///
/// Client errors (4xx) are returned immediately: the request itself is
/// wrong and retrying cannot fix it. URLs carry API keys, so logs only
/// name the endpoint.
pub(crate) fn get_with_retry(
    client: &reqwest::blocking::Client,
    url: &str,
    endpoint: &str,
) -> Result<String> {
    let mut last_error = WeatherError::NoData;

    for attempt in 1..=MAX_ATTEMPTS {
        debug!(endpoint, attempt, "requesting");
        match client.get(url).send() {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    return response
                        .text()
                        .map_err(|e| WeatherError::RequestFailed(e.to_string()));
                }
                if status.is_client_error() {
                    return Err(WeatherError::Http {
                        status: status.as_u16(),
                    });
                }
                last_error = WeatherError::Http {
                    status: status.as_u16(),
                };
            }
            Err(e) => last_error = WeatherError::RequestFailed(e.to_string()),
        }

        if attempt < MAX_ATTEMPTS {
            let delay = RETRY_BASE_DELAY_MS * 2u64.pow(attempt - 1);
            warn!(endpoint, attempt, delay_ms = delay, "request failed, retrying");
            std::thread::sleep(Duration::from_millis(delay));
        }
    }

    Err(last_error)
}
