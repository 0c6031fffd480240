//! Environment-sourced runtime settings.

use std::path::PathBuf;

/// Runtime settings sourced from the environment.
///
/// Engine thresholds live in `snowfall_api::EngineConfig`; this struct
/// carries the credentials and wiring the runner itself needs.
#[derive(Debug, Clone)]
pub struct Settings {
    /// OpenWeatherMap API key (primary source).
    pub openweather_api_key: String,
    /// WeatherAPI.com API key (secondary source).
    pub weatherapi_key: String,
    /// Slack webhook for alerts.
    pub slack_webhook_url: String,
    /// Slack webhook for monitoring status updates, if separate.
    pub slack_monitoring_webhook_url: Option<String>,
    /// Kill switch: deliver nothing when set.
    pub disable_notifications: bool,
    /// Where cooldown state is persisted; in-memory when unset.
    pub cooldown_state_path: Option<PathBuf>,
}

impl Settings {
    /// Load settings from process environment. Empty values count as
    /// unset.
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());

        Self {
            openweather_api_key: var("OPENWEATHER_API_KEY").unwrap_or_default(),
            weatherapi_key: var("WEATHERAPI_KEY").unwrap_or_default(),
            slack_webhook_url: var("SLACK_WEBHOOK_URL").unwrap_or_default(),
            slack_monitoring_webhook_url: var("SLACK_MONITORING_WEBHOOK_URL"),
            disable_notifications: var("DISABLE_NOTIFICATIONS")
                .map(|v| v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            cooldown_state_path: var("COOLDOWN_STATE_PATH").map(PathBuf::from),
        }
    }

    /// Names of required variables that are missing, reported before a
    /// cycle runs so misconfiguration fails loudly and by name.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.openweather_api_key.is_empty() {
            missing.push("OPENWEATHER_API_KEY");
        }
        if self.weatherapi_key.is_empty() {
            missing.push("WEATHERAPI_KEY");
        }
        if self.slack_webhook_url.is_empty() {
            missing.push("SLACK_WEBHOOK_URL");
        }
        missing
    }
}
