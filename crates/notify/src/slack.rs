//! Slack webhook delivery.

use serde_json::Value;
use thiserror::Error;
use tracing::{error, info};

/// Notification delivery errors.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// HTTP request could not be made or completed.
    #[error("delivery failed: {0}")]
    Delivery(String),

    /// Slack rejected the payload.
    #[error("webhook rejected message with status {0}")]
    Http(u16),
}

/// Result type for notification delivery.
pub type Result<T> = std::result::Result<T, NotifyError>;

#[cfg(feature = "webhook")]
const DELIVERY_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(5);

/// Slack webhook notifier.
///
/// Alerts go to the alerts webhook; status updates go to the monitoring
/// webhook when one is configured, otherwise to the alerts webhook. The
/// disabled flag turns sends into logged no-ops for dry runs.
#[derive(Debug, Clone)]
pub struct SlackNotifier {
    webhook_url: String,
    monitoring_url: Option<String>,
    disabled: bool,
}

impl SlackNotifier {
    /// Create a notifier posting to the given alerts webhook.
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            monitoring_url: None,
            disabled: false,
        }
    }

    /// Use a separate monitoring webhook for status updates.
    pub fn with_monitoring(mut self, url: impl Into<String>) -> Self {
        self.monitoring_url = Some(url.into());
        self
    }

    /// Disable outbound delivery; sends become logged no-ops.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Whether delivery is disabled.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Post an alert message to the alerts channel.
    #[cfg(feature = "webhook")]
    pub fn send_alert(&self, message: &Value) -> Result<()> {
        self.post(&self.webhook_url, message)
    }

    /// Post a status update to the monitoring channel.
    #[cfg(feature = "webhook")]
    pub fn send_status(&self, message: &Value) -> Result<()> {
        let url = self.monitoring_url.as_deref().unwrap_or(&self.webhook_url);
        self.post(url, message)
    }

    #[cfg(feature = "webhook")]
    fn post(&self, url: &str, message: &Value) -> Result<()> {
        if self.disabled {
            info!("notifications disabled, skipping delivery");
            return Ok(());
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(DELIVERY_TIMEOUT)
            .build()
            .map_err(|e| NotifyError::Delivery(e.to_string()))?;

        let response = client
            .post(url)
            .json(message)
            .send()
            .map_err(|e| NotifyError::Delivery(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            info!("message delivered");
            Ok(())
        } else {
            error!(status = status.as_u16(), "slack webhook rejected message");
            Err(NotifyError::Http(status.as_u16()))
        }
    }
}
