//! Weather provider error types.

use thiserror::Error;

/// Weather provider errors.
///
/// All variants describe a failed or unusable fetch for one location; the
/// orchestration layer converts them into missing readings rather than
/// aborting a batch.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// HTTP request failed (connect, timeout, or body read).
    #[error("request failed: {0}")]
    RequestFailed(String),

    /// Upstream returned a non-success status.
    #[error("unexpected HTTP status {status}")]
    Http { status: u16 },

    /// Response body did not match the expected shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// Response parsed but a required field was absent.
    #[error("missing field: {0}")]
    MissingField(String),

    /// Provider-level error payload.
    #[error("API error [{code}]: {description}")]
    Api { code: String, description: String },

    /// Response contained no usable data.
    #[error("no data returned")]
    NoData,
}

/// Result type for weather fetch operations.
pub type Result<T> = std::result::Result<T, WeatherError>;
