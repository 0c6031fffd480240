//! Snowfall engine error types.

/// Snowfall engine errors.
#[derive(Debug)]
pub enum SnowfallError {
    /// Invalid configuration, detected at engine construction. Never
    /// recovered; the engine refuses to start.
    Configuration { name: String, reason: String },

    /// Malformed provider payload. Local to one location; never aborts a
    /// batch.
    DataFormat { source: String, reason: String },
}

impl std::fmt::Display for SnowfallError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnowfallError::Configuration { name, reason } => {
                write!(f, "invalid configuration: {name} - {reason}")
            }
            SnowfallError::DataFormat { source, reason } => {
                write!(f, "malformed payload from {source}: {reason}")
            }
        }
    }
}

impl std::error::Error for SnowfallError {}

/// Result type for snowfall engine operations.
pub type Result<T> = std::result::Result<T, SnowfallError>;
