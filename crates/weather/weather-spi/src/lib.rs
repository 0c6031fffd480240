//! Weather Provider Service Provider Interface
//!
//! Defines the provider contract, coordinate model, and error types for
//! weather data fetching.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::WeatherProvider;
pub use error::{Result, WeatherError};
pub use model::Coordinates;
