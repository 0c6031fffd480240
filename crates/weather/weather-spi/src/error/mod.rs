//! Error types for weather fetching.
//!
//! This module contains error types and the Result alias.

mod weather_error;

pub use weather_error::{Result, WeatherError};
