//! Contracts for weather providers.

mod weather_provider;

pub use weather_provider::WeatherProvider;
