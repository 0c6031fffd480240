//! # weather
//!
//! Weather provider clients for snowfall observation.
//!
//! Two independent providers are implemented: OpenWeatherMap (primary) and
//! WeatherAPI.com (secondary, used for cross-verification). HTTP fetching
//! sits behind the `fetch` feature; response parsing is pure and always
//! available, so provider behavior is testable offline.
//!
//! # Example
//!
//! ```no_run
//! use weather::OpenWeatherClient;
//! use weather_spi::{Coordinates, WeatherProvider};
//!
//! let client = OpenWeatherClient::new("api-key");
//! let observation = client.observe(&Coordinates::new(40.6514, -111.5080))?;
//! println!("{} mm of fresh snow", observation.snow_depth);
//! # Ok::<(), weather_spi::WeatherError>(())
//! ```

mod cache;
mod openweather;
#[cfg(feature = "fetch")]
mod transport;
mod weatherapi;

pub use cache::ResponseCache;
pub use openweather::OpenWeatherClient;
pub use weatherapi::WeatherApiClient;
