//! Data models for weather fetching.

mod coordinates;

pub use coordinates::Coordinates;
