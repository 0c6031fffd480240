//! Error types for the snowfall engine.
//!
//! This module contains error types and the Result alias.

mod snowfall_error;

pub use snowfall_error::{Result, SnowfallError};
