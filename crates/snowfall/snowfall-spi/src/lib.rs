//! Snowfall Decision Engine Service Provider Interface
//!
//! Defines models, contracts, and error types for snowfall evaluation.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::CooldownStore;
pub use error::{Result, SnowfallError};
pub use model::{
    AlertDecision, AlertMarker, Confidence, CycleReport, DepthUnit, LocationReading,
    RawObservation, Severity, SnowRecord, Source, SuppressReason, TemperatureUnit, Verification,
};
