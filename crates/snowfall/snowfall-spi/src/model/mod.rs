//! Data models for snowfall evaluation.
//!
//! This module contains data structures used throughout the decision engine.

mod decision;
mod observation;
mod record;
mod severity;
mod verification;

pub use decision::{AlertDecision, CycleReport, SuppressReason};
pub use observation::{DepthUnit, LocationReading, RawObservation, TemperatureUnit};
pub use record::{SnowRecord, Source};
pub use severity::{AlertMarker, Severity};
pub use verification::{Confidence, Verification};
