//! # snowfall
//!
//! Snowfall evaluation and alert decision engine.
//!
//! Normalizes provider observations into canonical records, cross-verifies
//! two independent sources, classifies verified snowfall into severity
//! tiers, and enforces a per-location alert cooldown. See the `Engine`
//! orchestrator for the per-cycle entry point.

pub use snowfall_facade::*;
