//! Snowfall Engine Facade
//!
//! Unified re-exports for the snowfall decision engine.
//!
//! This facade provides a single entry point to all engine functionality:
//! - Models, the `CooldownStore` contract, and errors from SPI
//! - Configuration types from API
//! - Builder, verifier, classifier, cooldown tracking, and orchestration
//!   from Core

// Re-export everything from SPI
pub use snowfall_spi::*;

// Re-export everything from API
pub use snowfall_api::*;

// Re-export everything from Core
pub use snowfall_core::*;
