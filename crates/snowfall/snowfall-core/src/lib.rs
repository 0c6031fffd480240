//! Snowfall decision engine implementations.

pub mod classify;
pub mod cooldown;
pub mod normalize;
pub mod orchestrate;
pub mod verify;

pub use classify::classify;
pub use cooldown::{CooldownTracker, JsonFileCooldownStore, MemoryCooldownStore};
pub use normalize::canonical;
pub use orchestrate::Engine;
pub use verify::{needs_secondary, verify};
