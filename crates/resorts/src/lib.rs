//! # resorts
//!
//! Ski resort registry: the monitored locations, their metadata, selection
//! filtering, validation, and JSON import/export.

mod model;
mod registry;
mod validate;

pub use model::{Resort, ResortError};
pub use registry::{builtin, by_region, enabled, enabled_from_lookup, export_json, import_json};
pub use validate::{validate_all, validate_resort};
