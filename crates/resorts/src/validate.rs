//! Resort data validation.

use std::collections::BTreeMap;

use tracing::{info, warn};

use crate::model::Resort;

/// Highest plausible base elevation, in feet. Everest is ~29,000.
const MAX_ELEVATION_FT: u32 = 30_000;

/// Validate a single resort, returning every problem found.
pub fn validate_resort(resort: &Resort) -> Vec<String> {
    let mut errors = Vec::new();

    if resort.name.trim().is_empty() {
        errors.push("name must not be empty".to_string());
    }

    let lat = resort.coordinates.lat;
    let lon = resort.coordinates.lon;
    if !(-90.0..=90.0).contains(&lat) {
        errors.push(format!("latitude {} out of range -90 to 90", lat));
    }
    if !(-180.0..=180.0).contains(&lon) {
        errors.push(format!("longitude {} out of range -180 to 180", lon));
    }

    if resort.elevation_ft > MAX_ELEVATION_FT {
        errors.push(format!(
            "elevation {} ft out of reasonable range (0 to {})",
            resort.elevation_ft, MAX_ELEVATION_FT
        ));
    }

    if !resort.website.starts_with("http://") && !resort.website.starts_with("https://") {
        errors.push("website URL must start with http:// or https://".to_string());
    }

    if !errors.is_empty() {
        warn!(
            resort = %resort.name,
            problems = errors.len(),
            "resort failed validation"
        );
    }
    errors
}

/// Validate every resort; returns name to problems for the ones that
/// failed. An empty map means the whole registry is clean.
pub fn validate_all(resorts: &[Resort]) -> BTreeMap<String, Vec<String>> {
    let mut failures = BTreeMap::new();
    for resort in resorts {
        let errors = validate_resort(resort);
        if !errors.is_empty() {
            failures.insert(resort.name.clone(), errors);
        }
    }

    if failures.is_empty() {
        info!(resorts = resorts.len(), "all resorts passed validation");
    } else {
        warn!(failed = failures.len(), "resorts failed validation");
    }
    failures
}
