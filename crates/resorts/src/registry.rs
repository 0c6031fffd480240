//! Built-in resort registry and selection.

use std::path::Path;

use tracing::{info, warn};
use weather_spi::Coordinates;

use crate::model::{Resort, ResortError};

fn resort(
    name: &str,
    lat: f64,
    lon: f64,
    elevation_ft: u32,
    website: &str,
    region: &str,
    terrain: &str,
    vertical_drop_ft: u32,
) -> Resort {
    Resort {
        name: name.to_string(),
        coordinates: Coordinates::new(lat, lon),
        elevation_ft,
        website: website.to_string(),
        region: region.to_string(),
        terrain: terrain.to_string(),
        vertical_drop_ft,
    }
}

/// The built-in set of monitored resorts: the Wasatch Range around
/// Park City, Utah.
pub fn builtin() -> Vec<Resort> {
    vec![
        resort(
            "Park City Mountain",
            40.6514,
            -111.5080,
            10000,
            "https://www.parkcitymountain.com",
            "Park City",
            "Alpine",
            3200,
        ),
        resort(
            "Deer Valley",
            40.6374,
            -111.4783,
            8100,
            "https://www.deervalley.com",
            "Park City",
            "Alpine (Ski Only)",
            3000,
        ),
        resort(
            "Snowbird",
            40.5830,
            -111.6556,
            7760,
            "https://www.snowbird.com",
            "Little Cottonwood Canyon",
            "Alpine",
            3240,
        ),
        resort(
            "Alta",
            40.5884,
            -111.6387,
            8530,
            "https://www.alta.com",
            "Little Cottonwood Canyon",
            "Alpine (Ski Only)",
            2538,
        ),
        resort(
            "Brighton",
            40.5977,
            -111.5836,
            8755,
            "https://www.brightonresort.com",
            "Big Cottonwood Canyon",
            "Alpine",
            1875,
        ),
        resort(
            "Solitude",
            40.6199,
            -111.5919,
            8755,
            "https://www.solitudemountain.com",
            "Big Cottonwood Canyon",
            "Alpine",
            2494,
        ),
        resort(
            "Snowbasin",
            41.2160,
            -111.8572,
            6400,
            "https://www.snowbasin.com",
            "Ogden",
            "Alpine",
            3000,
        ),
        resort(
            "Powder Mountain",
            41.3803,
            -111.7803,
            8900,
            "https://www.powdermountain.com",
            "Ogden",
            "Alpine",
            2522,
        ),
        resort(
            "Sundance",
            40.3924,
            -111.5786,
            6100,
            "https://www.sundanceresort.com",
            "Provo",
            "Alpine",
            2150,
        ),
        resort(
            "Woodward Park City",
            40.7560,
            -111.5763,
            6800,
            "https://www.woodwardparkcity.com",
            "Park City",
            "Action Sports",
            400,
        ),
    ]
}

/// Resorts enabled via the `ENABLED_RESORTS` environment variable.
///
/// The variable is a comma-separated list of resort names; unset or empty
/// means all configured resorts. Unknown names are skipped with a warning.
pub fn enabled(all: &[Resort]) -> Vec<Resort> {
    enabled_from_lookup(all, std::env::var("ENABLED_RESORTS").ok())
}

/// Selection logic behind [`enabled`], testable without process
/// environment.
pub fn enabled_from_lookup(all: &[Resort], selection: Option<String>) -> Vec<Resort> {
    let Some(raw) = selection.filter(|s| !s.trim().is_empty()) else {
        return all.to_vec();
    };

    let mut picked = Vec::new();
    for name in raw.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        match all.iter().find(|r| r.name == name) {
            Some(resort) => picked.push(resort.clone()),
            None => warn!(resort = name, "ENABLED_RESORTS names an unknown resort"),
        }
    }

    info!(
        enabled = picked.len(),
        configured = all.len(),
        "resort selection applied"
    );
    picked
}

/// Resorts in a specific region.
pub fn by_region<'a>(all: &'a [Resort], region: &str) -> Vec<&'a Resort> {
    all.iter().filter(|r| r.region == region).collect()
}

/// Write a resort list to a JSON file.
pub fn export_json(path: impl AsRef<Path>, resorts: &[Resort]) -> Result<(), ResortError> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(resorts).map_err(|e| ResortError::Parse(e.to_string()))?;
    std::fs::write(path, json).map_err(|e| ResortError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Read a resort list from a JSON file.
pub fn import_json(path: impl AsRef<Path>) -> Result<Vec<Resort>, ResortError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|e| ResortError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    serde_json::from_str(&contents).map_err(|e| ResortError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry_size() {
        assert_eq!(builtin().len(), 10);
    }

    #[test]
    fn test_builtin_names_are_unique() {
        let all = builtin();
        let mut names: Vec<&str> = all.iter().map(|r| r.name.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), all.len());
    }

    #[test]
    fn test_no_selection_means_all() {
        let all = builtin();
        assert_eq!(enabled_from_lookup(&all, None).len(), all.len());
        assert_eq!(enabled_from_lookup(&all, Some("  ".to_string())).len(), all.len());
    }

    #[test]
    fn test_selection_keeps_listed_resorts_in_order() {
        let all = builtin();
        let picked = enabled_from_lookup(&all, Some("Alta, Brighton".to_string()));
        let names: Vec<&str> = picked.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Alta", "Brighton"]);
    }

    #[test]
    fn test_unknown_names_are_skipped() {
        let all = builtin();
        let picked = enabled_from_lookup(&all, Some("Alta,Mount Doom".to_string()));
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].name, "Alta");
    }

    #[test]
    fn test_by_region() {
        let all = builtin();
        let canyon = by_region(&all, "Little Cottonwood Canyon");
        let names: Vec<&str> = canyon.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Snowbird", "Alta"]);
    }

    #[test]
    fn test_json_round_trip() {
        let path = std::env::temp_dir().join(format!("resorts-{}.json", std::process::id()));
        let all = builtin();

        export_json(&path, &all).unwrap();
        let back = import_json(&path).unwrap();
        assert_eq!(back, all);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_import_missing_file_is_io_error() {
        let result = import_json("/nonexistent/resorts.json");
        assert!(matches!(result, Err(ResortError::Io { .. })));
    }
}
