//! Alert cooldown tracking.
//!
//! A per-location state machine: a location is suppressed for a window
//! after an alert fires, except for strictly escalating severity. Expiry
//! is evaluated lazily on each query; there are no timers.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use snowfall_api::CooldownConfig;
use snowfall_spi::{AlertMarker, CooldownStore, Result, Severity, SnowfallError};
use tracing::{debug, info, warn};

// ============================================================================
// Tracker
// ============================================================================

/// Per-location alert cooldown tracker.
pub struct CooldownTracker<S: CooldownStore> {
    store: S,
    window: Duration,
}

impl<S: CooldownStore> CooldownTracker<S> {
    /// Create a tracker over the given store.
    pub fn new(store: S, config: CooldownConfig) -> Self {
        Self {
            store,
            window: Duration::hours(config.window_hours),
        }
    }

    /// Decide whether an alert may fire, recording it if so.
    ///
    /// Side-effecting: a `true` return has already updated the location's
    /// marker, so at most one alert is emitted per qualifying event.
    /// Callers must not invoke this speculatively.
    pub fn should_alert(&mut self, location_id: &str, tier: Severity, now: DateTime<Utc>) -> bool {
        if tier == Severity::None {
            return false;
        }

        let fire = match self.store.marker(location_id) {
            None => true,
            Some(marker) => {
                if now - marker.fired_at > self.window {
                    true
                } else if tier > marker.tier {
                    // Escalating conditions are not muted by a cooldown
                    // meant for repeat noise at the same severity.
                    info!(
                        location = location_id,
                        from = %marker.tier,
                        to = %tier,
                        "escalation bypasses cooldown"
                    );
                    true
                } else {
                    debug!(location = location_id, tier = %tier, "cooldown active");
                    false
                }
            }
        };

        if fire {
            self.store.record(
                location_id,
                AlertMarker {
                    fired_at: now,
                    tier,
                },
            );
        }
        fire
    }

    /// Access the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

// ============================================================================
// Stores
// ============================================================================

/// In-memory cooldown store for process-lifetime state.
#[derive(Debug, Default)]
pub struct MemoryCooldownStore {
    markers: HashMap<String, AlertMarker>,
}

impl MemoryCooldownStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CooldownStore for MemoryCooldownStore {
    fn marker(&self, location_id: &str) -> Option<AlertMarker> {
        self.markers.get(location_id).copied()
    }

    fn record(&mut self, location_id: &str, marker: AlertMarker) {
        self.markers.insert(location_id.to_string(), marker);
    }
}

/// Cooldown store persisted as a JSON file, one marker per location id.
///
/// An absent file or absent key is equivalent to idle, so a fresh host
/// starts clean. The whole map is rewritten on each record; cycles run on
/// the order of hours, so write volume is negligible.
#[derive(Debug)]
pub struct JsonFileCooldownStore {
    path: PathBuf,
    markers: HashMap<String, AlertMarker>,
}

impl JsonFileCooldownStore {
    /// Open a store at the given path, loading any existing state.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let markers = match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).map_err(|e| {
                SnowfallError::Configuration {
                    name: "cooldown_state".to_string(),
                    reason: format!("corrupt state file {}: {}", path.display(), e),
                }
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                return Err(SnowfallError::Configuration {
                    name: "cooldown_state".to_string(),
                    reason: format!("cannot read {}: {}", path.display(), e),
                })
            }
        };
        Ok(Self { path, markers })
    }

    /// Path the store persists to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) {
        let json = match serde_json::to_string_pretty(&self.markers) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "failed to serialize cooldown state");
                return;
            }
        };
        if let Some(parent) = self.path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        if let Err(e) = std::fs::write(&self.path, json) {
            warn!(path = %self.path.display(), error = %e, "failed to persist cooldown state");
        }
    }
}

impl CooldownStore for JsonFileCooldownStore {
    fn marker(&self, location_id: &str) -> Option<AlertMarker> {
        self.markers.get(location_id).copied()
    }

    fn record(&mut self, location_id: &str, marker: AlertMarker) {
        self.markers.insert(location_id.to_string(), marker);
        self.persist();
    }
}
