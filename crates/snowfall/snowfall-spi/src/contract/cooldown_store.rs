//! Cooldown state store trait definition.

use crate::model::AlertMarker;

/// Store of last-alert markers keyed by location id.
///
/// Mutated only by the cooldown tracker. An absent marker is equivalent to
/// the idle state, both in memory and in any persisted layout.
pub trait CooldownStore: Send + Sync {
    /// Last alert marker for a location, if any.
    fn marker(&self, location_id: &str) -> Option<AlertMarker>;

    /// Record the alert that just fired for a location.
    fn record(&mut self, location_id: &str, marker: AlertMarker);
}

impl<T: CooldownStore + ?Sized> CooldownStore for Box<T> {
    fn marker(&self, location_id: &str) -> Option<AlertMarker> {
        (**self).marker(location_id)
    }

    fn record(&mut self, location_id: &str, marker: AlertMarker) {
        (**self).record(location_id, marker)
    }
}
