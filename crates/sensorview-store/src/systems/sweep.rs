//! Timeout sweep: removes entities whose liveness has expired.
//!
//! Each level is judged on its own `update_time`/`timeout_interval`. An empty
//! container or parent stays until its own timeout elapses, and a container
//! that still holds live objects is removed once its own timeout elapses.

use sensorview_core::types::Timestamp;

use crate::entity::Expiring;
use crate::store::EntityStore;

/// Number of entities removed at each level by one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepStats {
    pub parents: usize,
    pub containers: usize,
    pub objects: usize,
}

impl SweepStats {
    pub fn total(&self) -> usize {
        self.parents + self.containers + self.objects
    }
}

/// Remove every expired object, container and parent as of `now`.
pub fn run(store: &mut EntityStore, now: Timestamp) -> SweepStats {
    let mut stats = SweepStats::default();

    let parents = store.parents_mut();
    for parent in parents.iter_mut() {
        let containers = parent.containers_mut();
        for container in containers.iter_mut() {
            let objects = container.objects_mut();
            let before = objects.len();
            objects.retain(|object| !object.is_expired(now));
            stats.objects += before - objects.len();
        }

        let before = containers.len();
        containers.retain(|container| !container.is_expired(now));
        stats.containers += before - containers.len();
    }

    let before = parents.len();
    parents.retain(|parent| !parent.is_expired(now));
    stats.parents += before - parents.len();

    stats
}
