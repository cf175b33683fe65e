//! Entity store: the root of the Parent → Container → Object hierarchy.
//!
//! `EntityStore` owns every entity by value. Lookups scan linearly at each
//! level; sensor and detection counts are small enough that an id → handle
//! map would not pay for itself.

use serde::Serialize;

use sensorview_core::types::LidarPoint;

use crate::entity::{find_by_id, position_of, Container, Object, ObjectUpdate, Parent};
use crate::error::StoreError;

/// Entity counts at each level of the hierarchy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub parents: usize,
    pub containers: usize,
    pub objects: usize,
    pub points: usize,
}

/// The Root: ordered parents, newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EntityStore {
    parents: Vec<Parent>,
}

/// Where the upserted object will live once the hierarchy is in place.
enum Slot {
    Existing(usize),
    New(Object),
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parents(&self) -> &[Parent] {
        &self.parents
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    pub fn find_parent(&self, parent_id: u64) -> Option<&Parent> {
        find_by_id(&self.parents, parent_id)
    }

    pub fn find_container(&self, parent_id: u64, container_id: u64) -> Option<&Container> {
        self.find_parent(parent_id)?.find_container(container_id)
    }

    pub fn find_object(&self, parent_id: u64, container_id: u64, object_id: u64) -> Option<&Object> {
        self.find_container(parent_id, container_id)?
            .find_object(object_id)
    }

    /// Create or merge the object `update.id` under `(parent_id, container_id)`.
    ///
    /// Missing parents, containers and objects are created at the head of
    /// their collection. The update timestamp is written to all three levels
    /// and the object's point buffer is replaced by `update.points`.
    /// If a point buffer cannot be grown the store is left exactly as it was.
    pub fn upsert(
        &mut self,
        parent_id: u64,
        container_id: u64,
        update: &ObjectUpdate<'_>,
    ) -> Result<&Object, StoreError> {
        self.upsert_with(parent_id, container_id, update, reserve_points)
    }

    /// `upsert` with the point reservation step supplied by the caller.
    pub(crate) fn upsert_with<F>(
        &mut self,
        parent_id: u64,
        container_id: u64,
        update: &ObjectUpdate<'_>,
        reserve: F,
    ) -> Result<&Object, StoreError>
    where
        F: FnOnce(&mut Vec<LidarPoint>, usize) -> Result<(), StoreError>,
    {
        let parent_idx = position_of(&self.parents, parent_id);
        let container_idx =
            parent_idx.and_then(|p| position_of(self.parents[p].containers(), container_id));
        let object_idx = match (parent_idx, container_idx) {
            (Some(p), Some(c)) => position_of(self.parents[p].containers()[c].objects(), update.id),
            _ => None,
        };

        // Everything fallible happens before the hierarchy is touched.
        let needed = update.points.len();
        let slot = match (parent_idx, container_idx, object_idx) {
            (Some(p), Some(c), Some(o)) => {
                let object = &mut self.parents[p].containers_mut()[c].objects_mut()[o];
                reserve(object.points_mut(), needed)?;
                Slot::Existing(o)
            }
            _ => {
                let mut object = Object::new(update.id);
                reserve(object.points_mut(), needed)?;
                Slot::New(object)
            }
        };

        let now = update.update_time;

        let p = parent_idx.unwrap_or_else(|| {
            self.parents.insert(0, Parent::new(parent_id));
            0
        });
        let parent = &mut self.parents[p];
        parent.update_time = now;

        let containers = parent.containers_mut();
        let c = container_idx.unwrap_or_else(|| {
            containers.insert(0, Container::new(container_id));
            0
        });
        let container = &mut containers[c];
        container.update_time = now;

        let objects = container.objects_mut();
        let o = match slot {
            Slot::Existing(o) => o,
            Slot::New(object) => {
                objects.insert(0, object);
                0
            }
        };
        let object = &mut objects[o];
        object.apply(update, parent_id, container_id);

        // Capacity was reserved above; this never reallocates.
        let buffer = object.points_mut();
        buffer.clear();
        buffer.extend_from_slice(update.points);
        if buffer.is_empty() {
            buffer.shrink_to_fit();
        }

        Ok(&*object)
    }

    /// Release every entity. The store stays valid and empty.
    /// Returns what was released.
    pub fn release_all(&mut self) -> StoreStats {
        let released = self.stats();
        for mut parent in self.parents.drain(..) {
            for mut container in parent.containers_mut().drain(..) {
                container.objects_mut().clear();
            }
        }
        log::debug!(
            "released {} parents, {} containers, {} objects, {} points",
            released.parents,
            released.containers,
            released.objects,
            released.points
        );
        released
    }

    pub fn stats(&self) -> StoreStats {
        let mut stats = StoreStats {
            parents: self.parents.len(),
            ..Default::default()
        };
        for parent in &self.parents {
            stats.containers += parent.containers().len();
            for container in parent.containers() {
                stats.objects += container.objects().len();
                stats.points += container
                    .objects()
                    .iter()
                    .map(|object| object.points().len())
                    .sum::<usize>();
            }
        }
        stats
    }

    pub(crate) fn parents_mut(&mut self) -> &mut Vec<Parent> {
        &mut self.parents
    }
}

/// Make room for `needed` points without changing the buffer's contents.
pub(crate) fn reserve_points(buffer: &mut Vec<LidarPoint>, needed: usize) -> Result<(), StoreError> {
    buffer
        .try_reserve(needed.saturating_sub(buffer.len()))
        .map_err(|source| StoreError::PointBufferAllocation {
            requested: needed,
            source,
        })
}
