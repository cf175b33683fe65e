//! Message normalization: maps each sensor payload onto object upserts.
//!
//! Every function here is deterministic given the message, the update time
//! and the prior store contents. Its only side effect is the upserts.

pub mod lidar;
pub mod objects;
pub mod radar;

use sensorview_core::messages::SensorMessage;
use sensorview_core::types::Timestamp;

use crate::entity::ObjectUpdate;
use crate::store::EntityStore;

/// What one message did to the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Objects created or merged.
    pub upserted: usize,
    /// Entries ignored by rule (no-track targets, empty point clouds).
    pub skipped: usize,
    /// Upserts abandoned because of a store error.
    pub failed: usize,
}

impl Outcome {
    pub fn merge(&mut self, other: Outcome) {
        self.upserted += other.upserted;
        self.skipped += other.skipped;
        self.failed += other.failed;
    }
}

/// Normalize one message into the store, stamping every touched entity with `update_time`.
pub fn apply(store: &mut EntityStore, message: &SensorMessage, update_time: Timestamp) -> Outcome {
    log::trace!("t={} normalizing {} message", update_time, message.kind_name());
    match message {
        SensorMessage::RadarTargets(msg) => radar::push(store, msg, update_time),
        SensorMessage::LidarPoints(msg) => lidar::push(store, msg, update_time),
        SensorMessage::Objects(msg) => objects::push(store, msg, update_time),
        SensorMessage::Unknown => {
            log::trace!("discarding message of unrecognized kind");
            Outcome::default()
        }
    }
}

/// Run one upsert and count it, logging a rejected one.
fn upsert(
    store: &mut EntityStore,
    parent_id: u64,
    container_id: u64,
    update: &ObjectUpdate<'_>,
    outcome: &mut Outcome,
) {
    match store.upsert(parent_id, container_id, update) {
        Ok(object) => {
            log::trace!(
                "upserted object {} in {}/{} ({:?}, {:.2} m/s)",
                object.id,
                parent_id,
                container_id,
                object.primitive,
                object.velocity.speed()
            );
            outcome.upserted += 1;
        }
        Err(err) => {
            log::warn!(
                "upsert of object {} in {}/{} rejected: {}",
                update.id,
                parent_id,
                container_id,
                err
            );
            outcome.failed += 1;
        }
    }
}
