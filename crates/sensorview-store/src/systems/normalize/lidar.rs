//! Lidar points → one aggregate point-cloud object per sensor.

use sensorview_core::constants::{DEFAULT_OBJECT_TIMEOUT, LIDAR_AGGREGATE_ID, LIDAR_POINT_RADIUS};
use sensorview_core::enums::PrimitiveKind;
use sensorview_core::messages::LidarPointsMsg;
use sensorview_core::types::Timestamp;

use super::Outcome;
use crate::entity::ObjectUpdate;
use crate::store::EntityStore;

/// Replace the sensor's aggregate cloud with this message's points.
/// A message with no points changes nothing.
pub fn push(store: &mut EntityStore, msg: &LidarPointsMsg, update_time: Timestamp) -> Outcome {
    let mut outcome = Outcome::default();
    if msg.points.is_empty() {
        outcome.skipped += 1;
        return outcome;
    }

    let update = ObjectUpdate {
        radius: Some(LIDAR_POINT_RADIUS),
        points: &msg.points,
        ..ObjectUpdate::new(
            LIDAR_AGGREGATE_ID,
            PrimitiveKind::Points,
            update_time,
            DEFAULT_OBJECT_TIMEOUT,
        )
    };
    super::upsert(
        store,
        msg.header.source_id,
        msg.header.sensor_id,
        &update,
        &mut outcome,
    );

    outcome
}
