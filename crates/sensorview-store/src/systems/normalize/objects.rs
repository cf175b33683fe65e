//! Generic fused objects → rectangles.

use sensorview_core::constants::{DEFAULT_OBJECT_TIMEOUT, DEFAULT_RADIUS};
use sensorview_core::enums::PrimitiveKind;
use sensorview_core::messages::{GenericObject, ObjectsMsg};
use sensorview_core::types::Timestamp;

use super::Outcome;
use crate::entity::ObjectUpdate;
use crate::store::EntityStore;

pub fn object_update(object: &GenericObject, update_time: Timestamp) -> ObjectUpdate<'static> {
    ObjectUpdate {
        // Rectangles ignore the radius; kept for a uniform object schema.
        radius: Some(DEFAULT_RADIUS),
        adjusted_radius: Some(DEFAULT_RADIUS),
        position: object.position,
        extents: object.size,
        velocity: object.velocity,
        orientation: object.course_angle,
        ..ObjectUpdate::new(
            object.id,
            PrimitiveKind::Rectangle,
            update_time,
            DEFAULT_OBJECT_TIMEOUT,
        )
    }
}

pub fn push(store: &mut EntityStore, msg: &ObjectsMsg, update_time: Timestamp) -> Outcome {
    let mut outcome = Outcome::default();
    for object in &msg.objects {
        let update = object_update(object, update_time);
        super::upsert(
            store,
            msg.header.source_id,
            msg.header.sensor_id,
            &update,
            &mut outcome,
        );
    }
    outcome
}
