//! Radar targets → circle objects sized by cross section.

use sensorview_core::constants::{
    CROSS_SECTION_MAX, CROSS_SECTION_MIN, DEFAULT_RADIUS, RADAR_TARGET_TIMEOUT,
    UNKNOWN_CROSS_SECTION_RADIUS,
};
use sensorview_core::enums::PrimitiveKind;
use sensorview_core::messages::{RadarTarget, RadarTargetsMsg};
use sensorview_core::types::Timestamp;

use super::Outcome;
use crate::entity::ObjectUpdate;
use crate::store::EntityStore;

/// Clamp a cross-section radius into `[1.5, 20.0]`. NaN maps to the floor.
pub fn clamp_cross_section(cs: f64) -> f64 {
    if cs.is_nan() {
        return CROSS_SECTION_MIN;
    }
    cs.clamp(CROSS_SECTION_MIN, CROSS_SECTION_MAX)
}

/// Convert an amplitude in dB to a clamped cross-section radius.
///
/// `cross_section (m²) = 10^(db / 10)`; the radius is its square root.
pub fn db_to_cross_section(db: f64) -> f64 {
    clamp_cross_section(10f64.powf(db / 10.0).sqrt())
}

/// Display radius derived from whichever strength measure the target carries.
pub fn adjusted_radius(target: &RadarTarget) -> f64 {
    if let Some(cross_section) = target.cross_section {
        clamp_cross_section(cross_section.sqrt())
    } else if let Some(amplitude) = target.amplitude {
        db_to_cross_section(amplitude)
    } else {
        UNKNOWN_CROSS_SECTION_RADIUS
    }
}

/// Object changes for one tracked target.
pub fn target_update(target: &RadarTarget, update_time: Timestamp) -> ObjectUpdate<'static> {
    ObjectUpdate {
        radius: Some(DEFAULT_RADIUS),
        adjusted_radius: Some(adjusted_radius(target)),
        position: target.position,
        extents: target.size,
        velocity: target.velocity,
        ..ObjectUpdate::new(
            target.id,
            PrimitiveKind::Circle,
            update_time,
            RADAR_TARGET_TIMEOUT,
        )
    }
}

/// Upsert every tracked target. Targets with no track are skipped.
pub fn push(store: &mut EntityStore, msg: &RadarTargetsMsg, update_time: Timestamp) -> Outcome {
    let mut outcome = Outcome::default();
    let parent_id = msg.header.source_id;
    let container_id = msg.header.sensor_id;

    for target in &msg.targets {
        if !target.track_status.is_tracked() {
            outcome.skipped += 1;
            continue;
        }
        let update = target_update(target, update_time);
        super::upsert(store, parent_id, container_id, &update, &mut outcome);
    }

    outcome
}
