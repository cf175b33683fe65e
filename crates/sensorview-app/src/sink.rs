//! Headless draw sink that logs and counts draw calls.
//!
//! Stands in for a windowed renderer; the walker cannot tell the difference.

use sensorview_core::enums::PrimitiveKind;
use sensorview_core::types::{Color, LidarPoint};
use sensorview_store::entity::{Container, Parent};
use sensorview_store::systems::render::{DrawSink, Shape};

/// Running totals of draw calls by primitive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawCounts {
    pub parents: u64,
    pub containers: u64,
    pub circles: u64,
    pub crosses: u64,
    pub rectangles: u64,
    pub triangles: u64,
    pub ellipses: u64,
    pub point_clouds: u64,
    pub points: u64,
}

impl DrawCounts {
    pub fn primitives(&self) -> u64 {
        self.circles + self.crosses + self.rectangles + self.triangles + self.ellipses + self.point_clouds
    }
}

#[derive(Debug, Default)]
pub struct LogSink {
    counts: DrawCounts,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counts(&self) -> DrawCounts {
        self.counts
    }

    fn shape(&self, kind: PrimitiveKind, shape: &Shape) {
        log::trace!(
            "draw {:?} at ({:.2}, {:.2}, {:.2}) size {:.2}x{:.2} r={:.2} heading={:.2} color={:?}",
            kind,
            shape.center.x,
            shape.center.y,
            shape.center.z,
            shape.extents.x,
            shape.extents.y,
            shape.adjusted_radius,
            shape.orientation,
            shape.color.rgba()
        );
    }
}

impl DrawSink for LogSink {
    fn begin_parent(&mut self, parent: &Parent) {
        self.counts.parents += 1;
        log::trace!("parent {} ({} containers)", parent.id, parent.containers().len());
    }

    fn begin_container(&mut self, container: &Container, _color: Color) {
        self.counts.containers += 1;
        log::trace!("container {} ({} objects)", container.id, container.objects().len());
    }

    fn circle(&mut self, shape: &Shape) {
        self.counts.circles += 1;
        self.shape(PrimitiveKind::Circle, shape);
    }

    fn cross(&mut self, shape: &Shape) {
        self.counts.crosses += 1;
        self.shape(PrimitiveKind::Cross, shape);
    }

    fn rectangle(&mut self, shape: &Shape) {
        self.counts.rectangles += 1;
        self.shape(PrimitiveKind::Rectangle, shape);
    }

    fn triangle(&mut self, shape: &Shape) {
        self.counts.triangles += 1;
        self.shape(PrimitiveKind::Triangle, shape);
    }

    fn ellipse(&mut self, shape: &Shape) {
        self.counts.ellipses += 1;
        self.shape(PrimitiveKind::Ellipse, shape);
    }

    fn points(&mut self, points: &[LidarPoint], shape: &Shape) {
        self.counts.point_clouds += 1;
        self.counts.points += points.len() as u64;
        log::trace!("draw {} points, size {:.2}", points.len(), shape.radius * 2.0);
    }
}
