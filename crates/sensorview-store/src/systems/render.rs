//! Render walker: emits draw calls for every live entity.
//!
//! This system is read-only and never modifies the store. Traversal follows
//! the store's current order (parents, then their containers, then objects).

use glam::DVec3;

use sensorview_core::enums::{ColorMode, PrimitiveKind};
use sensorview_core::types::{Color, LidarPoint};

use crate::entity::{Container, Object, Parent};
use crate::store::EntityStore;

/// Geometry and color of one drawn object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shape {
    pub center: DVec3,
    /// Length, width, height.
    pub extents: DVec3,
    pub velocity: DVec3,
    pub radius: f64,
    pub adjusted_radius: f64,
    /// Radians.
    pub orientation: f64,
    pub color: Color,
}

/// Drawing collaborator. One call per primitive; the hooks for parents and
/// containers default to doing nothing.
pub trait DrawSink {
    fn begin_parent(&mut self, _parent: &Parent) {}
    fn begin_container(&mut self, _container: &Container, _color: Color) {}

    fn circle(&mut self, shape: &Shape);
    fn cross(&mut self, shape: &Shape);
    fn rectangle(&mut self, shape: &Shape);
    fn triangle(&mut self, shape: &Shape);
    fn ellipse(&mut self, shape: &Shape);
    fn points(&mut self, points: &[LidarPoint], shape: &Shape);
}

/// Display settings the walker needs, passed in explicitly each frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderContext {
    pub color_mode: ColorMode,
}

/// Entities visited by one walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub parents: usize,
    pub containers: usize,
    pub objects: usize,
}

/// Walk the whole hierarchy once and hand every entity to `sink`.
pub fn run<S: DrawSink + ?Sized>(
    store: &EntityStore,
    context: &RenderContext,
    sink: &mut S,
) -> RenderStats {
    let mut stats = RenderStats::default();

    for parent in store.parents() {
        sink.begin_parent(parent);
        stats.parents += 1;

        for container in parent.containers() {
            let container_color = match context.color_mode {
                ColorMode::ParentId => parent.color,
                ColorMode::ObjectId | ColorMode::ContainerId => container.color,
            };
            sink.begin_container(container, container_color);
            stats.containers += 1;

            for object in container.objects() {
                let color = object_color(context.color_mode, parent, container, object);
                draw_object(sink, object, color);
                stats.objects += 1;
            }
        }
    }

    stats
}

/// Color for an object under the given mode.
pub fn object_color(mode: ColorMode, parent: &Parent, container: &Container, object: &Object) -> Color {
    match mode {
        ColorMode::ObjectId => object.color,
        ColorMode::ContainerId => container.color,
        ColorMode::ParentId => parent.color,
    }
}

fn draw_object<S: DrawSink + ?Sized>(sink: &mut S, object: &Object, color: Color) {
    let shape = Shape {
        center: object.position.to_dvec3(),
        extents: object.extents.to_dvec3(),
        velocity: object.velocity.to_dvec3(),
        radius: object.radius,
        adjusted_radius: object.adjusted_radius,
        orientation: object.orientation,
        color,
    };

    match object.primitive {
        PrimitiveKind::Circle => sink.circle(&shape),
        PrimitiveKind::Cross => sink.cross(&shape),
        PrimitiveKind::Rectangle => sink.rectangle(&shape),
        PrimitiveKind::Triangle => sink.triangle(&shape),
        PrimitiveKind::Ellipse => sink.ellipse(&shape),
        PrimitiveKind::Points => sink.points(object.points(), &shape),
    }
}
