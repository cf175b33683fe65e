//! The three-level entity hierarchy: Parent → Container → Object.
//!
//! Each level exclusively owns its children in insertion order. The
//! `parent_id`/`container_id` fields on an object are plain copies of the
//! owning ids, used for coloring only.

use serde::Serialize;

use sensorview_core::constants::{DEFAULT_CONTAINER_TIMEOUT, DEFAULT_PARENT_TIMEOUT};
use sensorview_core::enums::PrimitiveKind;
use sensorview_core::messages::Components;
use sensorview_core::types::{age, Color, Extents, LidarPoint, Micros, Position, Timestamp, Velocity};

/// Anything addressed by an id within its owning scope.
pub trait Identified {
    fn id(&self) -> u64;
}

/// Anything that goes stale after `timeout_interval` without a refresh.
pub trait Expiring {
    fn update_time(&self) -> Timestamp;
    fn timeout_interval(&self) -> Micros;

    /// True iff the timeout is enabled and the age strictly exceeds it.
    fn is_expired(&self, now: Timestamp) -> bool {
        let timeout = self.timeout_interval();
        timeout != 0 && age(self.update_time(), now) > timeout
    }
}

/// Linear search by id. Never allocates.
pub fn find_by_id<T: Identified>(items: &[T], id: u64) -> Option<&T> {
    items.iter().find(|item| item.id() == id)
}

pub(crate) fn position_of<T: Identified>(items: &[T], id: u64) -> Option<usize> {
    items.iter().position(|item| item.id() == id)
}

/// A single drawable detection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Object {
    pub id: u64,
    pub container_id: u64,
    pub parent_id: u64,
    pub primitive: PrimitiveKind,
    pub update_time: Timestamp,
    pub timeout_interval: Micros,
    pub color: Color,
    pub position: Position,
    pub velocity: Velocity,
    pub extents: Extents,
    pub radius: f64,
    pub adjusted_radius: f64,
    /// Heading of the primitive (radians).
    pub orientation: f64,
    points: Vec<LidarPoint>,
}

/// Field changes for one object upsert.
///
/// `None` leaves the stored value (or the default, for a new object) as it is.
#[derive(Debug, Clone, Default)]
pub struct ObjectUpdate<'a> {
    pub id: u64,
    pub primitive: PrimitiveKind,
    pub update_time: Timestamp,
    pub timeout_interval: Micros,
    pub radius: Option<f64>,
    pub adjusted_radius: Option<f64>,
    pub position: Components,
    pub extents: Components,
    pub velocity: Components,
    pub orientation: Option<f64>,
    /// The object's point cloud. Always replaces the stored buffer, so an
    /// update without points leaves the object with none.
    pub points: &'a [LidarPoint],
}

/// One sensor's detections.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Container {
    pub id: u64,
    pub update_time: Timestamp,
    pub timeout_interval: Micros,
    pub color: Color,
    objects: Vec<Object>,
}

/// One source node's sensors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parent {
    pub id: u64,
    pub update_time: Timestamp,
    pub timeout_interval: Micros,
    pub color: Color,
    containers: Vec<Container>,
}

impl Object {
    /// A fresh object with zeroed geometry and no timeout.
    pub fn new(id: u64) -> Self {
        Self {
            id,
            container_id: 0,
            parent_id: 0,
            primitive: PrimitiveKind::default(),
            update_time: 0,
            timeout_interval: 0,
            color: Color::from_id(id),
            position: Position::default(),
            velocity: Velocity::default(),
            extents: Extents::default(),
            radius: 0.0,
            adjusted_radius: 0.0,
            orientation: 0.0,
            points: Vec::new(),
        }
    }

    pub fn points(&self) -> &[LidarPoint] {
        &self.points
    }

    /// Overwrite every field carried by `update` except the point cloud.
    pub(crate) fn apply(&mut self, update: &ObjectUpdate<'_>, parent_id: u64, container_id: u64) {
        self.parent_id = parent_id;
        self.container_id = container_id;
        self.primitive = update.primitive;
        self.update_time = update.update_time;
        self.timeout_interval = update.timeout_interval;
        if let Some(radius) = update.radius {
            self.radius = radius;
        }
        if let Some(adjusted) = update.adjusted_radius {
            self.adjusted_radius = adjusted;
        }
        if let Some(orientation) = update.orientation {
            self.orientation = orientation;
        }

        let [x, y, z] = update.position;
        assign(&mut self.position.x, x);
        assign(&mut self.position.y, y);
        assign(&mut self.position.z, z);

        let [length, width, height] = update.extents;
        assign(&mut self.extents.length, length);
        assign(&mut self.extents.width, width);
        assign(&mut self.extents.height, height);

        let [vx, vy, vz] = update.velocity;
        assign(&mut self.velocity.x, vx);
        assign(&mut self.velocity.y, vy);
        assign(&mut self.velocity.z, vz);
    }

    pub(crate) fn points_mut(&mut self) -> &mut Vec<LidarPoint> {
        &mut self.points
    }
}

fn assign(slot: &mut f64, value: Option<f64>) {
    if let Some(v) = value {
        *slot = v;
    }
}

impl<'a> ObjectUpdate<'a> {
    pub fn new(
        id: u64,
        primitive: PrimitiveKind,
        update_time: Timestamp,
        timeout_interval: Micros,
    ) -> Self {
        Self {
            id,
            primitive,
            update_time,
            timeout_interval,
            ..Default::default()
        }
    }
}

impl Container {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            update_time: 0,
            timeout_interval: DEFAULT_CONTAINER_TIMEOUT,
            color: Color::from_id(id),
            objects: Vec::new(),
        }
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn find_object(&self, id: u64) -> Option<&Object> {
        find_by_id(&self.objects, id)
    }

    pub(crate) fn objects_mut(&mut self) -> &mut Vec<Object> {
        &mut self.objects
    }
}

impl Parent {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            update_time: 0,
            timeout_interval: DEFAULT_PARENT_TIMEOUT,
            color: Color::from_id(id),
            containers: Vec::new(),
        }
    }

    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    pub fn find_container(&self, id: u64) -> Option<&Container> {
        find_by_id(&self.containers, id)
    }

    pub(crate) fn containers_mut(&mut self) -> &mut Vec<Container> {
        &mut self.containers
    }
}

macro_rules! impl_entity {
    ($($ty:ty),*) => {$(
        impl Identified for $ty {
            fn id(&self) -> u64 {
                self.id
            }
        }

        impl Expiring for $ty {
            fn update_time(&self) -> Timestamp {
                self.update_time
            }

            fn timeout_interval(&self) -> Micros {
                self.timeout_interval
            }
        }
    )*};
}

impl_entity!(Object, Container, Parent);
