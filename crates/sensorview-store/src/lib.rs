//! Entity store and per-tick pipeline for the sensor viewer.
//!
//! Owns the Parent → Container → Object hierarchy, normalizes sensor
//! messages into it, sweeps stale entities and walks the result for drawing.

pub mod entity;
pub mod error;
pub mod store;
pub mod systems;
pub mod viewer;

pub use sensorview_core as core;
pub use store::EntityStore;
pub use viewer::Viewer;
