//! Sensor viewer application.
//!
//! Wires the headless viewer to a tick-loop thread, a bounded inbound queue,
//! a JSON-lines message feed and a logging draw sink.

pub mod config;
pub mod feed;
pub mod sink;
pub mod state;
pub mod tick_loop;

pub use sensorview_core as core;
