//! Core types and definitions for the sensor viewer.
//!
//! This crate defines the vocabulary shared across the other crates:
//! geometry, inbound sensor messages, viewer commands and constants.
//! It has no dependency on threads, windows or any transport.

pub mod commands;
pub mod constants;
pub mod enums;
pub mod messages;
pub mod types;
