//! Per-tick passes over the entity store.
//!
//! Systems are plain functions that take `&mut EntityStore` (or `&EntityStore`
//! for read-only passes). They hold no state of their own.

pub mod normalize;
pub mod render;
pub mod sweep;
