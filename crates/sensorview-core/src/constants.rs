//! Timeouts, sizes and conversion limits.

use crate::types::Micros;

// --- Timeouts (microseconds) ---

/// Timeout value meaning "never expires".
pub const NO_TIMEOUT: Micros = 0;

/// Default object timeout: 175 ms.
pub const DEFAULT_OBJECT_TIMEOUT: Micros = 175_000;

/// Default container timeout: 500 ms.
pub const DEFAULT_CONTAINER_TIMEOUT: Micros = 500_000;

/// Default parent timeout: 500 ms.
pub const DEFAULT_PARENT_TIMEOUT: Micros = 500_000;

/// Radar target timeout: 230 ms.
pub const RADAR_TARGET_TIMEOUT: Micros = 230_000;

// --- Radius ---

/// Radius given to radar targets and generic objects.
pub const DEFAULT_RADIUS: f64 = 1.25;

/// Adjusted radius for radar targets with neither cross section nor amplitude.
pub const UNKNOWN_CROSS_SECTION_RADIUS: f64 = 0.3;

/// Lidar point radius (half the point size).
pub const LIDAR_POINT_RADIUS: f64 = 0.5;

/// Lower clamp for the derived cross-section radius.
pub const CROSS_SECTION_MIN: f64 = 1.5;

/// Upper clamp for the derived cross-section radius.
pub const CROSS_SECTION_MAX: f64 = 20.0;

// --- Identifiers ---

/// Object id used for the single aggregate lidar object per sensor.
pub const LIDAR_AGGREGATE_ID: u64 = 0;
