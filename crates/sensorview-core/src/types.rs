//! Fundamental geometric and timing types.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Monotonic timestamp in microseconds.
pub type Timestamp = u64;

/// Duration in microseconds. `0` means "never expires" when used as a timeout.
pub type Micros = u64;

/// Position in the sensor frame (meters).
/// x = forward, y = left, z = up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Velocity in the sensor frame (m/s).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Bounding extents (meters).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Extents {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

/// RGBA color, each channel in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color(pub [f64; 4]);

/// Fixed palette used to color entities by identifier.
const PALETTE: [[f64; 4]; 8] = [
    [1.0, 0.0, 0.0, 1.0],
    [0.0, 1.0, 0.0, 1.0],
    [0.2, 0.4, 1.0, 1.0],
    [1.0, 1.0, 0.0, 1.0],
    [1.0, 0.0, 1.0, 1.0],
    [0.0, 1.0, 1.0, 1.0],
    [1.0, 0.5, 0.0, 1.0],
    [0.6, 0.3, 1.0, 1.0],
];

impl Position {
    pub fn to_dvec3(self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }
}

impl Velocity {
    /// Speed magnitude (m/s).
    pub fn speed(&self) -> f64 {
        self.to_dvec3().length()
    }

    pub fn to_dvec3(self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }
}

impl Extents {
    pub fn to_dvec3(self) -> DVec3 {
        DVec3::new(self.length, self.width, self.height)
    }
}

impl Color {
    pub const WHITE: Color = Color([1.0, 1.0, 1.0, 1.0]);

    /// Deterministic palette color for an identifier.
    pub fn from_id(id: u64) -> Self {
        Color(PALETTE[(id % PALETTE.len() as u64) as usize])
    }

    pub fn rgba(&self) -> [f64; 4] {
        self.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Age of something last touched at `update_time`, observed at `now`.
/// Saturates at zero when `update_time` is ahead of `now`.
pub fn age(update_time: Timestamp, now: Timestamp) -> Micros {
    now.saturating_sub(update_time)
}

/// One lidar return.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LidarPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[serde(default)]
    pub intensity: u8,
}

impl LidarPoint {
    pub fn new(x: f64, y: f64, z: f64, intensity: u8) -> Self {
        Self { x, y, z, intensity }
    }
}
