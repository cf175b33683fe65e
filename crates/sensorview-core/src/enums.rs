//! Enumeration types used throughout the viewer.

use serde::{Deserialize, Serialize};

/// Rendering shape attached to an object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    /// Circle with radius in 2D, sphere in 3D.
    #[default]
    Circle,
    /// Cross with length and width.
    Cross,
    /// Rectangle with length and width (box with height in 3D).
    Rectangle,
    /// Triangle with length and width.
    Triangle,
    /// Ellipse with length and width.
    Ellipse,
    /// Point cloud, each point drawn with the object's radius.
    Points,
}

/// Which identifier drives the color of a drawn object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    #[default]
    ObjectId,
    ContainerId,
    ParentId,
}

impl ColorMode {
    /// Next mode in the cycle object → container → parent → object.
    pub fn next(self) -> Self {
        match self {
            ColorMode::ObjectId => ColorMode::ContainerId,
            ColorMode::ContainerId => ColorMode::ParentId,
            ColorMode::ParentId => ColorMode::ObjectId,
        }
    }
}

/// Radar track status reported per target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackStatus {
    /// Target id does not currently represent a track.
    #[default]
    NoTrack,
    /// Track has just been initiated.
    New,
    /// Track is being updated.
    Updated,
    /// Track is coasting (predicted, no fresh detection).
    Coasted,
}

impl TrackStatus {
    pub fn is_tracked(self) -> bool {
        !matches!(self, TrackStatus::NoTrack)
    }
}
