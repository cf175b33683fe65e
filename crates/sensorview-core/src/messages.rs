//! Inbound sensor messages, already deserialized by the transport.
//!
//! A component the sensor could not measure is `None`. That is the only
//! representation of "not available"; the normalizer never reads it as zero.

use serde::{Deserialize, Serialize};

use crate::enums::TrackStatus;
use crate::types::LidarPoint;

/// Per-axis measurement where each axis may be unavailable.
pub type Components = [Option<f64>; 3];

/// All message kinds the viewer understands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SensorMessage {
    RadarTargets(RadarTargetsMsg),
    LidarPoints(LidarPointsMsg),
    Objects(ObjectsMsg),
    /// Any kind tag the viewer does not recognize.
    #[serde(other)]
    Unknown,
}

/// Fields common to every sensor message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageHeader {
    /// Identifier of the producing node. Becomes the parent id.
    pub source_id: u64,
    /// Sensor descriptor id. Becomes the container id.
    pub sensor_id: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RadarTargetsMsg {
    pub header: MessageHeader,
    #[serde(default)]
    pub targets: Vec<RadarTarget>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RadarTarget {
    pub id: u64,
    #[serde(default)]
    pub track_status: TrackStatus,
    /// Radar cross section (m²).
    #[serde(default)]
    pub cross_section: Option<f64>,
    /// Return amplitude (dB).
    #[serde(default)]
    pub amplitude: Option<f64>,
    #[serde(default)]
    pub position: Components,
    #[serde(default)]
    pub size: Components,
    #[serde(default)]
    pub velocity: Components,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LidarPointsMsg {
    pub header: MessageHeader,
    #[serde(default)]
    pub points: Vec<LidarPoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectsMsg {
    pub header: MessageHeader,
    #[serde(default)]
    pub objects: Vec<GenericObject>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenericObject {
    pub id: u64,
    #[serde(default)]
    pub position: Components,
    #[serde(default)]
    pub size: Components,
    #[serde(default)]
    pub velocity: Components,
    /// Course angle (radians).
    #[serde(default)]
    pub course_angle: Option<f64>,
}

impl SensorMessage {
    /// Header of a recognized message, `None` for `Unknown`.
    pub fn header(&self) -> Option<&MessageHeader> {
        match self {
            SensorMessage::RadarTargets(msg) => Some(&msg.header),
            SensorMessage::LidarPoints(msg) => Some(&msg.header),
            SensorMessage::Objects(msg) => Some(&msg.header),
            SensorMessage::Unknown => None,
        }
    }

    /// Short name for logging.
    pub fn kind_name(&self) -> &'static str {
        match self {
            SensorMessage::RadarTargets(_) => "radar_targets",
            SensorMessage::LidarPoints(_) => "lidar_points",
            SensorMessage::Objects(_) => "objects",
            SensorMessage::Unknown => "unknown",
        }
    }
}
