// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Pose-estimator output types.
//!
//! The pose model itself is an external collaborator: this module only
//! defines the per-frame data it produces — named 2-D joint positions with
//! visibility scores — in a form the analyzer can consume and that recorded
//! sessions can be replayed from.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Named anatomical landmarks used by the analyzer.
///
/// These are the eight joints gait analysis needs; a pose model typically
/// produces many more, which callers simply don't map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Joint {
    /// Left shoulder.
    LeftShoulder,
    /// Right shoulder.
    RightShoulder,
    /// Left hip.
    LeftHip,
    /// Right hip.
    RightHip,
    /// Left knee.
    LeftKnee,
    /// Right knee.
    RightKnee,
    /// Left ankle.
    LeftAnkle,
    /// Right ankle.
    RightAnkle,
}

impl Joint {
    /// All joints a frame must carry to be analyzed.
    pub const REQUIRED: [Self; 8] = [
        Self::LeftShoulder,
        Self::RightShoulder,
        Self::LeftHip,
        Self::RightHip,
        Self::LeftKnee,
        Self::RightKnee,
        Self::LeftAnkle,
        Self::RightAnkle,
    ];

    /// The six lower-body joints whose visibility defines frame confidence.
    pub const LOWER_BODY: [Self; 6] = [
        Self::LeftHip,
        Self::RightHip,
        Self::LeftKnee,
        Self::RightKnee,
        Self::LeftAnkle,
        Self::RightAnkle,
    ];

    /// Returns the snake_case name used in serialized pose sequences.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LeftShoulder => "left_shoulder",
            Self::RightShoulder => "right_shoulder",
            Self::LeftHip => "left_hip",
            Self::RightHip => "right_hip",
            Self::LeftKnee => "left_knee",
            Self::RightKnee => "right_knee",
            Self::LeftAnkle => "left_ankle",
            Self::RightAnkle => "right_ankle",
        }
    }
}

impl fmt::Display for Joint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Joint {
    type Err = JointParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "left_shoulder" => Ok(Self::LeftShoulder),
            "right_shoulder" => Ok(Self::RightShoulder),
            "left_hip" => Ok(Self::LeftHip),
            "right_hip" => Ok(Self::RightHip),
            "left_knee" => Ok(Self::LeftKnee),
            "right_knee" => Ok(Self::RightKnee),
            "left_ankle" => Ok(Self::LeftAnkle),
            "right_ankle" => Ok(Self::RightAnkle),
            _ => Err(JointParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid joint name.
#[derive(Debug, Clone)]
pub struct JointParseError(String);

impl fmt::Display for JointParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown joint '{}'", self.0)
    }
}

impl std::error::Error for JointParseError {}

/// A 2-D pixel position in image coordinates (y increases downward).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal pixel coordinate.
    pub x: f64,
    /// Vertical pixel coordinate (downward-positive).
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One pose-estimation result for one video frame.
///
/// Ephemeral: consumed once by the feature extractor, after which only
/// derived scalars are retained.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JointFrame {
    /// Joint positions in pixel coordinates.
    pub positions: HashMap<Joint, Point>,
    /// Per-joint visibility/confidence scores in [0, 1].
    pub visibility: HashMap<Joint, f64>,
}

impl JointFrame {
    /// Create an empty frame.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a joint with its position and visibility score (builder style).
    #[must_use]
    pub fn with_joint(mut self, joint: Joint, x: f64, y: f64, visibility: f64) -> Self {
        self.positions.insert(joint, Point::new(x, y));
        self.visibility.insert(joint, visibility);
        self
    }

    /// Position of a joint, if the estimator produced it.
    #[must_use]
    pub fn position(&self, joint: Joint) -> Option<Point> {
        self.positions.get(&joint).copied()
    }

    /// Visibility score of a joint; 0.0 if absent.
    #[must_use]
    pub fn visibility(&self, joint: Joint) -> f64 {
        self.visibility.get(&joint).copied().unwrap_or(0.0)
    }

    /// Check that every joint in `joints` has a position.
    #[must_use]
    pub fn has_all(&self, joints: &[Joint]) -> bool {
        joints.iter().all(|j| self.positions.contains_key(j))
    }
}
