// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Per-frame feature extraction and the session accumulator.
//!
//! The accumulator is explicit state threaded through each per-frame call,
//! never ambient: unit tests feed it synthetic frames without a video or a
//! pose model in sight.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::{hip_drop_angle, joint_angle, lean_angle, midpoint};
use crate::pose::{Joint, JointFrame};
use crate::steps::AnkleSeries;

/// Derived measurements for one frame.
///
/// Immutable once appended to the session; also handed to the overlay
/// collaborator so on-frame annotations never recompute anything.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameFeatures {
    /// Left knee angle (hip-knee-ankle), degrees.
    pub left_knee_angle: f64,
    /// Right knee angle (hip-knee-ankle), degrees.
    pub right_knee_angle: f64,
    /// Pelvic-tilt angle, degrees.
    pub hip_drop: f64,
    /// Trunk angle from vertical, degrees, signed.
    pub forward_lean: f64,
    /// Hip-midpoint vertical pixel position.
    pub hip_height: f64,
    /// Mean visibility of the six lower-body joints, in [0, 1].
    pub confidence: f64,
}

/// A required joint was absent from a frame.
///
/// Recoverable and local: the frame is skipped for all sequences and the
/// session continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingJoint(pub Joint);

impl fmt::Display for MissingJoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "required joint '{}' missing from frame", self.0)
    }
}

impl std::error::Error for MissingJoint {}

/// Compute per-frame features from one pose detection.
///
/// All eight required joints must be present; otherwise the whole frame is
/// rejected uniformly, keeping every per-metric sequence the same length.
///
/// # Errors
///
/// Returns [`MissingJoint`] naming the first absent joint.
pub fn extract(frame: &JointFrame) -> Result<FrameFeatures, MissingJoint> {
    for joint in Joint::REQUIRED {
        if frame.position(joint).is_none() {
            return Err(MissingJoint(joint));
        }
    }

    // Presence checked above.
    let get = |j: Joint| frame.position(j).unwrap_or_default();
    let left_hip = get(Joint::LeftHip);
    let right_hip = get(Joint::RightHip);
    let left_knee = get(Joint::LeftKnee);
    let right_knee = get(Joint::RightKnee);
    let left_ankle = get(Joint::LeftAnkle);
    let right_ankle = get(Joint::RightAnkle);
    let left_shoulder = get(Joint::LeftShoulder);
    let right_shoulder = get(Joint::RightShoulder);

    let mid_hip = midpoint(left_hip, right_hip);
    let mid_shoulder = midpoint(left_shoulder, right_shoulder);

    let confidence = Joint::LOWER_BODY
        .iter()
        .map(|&j| frame.visibility(j))
        .sum::<f64>()
        / Joint::LOWER_BODY.len() as f64;

    Ok(FrameFeatures {
        left_knee_angle: joint_angle(left_hip, left_knee, left_ankle),
        right_knee_angle: joint_angle(right_hip, right_knee, right_ankle),
        hip_drop: hip_drop_angle(left_hip, right_hip),
        forward_lean: lean_angle(mid_hip, mid_shoulder),
        hip_height: mid_hip.y,
        confidence,
    })
}

/// Running per-frame sequences for one session.
///
/// Appended in frame order during the loop; reduced once by the metrics
/// aggregator after the last frame.
#[derive(Debug, Clone, Default)]
pub struct SessionAccumulator {
    /// (left, right) knee angles per detected frame.
    pub knee_angles: Vec<(f64, f64)>,
    /// Hip-drop angles per detected frame.
    pub hip_drops: Vec<f64>,
    /// Signed forward-lean angles per detected frame.
    pub forward_leans: Vec<f64>,
    /// Hip-midpoint vertical positions per detected frame.
    pub hip_heights: Vec<f64>,
    /// Frame confidences per detected frame.
    pub confidences: Vec<f64>,
    /// Ankle-height series consumed by the step detectors.
    pub ankles: AnkleSeries,
    frames_seen: usize,
    skipped: usize,
}

impl SessionAccumulator {
    /// Create an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one pose detection: extract features and append them to every
    /// sequence.
    ///
    /// On failure the frame is counted as skipped and contributes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`MissingJoint`] when a required joint is absent.
    pub fn push_frame(&mut self, frame: &JointFrame) -> Result<FrameFeatures, MissingJoint> {
        self.frames_seen += 1;

        let features = match extract(frame) {
            Ok(f) => f,
            Err(e) => {
                self.skipped += 1;
                return Err(e);
            }
        };

        self.knee_angles
            .push((features.left_knee_angle, features.right_knee_angle));
        self.hip_drops.push(features.hip_drop);
        self.forward_leans.push(features.forward_lean);
        self.hip_heights.push(features.hip_height);
        self.confidences.push(features.confidence);

        // Presence validated in extract().
        let left_ankle_y = frame.position(Joint::LeftAnkle).unwrap_or_default().y;
        let right_ankle_y = frame.position(Joint::RightAnkle).unwrap_or_default().y;
        self.ankles.push(left_ankle_y, right_ankle_y);

        Ok(features)
    }

    /// Record a frame for which the pose model produced no detection.
    pub fn push_missing(&mut self) {
        self.frames_seen += 1;
        self.skipped += 1;
    }

    /// Frames that contributed to the sequences.
    #[must_use]
    pub fn detected_frames(&self) -> usize {
        self.hip_drops.len()
    }

    /// All frames offered, detected or not. This is what the analysis
    /// duration is measured over.
    #[must_use]
    pub const fn frames_seen(&self) -> usize {
        self.frames_seen
    }

    /// Frames skipped for missing detections or missing joints.
    #[must_use]
    pub const fn skipped(&self) -> usize {
        self.skipped
    }
}
