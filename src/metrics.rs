// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Session-level metric aggregation.
//!
//! [`GaitMetrics`] is the canonical immutable record for a session: created
//! exactly once after every frame has been consumed, then handed unchanged to
//! the feedback classifier and any report renderer.

use std::fmt;
use std::str::FromStr;

use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

use crate::features::SessionAccumulator;
use crate::metadata::VideoMeta;
use crate::steps::cadence;

/// Coarse reliability classification of a session's joint detections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DataQuality {
    /// Mean confidence above 0.8.
    High,
    /// Mean confidence above 0.5.
    Medium,
    /// Anything lower.
    Low,
    /// No frames were retained, so no statement can be made.
    #[default]
    Unknown,
}

impl DataQuality {
    /// Classify a session's mean joint confidence.
    ///
    /// `has_frames` distinguishes a genuinely low-confidence session from an
    /// empty one.
    #[must_use]
    pub fn from_confidence(mean_confidence: f64, has_frames: bool) -> Self {
        if !has_frames {
            Self::Unknown
        } else if mean_confidence > 0.8 {
            Self::High
        } else if mean_confidence > 0.5 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// String form used in reports.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for DataQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DataQuality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            "unknown" => Ok(Self::Unknown),
            _ => Err(format!("invalid data quality '{s}'")),
        }
    }
}

/// The immutable session summary.
///
/// An empty session (zero valid frames) yields all-zero values and
/// [`DataQuality::Unknown`] rather than an error; callers must be prepared
/// for an all-zero summary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GaitMetrics {
    /// Steps per minute.
    pub cadence: f64,
    /// Mean knee angle across both legs, pooled, degrees.
    pub mean_knee_angle: f64,
    /// Mean hip-drop angle, degrees.
    pub mean_hip_drop: f64,
    /// Mean signed forward lean, degrees.
    pub mean_forward_lean: f64,
    /// Peak-to-trough hip travel as a percentage of estimated body height.
    pub vertical_oscillation_pct: f64,
    /// Detected foot strikes.
    pub step_count: usize,
    /// Analysis duration in seconds (all frames offered, detected or not).
    pub duration_secs: f64,
    /// Mean per-frame confidence.
    pub mean_confidence: f64,
    /// Reliability classification of the session.
    pub data_quality: DataQuality,
    /// Frames skipped for missing detections or missing joints.
    pub skipped_frames: usize,
    /// Per-frame (left, right) knee angles, retained for reporting.
    pub knee_angles: Vec<(f64, f64)>,
    /// Per-frame hip-drop angles.
    pub hip_drops: Vec<f64>,
    /// Per-frame forward-lean angles.
    pub forward_leans: Vec<f64>,
    /// Per-frame hip-midpoint vertical positions.
    pub hip_heights: Vec<f64>,
    /// Per-frame confidences.
    pub confidences: Vec<f64>,
}

/// Mean of a slice; 0.0 for an empty slice, never NaN.
fn mean(values: &[f64]) -> f64 {
    ArrayView1::from(values).mean().unwrap_or(0.0)
}

impl GaitMetrics {
    /// Reduce the per-frame sequences into the session summary.
    ///
    /// Pure with respect to its inputs; runs once, after the frame loop.
    #[must_use]
    pub fn summarize(acc: &SessionAccumulator, meta: &VideoMeta, step_count: usize) -> Self {
        let duration_secs = meta.duration_secs(acc.frames_seen());

        // Both legs pooled into one mean, not averaged per-leg first.
        let pooled_knees: Vec<f64> = acc
            .knee_angles
            .iter()
            .flat_map(|&(l, r)| [l, r])
            .collect();

        let vertical_oscillation_pct = if acc.hip_heights.is_empty() {
            0.0
        } else {
            let max = acc.hip_heights.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let min = acc.hip_heights.iter().copied().fold(f64::INFINITY, f64::min);
            // Half the frame height stands in for runner height; a coarse
            // proxy by design, never a measured value.
            let estimated_height = f64::from(meta.height) * 0.5;
            (max - min) / estimated_height * 100.0
        };

        let mean_confidence = mean(&acc.confidences);

        Self {
            cadence: cadence(step_count, duration_secs),
            mean_knee_angle: mean(&pooled_knees),
            mean_hip_drop: mean(&acc.hip_drops),
            mean_forward_lean: mean(&acc.forward_leans),
            vertical_oscillation_pct,
            step_count,
            duration_secs,
            mean_confidence,
            data_quality: DataQuality::from_confidence(mean_confidence, acc.detected_frames() > 0),
            skipped_frames: acc.skipped(),
            knee_angles: acc.knee_angles.clone(),
            hip_drops: acc.hip_drops.clone(),
            forward_leans: acc.forward_leans.clone(),
            hip_heights: acc.hip_heights.clone(),
            confidences: acc.confidences.clone(),
        }
    }

    /// Number of frames retained in the per-frame sequences.
    #[must_use]
    pub fn detected_frames(&self) -> usize {
        self.hip_drops.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::{Joint, JointFrame};

    fn frame(hip_y: f64, vis: f64) -> JointFrame {
        JointFrame::new()
            .with_joint(Joint::LeftShoulder, 95.0, hip_y - 200.0, vis)
            .with_joint(Joint::RightShoulder, 105.0, hip_y - 200.0, vis)
            .with_joint(Joint::LeftHip, 95.0, hip_y, vis)
            .with_joint(Joint::RightHip, 105.0, hip_y, vis)
            .with_joint(Joint::LeftKnee, 95.0, hip_y + 100.0, vis)
            .with_joint(Joint::RightKnee, 105.0, hip_y + 100.0, vis)
            .with_joint(Joint::LeftAnkle, 95.0, hip_y + 200.0, vis)
            .with_joint(Joint::RightAnkle, 105.0, hip_y + 200.0, vis)
    }

    #[test]
    fn test_empty_session_is_all_zero() {
        let acc = SessionAccumulator::new();
        let meta = VideoMeta::new(30.0, 1920, 1080).unwrap();
        let metrics = GaitMetrics::summarize(&acc, &meta, 0);

        assert!((metrics.cadence - 0.0).abs() < 1e-9);
        assert!((metrics.mean_knee_angle - 0.0).abs() < 1e-9);
        assert!((metrics.mean_hip_drop - 0.0).abs() < 1e-9);
        assert!((metrics.mean_forward_lean - 0.0).abs() < 1e-9);
        assert!((metrics.vertical_oscillation_pct - 0.0).abs() < 1e-9);
        assert!(!metrics.mean_knee_angle.is_nan());
        assert_eq!(metrics.data_quality, DataQuality::Unknown);
    }

    #[test]
    fn test_oscillation_uses_half_frame_height() {
        let mut acc = SessionAccumulator::new();
        acc.push_frame(&frame(300.0, 0.9)).unwrap();
        acc.push_frame(&frame(327.0, 0.9)).unwrap();
        let meta = VideoMeta::new(30.0, 1920, 1080).unwrap();

        let metrics = GaitMetrics::summarize(&acc, &meta, 0);
        // (327 - 300) / (1080 * 0.5) * 100 = 5.0
        assert!((metrics.vertical_oscillation_pct - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_knee_angles_pooled_across_legs() {
        let mut acc = SessionAccumulator::new();
        acc.knee_angles.push((160.0, 170.0));
        acc.knee_angles.push((150.0, 180.0));
        let meta = VideoMeta::new(30.0, 1920, 1080).unwrap();

        let metrics = GaitMetrics::summarize(&acc, &meta, 0);
        assert!((metrics.mean_knee_angle - 165.0).abs() < 1e-9);
    }

    #[test]
    fn test_duration_counts_all_frames_seen() {
        let mut acc = SessionAccumulator::new();
        acc.push_frame(&frame(300.0, 0.9)).unwrap();
        for _ in 0..59 {
            acc.push_missing();
        }
        let meta = VideoMeta::new(30.0, 1920, 1080).unwrap();

        let metrics = GaitMetrics::summarize(&acc, &meta, 0);
        assert!((metrics.duration_secs - 2.0).abs() < 1e-9);
        assert_eq!(metrics.skipped_frames, 59);
    }

    #[test]
    fn test_data_quality_thresholds() {
        assert_eq!(DataQuality::from_confidence(0.85, true), DataQuality::High);
        assert_eq!(DataQuality::from_confidence(0.8, true), DataQuality::Medium);
        assert_eq!(DataQuality::from_confidence(0.5, true), DataQuality::Low);
        assert_eq!(DataQuality::from_confidence(0.9, false), DataQuality::Unknown);
    }

    #[test]
    fn test_quality_parse_roundtrip() {
        for q in [
            DataQuality::High,
            DataQuality::Medium,
            DataQuality::Low,
            DataQuality::Unknown,
        ] {
            assert_eq!(q.to_string().parse::<DataQuality>().unwrap(), q);
        }
    }
}
