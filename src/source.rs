// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Recorded pose-sequence input.
//!
//! The core never calls a pose estimator; it consumes the estimator's
//! per-frame output. This module defines a JSON file format for that output
//! so sessions can be recorded once and replayed any number of times —
//! through the CLI, through tests, or through a downstream service.
//!
//! ```json
//! {
//!   "meta": { "fps": 30.0, "width": 1920, "height": 1080 },
//!   "frames": [
//!     {
//!       "positions": { "left_hip": { "x": 412.0, "y": 530.5 }, ... },
//!       "visibility": { "left_hip": 0.97, ... }
//!     },
//!     null
//!   ]
//! }
//! ```
//!
//! `null` entries are frames where the pose model produced no detection.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GaitError, Result};
use crate::metadata::VideoMeta;
use crate::pose::JointFrame;

/// A complete recorded pose-estimation session for one video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoseSequence {
    /// Source-video metadata.
    pub meta: VideoMeta,
    /// Per-frame estimator output; `None` where nothing was detected.
    pub frames: Vec<Option<JointFrame>>,
}

impl PoseSequence {
    /// Parse a sequence from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`GaitError::SourceError`] for malformed JSON and
    /// [`GaitError::MetadataError`] for invalid metadata.
    pub fn from_json(json: &str) -> Result<Self> {
        let sequence: Self = serde_json::from_str(json)
            .map_err(|e| GaitError::SourceError(format!("invalid pose sequence: {e}")))?;
        sequence.meta.validate()?;
        Ok(sequence)
    }

    /// Load a sequence from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`GaitError::Io`] if the file cannot be read, plus the errors
    /// of [`PoseSequence::from_json`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serialize the sequence to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`GaitError::Json`] on serialization failure.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the sequence to a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`GaitError::Io`] or [`GaitError::Json`].
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Total frames in the recording, detected or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether the recording holds no frames.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Number of frames with a pose detection.
    #[must_use]
    pub fn detected(&self) -> usize {
        self.frames.iter().filter(|f| f.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::Joint;

    fn sample_sequence() -> PoseSequence {
        let frame = JointFrame::new()
            .with_joint(Joint::LeftHip, 412.0, 530.5, 0.97)
            .with_joint(Joint::RightHip, 455.0, 531.0, 0.96);
        PoseSequence {
            meta: VideoMeta::new(30.0, 1920, 1080).unwrap(),
            frames: vec![Some(frame), None],
        }
    }

    #[test]
    fn test_json_roundtrip() {
        let sequence = sample_sequence();
        let json = sequence.to_json().unwrap();
        let loaded = PoseSequence::from_json(&json).unwrap();

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.detected(), 1);
        let frame = loaded.frames[0].as_ref().unwrap();
        let hip = frame.position(Joint::LeftHip).unwrap();
        assert!((hip.x - 412.0).abs() < 1e-9);
        assert!((hip.y - 530.5).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            PoseSequence::from_json("{ not json"),
            Err(GaitError::SourceError(_))
        ));
    }

    #[test]
    fn test_rejects_invalid_meta() {
        let json = r#"{"meta":{"fps":0.0,"width":1920,"height":1080},"frames":[]}"#;
        assert!(matches!(
            PoseSequence::from_json(json),
            Err(GaitError::MetadataError(_))
        ));
    }
}
