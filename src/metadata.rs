// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Source-video metadata.
//!
//! Cadence and vertical-oscillation percentages are undefined without a valid
//! frame rate and frame dimensions, so validation failures here are fatal:
//! the pipeline refuses to start rather than produce meaningless numbers.

use serde::{Deserialize, Serialize};

use crate::error::{GaitError, Result};

/// Properties of the source video needed to scale per-frame measurements.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VideoMeta {
    /// Frames per second of the source. Must be finite and positive.
    pub fps: f64,
    /// Frame width in pixels. Must be positive.
    pub width: u32,
    /// Frame height in pixels. Must be positive.
    pub height: u32,
    /// Total frame count, when known. Used for progress reporting only.
    #[serde(default)]
    pub total_frames: Option<u64>,
}

impl VideoMeta {
    /// Create and validate metadata.
    ///
    /// # Errors
    ///
    /// Returns [`GaitError::MetadataError`] for a non-positive frame rate or
    /// frame dimensions.
    pub fn new(fps: f64, width: u32, height: u32) -> Result<Self> {
        let meta = Self {
            fps,
            width,
            height,
            total_frames: None,
        };
        meta.validate()?;
        Ok(meta)
    }

    /// Set the total frame count (builder style).
    #[must_use]
    pub const fn with_total_frames(mut self, total: u64) -> Self {
        self.total_frames = Some(total);
        self
    }

    /// Validate the metadata.
    ///
    /// Deserialized values bypass [`VideoMeta::new`], so the analyzer
    /// re-validates before processing.
    ///
    /// # Errors
    ///
    /// Returns [`GaitError::MetadataError`] for a non-positive frame rate or
    /// frame dimensions.
    pub fn validate(&self) -> Result<()> {
        if !self.fps.is_finite() || self.fps <= 0.0 {
            return Err(GaitError::MetadataError(format!(
                "frame rate must be positive, got {}",
                self.fps
            )));
        }
        if self.width == 0 || self.height == 0 {
            return Err(GaitError::MetadataError(format!(
                "frame dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Wall-clock duration covered by `frames` source frames, in seconds.
    #[must_use]
    pub fn duration_secs(&self, frames: usize) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let frames = frames as f64;
        frames / self.fps
    }
}
