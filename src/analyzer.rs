// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! The gait-analysis pipeline.
//!
//! [`GaitAnalyzer`] owns the frame loop: feature extraction and the causal
//! foot-strike check run strictly frame-sequential, because the strike test
//! depends on the immediately preceding frame's velocity. The batch step
//! detector, metrics aggregation, and feedback classification are pure
//! functions over the completed sequences and run in [`GaitAnalyzer::finish`].
//!
//! # Example
//!
//! ```
//! use gait_analysis::{GaitAnalyzer, VideoMeta};
//!
//! # fn main() -> gait_analysis::Result<()> {
//! let meta = VideoMeta::new(30.0, 1920, 1080)?;
//! let mut analyzer = GaitAnalyzer::new(meta)?;
//!
//! // Per frame: Some(joint_frame) from the pose model, or None.
//! analyzer.process_frame(None);
//!
//! let metrics = analyzer.finish();
//! assert_eq!(metrics.step_count, 0);
//! # Ok(())
//! # }
//! ```

use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{GaitError, Result};
use crate::features::{FrameFeatures, SessionAccumulator};
use crate::metadata::VideoMeta;
use crate::metrics::GaitMetrics;
use crate::pose::JointFrame;
use crate::steps::{StepAlgorithm, StepEvent, VelocityStrikeDetector};

/// Configuration for a gait analysis run.
///
/// Builder pattern, same shape as the rest of the crate's configs.
///
/// # Example
///
/// ```
/// use gait_analysis::{AnalyzerConfig, StepAlgorithm};
///
/// let config = AnalyzerConfig::new()
///     .with_algorithm(StepAlgorithm::ZeroCrossing)
///     .with_strike_threshold(1.5);
/// ```
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Step-detection strategy used for the final step count.
    pub algorithm: StepAlgorithm,
    /// Descent threshold for the velocity strike detector, px/frame.
    pub strike_threshold: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            algorithm: StepAlgorithm::Velocity,
            strike_threshold: VelocityStrikeDetector::DEFAULT_THRESHOLD,
        }
    }
}

impl AnalyzerConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the step-detection strategy.
    #[must_use]
    pub const fn with_algorithm(mut self, algorithm: StepAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set the velocity strike detector's descent threshold.
    #[must_use]
    pub const fn with_strike_threshold(mut self, threshold: f64) -> Self {
        self.strike_threshold = threshold;
        self
    }
}

/// Stateful per-session pipeline.
///
/// Feed frames in order with [`process_frame`](Self::process_frame), then
/// call [`finish`](Self::finish) once to obtain the immutable summary.
#[derive(Debug)]
pub struct GaitAnalyzer {
    meta: VideoMeta,
    config: AnalyzerConfig,
    session: SessionAccumulator,
    // Runs online inside the frame loop regardless of the configured
    // algorithm, so strike events are available for overlays either way.
    strike: VelocityStrikeDetector,
}

impl GaitAnalyzer {
    /// Create an analyzer with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GaitError::MetadataError`] for invalid metadata; the
    /// pipeline refuses to start when cadence and oscillation would be
    /// undefined.
    pub fn new(meta: VideoMeta) -> Result<Self> {
        Self::with_config(meta, AnalyzerConfig::default())
    }

    /// Create an analyzer with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GaitError::MetadataError`] for invalid metadata.
    pub fn with_config(meta: VideoMeta, config: AnalyzerConfig) -> Result<Self> {
        meta.validate()?;
        let strike = VelocityStrikeDetector::new(config.strike_threshold);
        Ok(Self {
            meta,
            config,
            session: SessionAccumulator::new(),
            strike,
        })
    }

    /// Source metadata for this session.
    #[must_use]
    pub const fn meta(&self) -> &VideoMeta {
        &self.meta
    }

    /// The running per-frame sequences.
    #[must_use]
    pub const fn session(&self) -> &SessionAccumulator {
        &self.session
    }

    /// Foot strikes seen so far by the causal detector.
    #[must_use]
    pub fn step_events(&self) -> &[StepEvent] {
        self.strike.events()
    }

    /// Consume one frame of pose output.
    ///
    /// `None` means the pose model produced no detection; the frame is
    /// skipped entirely, not interpolated. A detection missing required
    /// joints is likewise skipped and counted. Returns the frame's features
    /// when it was retained, for overlay drawing without recomputation.
    pub fn process_frame(&mut self, detection: Option<&JointFrame>) -> Option<FrameFeatures> {
        let Some(frame) = detection else {
            self.session.push_missing();
            return None;
        };

        match self.session.push_frame(frame) {
            Ok(features) => {
                let last = self.session.ankles.len() - 1;
                self.strike.push(self.session.ankles.lower(last));
                Some(features)
            }
            Err(_) => None,
        }
    }

    /// Finish the session and produce the immutable summary.
    ///
    /// The step count comes from the configured algorithm: the causal
    /// detector's incremental count, or one batch pass of the zero-crossing
    /// detector over the full ankle series.
    #[must_use]
    pub fn finish(self) -> GaitMetrics {
        let step_count = match self.config.algorithm {
            StepAlgorithm::Velocity => self.strike.step_count(),
            StepAlgorithm::ZeroCrossing => {
                let detector = self.config.algorithm.detector(self.config.strike_threshold);
                detector.detect_steps(&self.session.ankles)
            }
        };
        GaitMetrics::summarize(&self.session, &self.meta, step_count)
    }

    /// Drive a complete frame sequence through the pipeline.
    ///
    /// `cancel` is checked at frame boundaries only — never inside a single
    /// frame's feature computation — and aborts with
    /// [`GaitError::Cancelled`] when set.
    ///
    /// # Errors
    ///
    /// Returns [`GaitError::MetadataError`] for invalid metadata, or
    /// [`GaitError::Cancelled`] when the cancel flag is raised.
    pub fn analyze<'a, I>(
        meta: VideoMeta,
        config: AnalyzerConfig,
        frames: I,
        cancel: Option<&AtomicBool>,
    ) -> Result<GaitMetrics>
    where
        I: IntoIterator<Item = Option<&'a JointFrame>>,
    {
        let mut analyzer = Self::with_config(meta, config)?;
        for frame in frames {
            if let Some(flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    return Err(GaitError::Cancelled);
                }
            }
            analyzer.process_frame(frame);
        }
        Ok(analyzer.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::Joint;

    /// A runner mid-stride; `t` is the frame index driving the gait cycle.
    fn stride_frame(t: usize) -> JointFrame {
        #[allow(clippy::cast_precision_loss)]
        let phase = t as f64 * 0.6;
        let bounce = 8.0 * (2.0 * phase).sin();
        let left_y = 500.0 + 25.0 * phase.sin();
        let right_y = 500.0 - 25.0 * phase.sin();
        JointFrame::new()
            .with_joint(Joint::LeftShoulder, 108.0, 120.0 + bounce, 0.95)
            .with_joint(Joint::RightShoulder, 128.0, 120.0 + bounce, 0.95)
            .with_joint(Joint::LeftHip, 90.0, 300.0 + bounce, 0.92)
            .with_joint(Joint::RightHip, 110.0, 301.0 + bounce, 0.92)
            .with_joint(Joint::LeftKnee, 95.0, 400.0 + bounce, 0.9)
            .with_joint(Joint::RightKnee, 112.0, 399.0 + bounce, 0.9)
            .with_joint(Joint::LeftAnkle, 98.0, left_y, 0.88)
            .with_joint(Joint::RightAnkle, 114.0, right_y, 0.88)
    }

    #[test]
    fn test_rejects_invalid_metadata() {
        let meta = VideoMeta {
            fps: 0.0,
            width: 1920,
            height: 1080,
            total_frames: None,
        };
        assert!(GaitAnalyzer::new(meta).is_err());
    }

    #[test]
    fn test_full_pipeline_on_synthetic_stride() {
        let meta = VideoMeta::new(30.0, 1920, 1080).unwrap();
        let mut analyzer = GaitAnalyzer::new(meta).unwrap();

        for t in 0..90 {
            let features = analyzer.process_frame(Some(&stride_frame(t)));
            assert!(features.is_some());
        }

        let metrics = analyzer.finish();
        assert_eq!(metrics.detected_frames(), 90);
        assert_eq!(metrics.skipped_frames, 0);
        assert!((metrics.duration_secs - 3.0).abs() < 1e-9);
        assert!(metrics.step_count > 0, "oscillating ankles must yield steps");
        assert!(metrics.mean_confidence > 0.8);
    }

    #[test]
    fn test_algorithms_agree_on_order_of_magnitude() {
        let meta = VideoMeta::new(30.0, 1920, 1080).unwrap();
        let frames: Vec<JointFrame> = (0..120).map(stride_frame).collect();

        let run = |algorithm: StepAlgorithm| {
            let config = AnalyzerConfig::new().with_algorithm(algorithm);
            GaitAnalyzer::analyze(
                meta,
                config,
                frames.iter().map(Some),
                None,
            )
            .unwrap()
        };

        let velocity = run(StepAlgorithm::Velocity);
        let crossing = run(StepAlgorithm::ZeroCrossing);
        assert!(velocity.step_count > 0);
        assert!(crossing.step_count > 0);
    }

    #[test]
    fn test_no_detection_frames_are_skipped() {
        let meta = VideoMeta::new(30.0, 1920, 1080).unwrap();
        let mut analyzer = GaitAnalyzer::new(meta).unwrap();

        analyzer.process_frame(Some(&stride_frame(0)));
        analyzer.process_frame(None);
        analyzer.process_frame(Some(&stride_frame(2)));

        let metrics = analyzer.finish();
        assert_eq!(metrics.detected_frames(), 2);
        assert_eq!(metrics.skipped_frames, 1);
    }

    #[test]
    fn test_cancellation_between_frames() {
        let meta = VideoMeta::new(30.0, 1920, 1080).unwrap();
        let frames: Vec<JointFrame> = (0..10).map(stride_frame).collect();
        let cancel = AtomicBool::new(true);

        let result = GaitAnalyzer::analyze(
            meta,
            AnalyzerConfig::default(),
            frames.iter().map(Some),
            Some(&cancel),
        );
        assert!(matches!(result, Err(GaitError::Cancelled)));
    }

    #[test]
    fn test_empty_session_summary() {
        let meta = VideoMeta::new(30.0, 1920, 1080).unwrap();
        let metrics = GaitAnalyzer::new(meta).unwrap().finish();
        assert_eq!(metrics.step_count, 0);
        assert!((metrics.cadence - 0.0).abs() < 1e-9);
    }
}
