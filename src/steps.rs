// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Foot-strike detection over ankle-height time series.
//!
//! Two interchangeable strategies sit behind the [`StepDetector`] trait:
//!
//! - [`VelocityStrikeDetector`] — causal. Fires when the ankle was descending
//!   and its descent sharply decelerates, the moment a foot meets the ground.
//!   O(1) state per frame, so it can also run online inside the frame loop.
//! - [`ZeroCrossingDetector`] — batch. Detrends each leg's full series and
//!   counts mean-crossings; one stride per crossing pair.
//!
//! Both accept the same [`AnkleSeries`] so a harness can swap algorithms and
//! compare outputs on the same fixture data.

use std::fmt;
use std::str::FromStr;

use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

/// A detected foot strike.
///
/// The index counts detected frames (the sequence the detector sees), not
/// raw video frames: frames without a pose detection contribute nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepEvent {
    /// Index into the detected-frame sequence.
    pub frame: usize,
}

/// Per-leg ankle vertical-position series, in image pixel coordinates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnkleSeries {
    /// Left ankle y positions, one per detected frame.
    pub left: Vec<f64>,
    /// Right ankle y positions, one per detected frame.
    pub right: Vec<f64>,
}

impl AnkleSeries {
    /// Create an empty series.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one frame's ankle heights.
    pub fn push(&mut self, left_y: f64, right_y: f64) {
        self.left.push(left_y);
        self.right.push(right_y);
    }

    /// Number of recorded frames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.left.len()
    }

    /// Whether no frames have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    /// Lower-ankle height at frame `i`: max of the two (y grows downward, so
    /// the larger value is the foot closer to the ground).
    #[must_use]
    pub fn lower(&self, i: usize) -> f64 {
        self.left[i].max(self.right[i])
    }
}

/// A strategy that turns an ankle-height series into a step count.
pub trait StepDetector {
    /// Count foot strikes over the full series.
    fn detect_steps(&self, series: &AnkleSeries) -> usize;

    /// Human-readable strategy name.
    fn name(&self) -> &'static str;
}

/// Causal velocity-threshold foot-strike detector.
///
/// Tracks the previous frame's lower-ankle height and frame-to-frame
/// velocity. A strike fires when the previous velocity exceeded the descent
/// threshold and the current velocity has fallen below half of it — the
/// ankle was descending and its descent sharply decelerated.
#[derive(Debug, Clone)]
pub struct VelocityStrikeDetector {
    threshold: f64,
    prev_y: Option<f64>,
    prev_velocity: f64,
    frame: usize,
    events: Vec<StepEvent>,
}

impl VelocityStrikeDetector {
    /// Default descent threshold, in pixel-units per frame.
    pub const DEFAULT_THRESHOLD: f64 = 1.0;

    /// Create a detector with the given descent threshold.
    #[must_use]
    pub const fn new(threshold: f64) -> Self {
        Self {
            threshold,
            prev_y: None,
            prev_velocity: 0.0,
            frame: 0,
            events: Vec::new(),
        }
    }

    /// Feed one frame's lower-ankle height; returns the strike, if any.
    ///
    /// This is the online entry point: call it once per detected frame, in
    /// order. Frame order matters — the strike test depends on the
    /// immediately preceding frame's velocity.
    pub fn push(&mut self, lower_ankle_y: f64) -> Option<StepEvent> {
        let event = if let Some(prev_y) = self.prev_y {
            let velocity = lower_ankle_y - prev_y;
            let strike =
                self.prev_velocity > self.threshold && velocity < self.prev_velocity * 0.5;
            self.prev_velocity = velocity;
            strike.then_some(StepEvent { frame: self.frame })
        } else {
            None
        };

        self.prev_y = Some(lower_ankle_y);
        self.frame += 1;

        if let Some(e) = event {
            self.events.push(e);
        }
        event
    }

    /// Strikes detected so far, in frame order.
    #[must_use]
    pub fn events(&self) -> &[StepEvent] {
        &self.events
    }

    /// Number of strikes detected so far.
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.events.len()
    }

    /// Clear all detector state.
    pub fn reset(&mut self) {
        self.prev_y = None;
        self.prev_velocity = 0.0;
        self.frame = 0;
        self.events.clear();
    }
}

impl Default for VelocityStrikeDetector {
    fn default() -> Self {
        Self::new(Self::DEFAULT_THRESHOLD)
    }
}

impl StepDetector for VelocityStrikeDetector {
    fn detect_steps(&self, series: &AnkleSeries) -> usize {
        // Replay the series through a fresh detector; the batch result is
        // identical to feeding the same values online.
        let mut detector = Self::new(self.threshold);
        for i in 0..series.len() {
            detector.push(series.lower(i));
        }
        detector.step_count()
    }

    fn name(&self) -> &'static str {
        "velocity"
    }
}

/// Batch zero-crossing step detector.
///
/// Each leg's series is detrended by subtracting its session mean; each pair
/// of sign changes in the detrended signal is one full oscillation, i.e. one
/// stride. The step count is the sum over both legs.
#[derive(Debug, Clone)]
pub struct ZeroCrossingDetector {
    min_samples: usize,
}

impl ZeroCrossingDetector {
    /// Minimum series length; shorter sessions yield zero steps.
    pub const MIN_SAMPLES: usize = 10;

    /// Create a detector with the default sample floor.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            min_samples: Self::MIN_SAMPLES,
        }
    }

    fn leg_steps(series: &[f64]) -> usize {
        let view = ArrayView1::from(series);
        let mean = view.mean().unwrap_or(0.0);

        let sign = |v: f64| -> i8 {
            if v > 0.0 {
                1
            } else if v < 0.0 {
                -1
            } else {
                0
            }
        };

        let crossings = series
            .windows(2)
            .filter(|w| sign(w[0] - mean) != sign(w[1] - mean))
            .count();
        crossings / 2
    }
}

impl Default for ZeroCrossingDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl StepDetector for ZeroCrossingDetector {
    fn detect_steps(&self, series: &AnkleSeries) -> usize {
        if series.len() < self.min_samples {
            return 0;
        }
        Self::leg_steps(&series.left) + Self::leg_steps(&series.right)
    }

    fn name(&self) -> &'static str {
        "zero-crossing"
    }
}

/// Which step-detection strategy to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepAlgorithm {
    /// Causal velocity-threshold detector.
    #[default]
    Velocity,
    /// Batch zero-crossing detector.
    ZeroCrossing,
}

impl StepAlgorithm {
    /// Build the detector for this algorithm.
    #[must_use]
    pub fn detector(&self, threshold: f64) -> Box<dyn StepDetector> {
        match self {
            Self::Velocity => Box::new(VelocityStrikeDetector::new(threshold)),
            Self::ZeroCrossing => Box::new(ZeroCrossingDetector::new()),
        }
    }

    /// String form used by the CLI.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Velocity => "velocity",
            Self::ZeroCrossing => "zero-crossing",
        }
    }
}

impl fmt::Display for StepAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StepAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "velocity" | "strike" => Ok(Self::Velocity),
            "zero-crossing" | "zerocrossing" | "crossing" => Ok(Self::ZeroCrossing),
            _ => Err(format!(
                "invalid step algorithm '{s}', expected one of: velocity, zero-crossing"
            )),
        }
    }
}

/// Steps per minute over an analysis duration.
///
/// Zero duration yields zero cadence rather than an error, independent of
/// step count.
#[must_use]
pub fn cadence(step_count: usize, duration_secs: f64) -> f64 {
    if duration_secs > 0.0 {
        #[allow(clippy::cast_precision_loss)]
        let steps = step_count as f64;
        steps / duration_secs * 60.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Series whose lower ankle descends fast then decelerates: one strike.
    fn strike_series() -> AnkleSeries {
        let mut s = AnkleSeries::new();
        // Descent at 3 px/frame, then near-stop.
        for y in [100.0, 103.0, 106.0, 109.0, 109.5, 109.6] {
            s.push(y, y - 50.0);
        }
        s
    }

    #[test]
    fn test_velocity_detects_deceleration() {
        let detector = VelocityStrikeDetector::default();
        assert_eq!(detector.detect_steps(&strike_series()), 1);
    }

    #[test]
    fn test_velocity_online_matches_batch() {
        let series = strike_series();
        let batch = VelocityStrikeDetector::default().detect_steps(&series);

        let mut online = VelocityStrikeDetector::default();
        for i in 0..series.len() {
            online.push(series.lower(i));
        }
        assert_eq!(online.step_count(), batch);
    }

    #[test]
    fn test_velocity_ignores_steady_descent() {
        let mut s = AnkleSeries::default();
        for i in 0..20 {
            let y = 100.0 + 3.0 * f64::from(i);
            s.push(y, y);
        }
        assert_eq!(VelocityStrikeDetector::default().detect_steps(&s), 0);
    }

    #[test]
    fn test_velocity_event_index() {
        let series = strike_series();
        let mut detector = VelocityStrikeDetector::default();
        let mut fired = None;
        for i in 0..series.len() {
            if let Some(e) = detector.push(series.lower(i)) {
                fired = Some(e.frame);
            }
        }
        // Deceleration happens at the fifth sample (index 4).
        assert_eq!(fired, Some(4));
    }

    #[test]
    fn test_zero_crossing_counts_oscillations() {
        // Left leg crosses its detrended mean 4 times, right leg twice:
        // (4 / 2) + (2 / 2) = 3 steps.
        let left = vec![99.0, 101.0, 99.0, 101.0, 99.0, 99.0, 99.0, 99.0, 99.0, 99.0];
        let right = vec![99.0, 99.0, 99.0, 101.0, 101.0, 101.0, 99.0, 99.0, 99.0, 99.0];
        let series = AnkleSeries { left, right };
        let count = ZeroCrossingDetector::new().detect_steps(&series);
        assert_eq!(count, 3);
    }

    #[test]
    fn test_zero_crossing_short_series_is_zero() {
        let series = AnkleSeries {
            left: vec![1.0, -1.0, 1.0, -1.0],
            right: vec![1.0, -1.0, 1.0, -1.0],
        };
        assert_eq!(ZeroCrossingDetector::new().detect_steps(&series), 0);
    }

    #[test]
    fn test_zero_crossing_flat_series() {
        let series = AnkleSeries {
            left: vec![5.0; 30],
            right: vec![5.0; 30],
        };
        assert_eq!(ZeroCrossingDetector::new().detect_steps(&series), 0);
    }

    #[test]
    fn test_cadence() {
        assert!((cadence(90, 30.0) - 180.0).abs() < 1e-9);
        assert!((cadence(0, 30.0) - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_cadence_zero_duration() {
        assert!((cadence(100, 0.0) - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_cadence_monotonic_in_steps() {
        let duration = 42.0;
        let mut prev = 0.0;
        for steps in 0..50 {
            let c = cadence(steps, duration);
            assert!(c >= prev);
            prev = c;
        }
    }

    #[test]
    fn test_algorithm_from_str() {
        assert_eq!("velocity".parse::<StepAlgorithm>().unwrap(), StepAlgorithm::Velocity);
        assert_eq!(
            "zero-crossing".parse::<StepAlgorithm>().unwrap(),
            StepAlgorithm::ZeroCrossing
        );
        assert!("kalman".parse::<StepAlgorithm>().is_err());
    }
}
