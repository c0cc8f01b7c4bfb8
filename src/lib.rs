// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

#![allow(clippy::multiple_crate_versions)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # Gait Analysis Library
//!
//! Running-form analysis written in Rust: converts per-frame body-joint
//! positions from pose estimation into gait metrics (cadence, knee flexion,
//! hip drop, forward lean, vertical oscillation) and categorical feedback
//! with actionable notes.
//!
//! ## Features
//!
//! - **Streaming analysis** - Frames are processed one at a time with O(1)
//!   step detection; summary statistics are computed once at the end
//! - **Two step detectors** - A causal ankle-velocity detector for live use
//!   and a retrospective zero-crossing detector for recorded sessions
//! - **Data quality grading** - Per-frame pose confidence is aggregated into
//!   a High/Medium/Low quality grade attached to every summary
//! - **Threshold tables as data** - Feedback bands and issue rules live in
//!   one `const` table, not scattered conditionals
//! - **JSON in, JSON out** - Pose sequences load from JSON; metrics and
//!   feedback export as JSON for downstream tooling
//!
//! ## Installation
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! gait-analysis = "0.1.0"
//! ```
//!
//! Or install the CLI tool:
//!
//! ```bash
//! cargo install gait-analysis
//! ```
//!
//! ## Quick Start (Library)
//!
//! ```no_run
//! use gait_analysis::{GaitAnalyzer, PoseSequence, classify};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let sequence = PoseSequence::load("session.json")?;
//!
//!     let mut analyzer = GaitAnalyzer::new(sequence.meta)?;
//!     for frame in &sequence.frames {
//!         analyzer.process_frame(frame.as_ref());
//!     }
//!
//!     let metrics = analyzer.finish();
//!     let feedback = classify(&metrics);
//!
//!     println!("Cadence: {:.1} steps/min", metrics.cadence);
//!     for entry in &feedback.entries {
//!         println!("{} {}: {}", entry.status.icon(), entry.dimension.title(), entry.explanation);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## CLI Usage
//!
//! ```bash
//! # Analyze a recorded pose sequence
//! gait-analysis analyze --source session.json
//!
//! # Save the text report and JSON export
//! gait-analysis analyze -s session.json --report report.txt --json metrics.json
//!
//! # Use the retrospective zero-crossing step detector
//! gait-analysis analyze -s session.json --detector zero-crossing
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`analyzer`] | Core [`GaitAnalyzer`] driving the per-frame pipeline |
//! | [`pose`] | Input types ([`Joint`], [`JointFrame`], [`Point`]) |
//! | [`geometry`] | Joint, lean, and hip-drop angle math |
//! | [`features`] | Per-frame feature extraction and session accumulation |
//! | [`steps`] | Step detection ([`VelocityStrikeDetector`], [`ZeroCrossingDetector`]) |
//! | [`metrics`] | Session summary ([`GaitMetrics`], [`DataQuality`]) |
//! | [`feedback`] | Threshold tables and classification ([`classify`]) |
//! | [`source`] | Pose sequence JSON loading ([`PoseSequence`]) |
//! | [`report`] | Text and JSON report rendering |
//! | [`metadata`] | Capture metadata ([`VideoMeta`]) |
//! | [`error`] | Error types ([`GaitError`], [`Result`]) |
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `annotate` | Frame overlay drawing support (default) |
//!
//! ## License
//!
//! This project is licensed under [AGPL-3.0](https://ultralytics.com/license).

// Modules
pub mod annotate;
pub mod analyzer;
pub mod cli;
pub mod error;
pub mod features;
pub mod feedback;
pub mod geometry;
pub mod metadata;
pub mod metrics;
pub mod pose;
pub mod report;
pub mod source;
pub mod steps;

// Re-export main types for convenience
pub use analyzer::{AnalyzerConfig, GaitAnalyzer};
pub use error::{GaitError, Result};
pub use features::{FrameFeatures, MissingJoint, SessionAccumulator};
pub use feedback::{classify, Dimension, FeedbackEntry, FeedbackReport, Status};
pub use metrics::{DataQuality, GaitMetrics};
pub use pose::{Joint, JointFrame, Point};
pub use source::PoseSequence;
pub use steps::{
    cadence, AnkleSeries, StepAlgorithm, StepDetector, StepEvent, VelocityStrikeDetector,
    ZeroCrossingDetector,
};

// Re-export metadata for advanced use
pub use metadata::VideoMeta;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        // Version should be semver format like "0.1.0"
        assert!(VERSION.contains('.'));
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "gait-analysis");
    }
}
