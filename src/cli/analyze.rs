// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use std::process;
use std::time::Instant;

use crate::cli::args::AnalyzeArgs;
use crate::feedback::classify;
use crate::report;
use crate::source::PoseSequence;
use crate::steps::StepAlgorithm;
use crate::{AnalyzerConfig, GaitAnalyzer, VERSION};
use crate::{error, info, section, success, verbose, warn};

/// Run gait analysis on a recorded pose sequence.
pub fn run_analysis(args: &AnalyzeArgs) {
    let algorithm: StepAlgorithm = match args.detector.parse() {
        Ok(a) => a,
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    };

    let sequence = match PoseSequence::load(&args.source) {
        Ok(s) => s,
        Err(e) => {
            error!("Error loading pose sequence: {e}");
            process::exit(1);
        }
    };

    info!(
        "Gait Analysis {VERSION} 🚀 {}x{} @ {:.1} fps",
        sequence.meta.width, sequence.meta.height, sequence.meta.fps
    );
    verbose!(
        "{}: {} frames, {} with detections, detector={algorithm}",
        args.source,
        sequence.len(),
        sequence.detected()
    );

    if sequence.is_empty() {
        warn!("Pose sequence contains no frames.");
    }

    let config = AnalyzerConfig::new()
        .with_algorithm(algorithm)
        .with_strike_threshold(args.threshold);

    let mut analyzer = match GaitAnalyzer::with_config(sequence.meta, config) {
        Ok(a) => a,
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    };

    let start = Instant::now();
    for frame in &sequence.frames {
        analyzer.process_frame(frame.as_ref());
    }
    let elapsed = start.elapsed();

    let metrics = analyzer.finish();
    let feedback = classify(&metrics);

    verbose!(
        "Processed {} frames in {:.1}ms ({} skipped)",
        sequence.len(),
        elapsed.as_secs_f64() * 1000.0,
        metrics.skipped_frames
    );

    section!("Results");
    info!("{}", report::render_text(&metrics, &feedback));

    if let Some(path) = &args.report {
        match report::write_text(path, &metrics, &feedback) {
            Ok(()) => success!("Report saved to {path}"),
            Err(e) => {
                error!("Error writing report: {e}");
                process::exit(1);
            }
        }
    }

    if let Some(path) = &args.json {
        match report::write_json(path, &metrics, &feedback) {
            Ok(()) => success!("JSON saved to {path}"),
            Err(e) => {
                error!("Error writing JSON: {e}");
                process::exit(1);
            }
        }
    }
}
