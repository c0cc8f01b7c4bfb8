// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Report rendering.
//!
//! Renderers format what the aggregator and classifier already computed;
//! they never recompute statistics. The text layout follows the classic
//! coaching-report shape: session header, one section per dimension, then a
//! summary with the prioritized issue list.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::feedback::FeedbackReport;
use crate::metrics::GaitMetrics;

const RULE_HEAVY: &str = "============================================================";
const RULE_LIGHT: &str = "----------------------------------------";

/// Render the plain-text analysis report.
#[must_use]
pub fn render_text(metrics: &GaitMetrics, report: &FeedbackReport) -> String {
    let mut out = Vec::new();

    out.push(RULE_HEAVY.to_string());
    out.push("RUNNING FORM ANALYSIS REPORT".to_string());
    out.push(RULE_HEAVY.to_string());
    out.push(String::new());

    out.push(format!(
        "Analysis Duration: {:.1} seconds",
        metrics.duration_secs
    ));
    out.push(format!("Steps Detected: {}", metrics.step_count));
    out.push(format!(
        "Data Quality: {} (mean confidence {:.2})",
        metrics.data_quality, metrics.mean_confidence
    ));
    if metrics.skipped_frames > 0 {
        out.push(format!("Frames Skipped: {}", metrics.skipped_frames));
    }
    out.push(String::new());

    for entry in &report.entries {
        out.push(RULE_LIGHT.to_string());
        out.push(entry.dimension.title().to_uppercase());
        out.push(RULE_LIGHT.to_string());
        let value = match entry.dimension.unit() {
            "spm" => format!("{:.0} spm", entry.value),
            unit => format!("{:.1}{unit}", entry.value),
        };
        out.push(format!("{} {}: {}", entry.icon, entry.dimension.title(), value));
        out.push(format!("   {}", entry.explanation));
        out.push(String::new());
    }

    out.push(RULE_HEAVY.to_string());
    out.push("SUMMARY & NEXT STEPS".to_string());
    out.push(RULE_HEAVY.to_string());
    out.push(report.verdict.clone());
    if !report.issues.is_empty() {
        out.push(String::new());
        out.push("Recommended priority:".to_string());
        out.push("1. Work on one thing at a time".to_string());
        out.push("2. Start with short drills (30-60 seconds)".to_string());
        out.push("3. Re-record in 4-6 weeks to track progress".to_string());
    }
    out.push(String::new());
    out.push(RULE_HEAVY.to_string());
    out.push("Note: This analysis works best with a side-view video".to_string());
    out.push("of running at steady pace on flat ground.".to_string());
    out.push(RULE_HEAVY.to_string());

    out.join("\n")
}

/// Write the text report to a file.
///
/// # Errors
///
/// Returns [`GaitError::Io`](crate::GaitError::Io) on write failure.
pub fn write_text<P: AsRef<Path>>(
    path: P,
    metrics: &GaitMetrics,
    report: &FeedbackReport,
) -> Result<()> {
    fs::write(path, render_text(metrics, report))?;
    Ok(())
}

/// Combined JSON export: the summary plus its classification.
#[derive(Debug, Serialize)]
struct JsonExport<'a> {
    metrics: &'a GaitMetrics,
    feedback: &'a FeedbackReport,
}

/// Render the summary and feedback as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`GaitError::Json`](crate::GaitError::Json) on serialization
/// failure.
pub fn render_json(metrics: &GaitMetrics, report: &FeedbackReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(&JsonExport {
        metrics,
        feedback: report,
    })?)
}

/// Write the JSON export to a file.
///
/// # Errors
///
/// Returns [`GaitError::Io`](crate::GaitError::Io) or
/// [`GaitError::Json`](crate::GaitError::Json).
pub fn write_json<P: AsRef<Path>>(
    path: P,
    metrics: &GaitMetrics,
    report: &FeedbackReport,
) -> Result<()> {
    fs::write(path, render_json(metrics, report)?)?;
    Ok(())
}
