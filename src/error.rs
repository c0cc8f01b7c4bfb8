// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Error types for the gait analysis library.

use std::fmt;

/// Result type alias for gait analysis operations.
pub type Result<T> = std::result::Result<T, GaitError>;

/// Main error type for the gait analysis library.
///
/// Per-frame problems (a missing joint, degenerate geometry) are not errors:
/// they are swallowed at the frame boundary and surface only as the
/// skipped-frame count on the session summary. This enum covers the failures
/// that must propagate to the caller.
#[derive(Debug)]
pub enum GaitError {
    /// Invalid source metadata (non-positive frame rate or dimensions).
    MetadataError(String),
    /// Error loading or parsing a recorded pose sequence.
    SourceError(String),
    /// Error writing a report or export file.
    ReportError(String),
    /// Analysis was cancelled between frames.
    Cancelled,
    /// Wrapped `std::io::Error`.
    Io(std::io::Error),
    /// Wrapped `serde_json::Error`.
    Json(serde_json::Error),
}

impl fmt::Display for GaitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MetadataError(msg) => write!(f, "Metadata error: {msg}"),
            Self::SourceError(msg) => write!(f, "Source error: {msg}"),
            Self::ReportError(msg) => write!(f, "Report error: {msg}"),
            Self::Cancelled => write!(f, "Analysis cancelled"),
            Self::Io(err) => write!(f, "IO error: {err}"),
            Self::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl std::error::Error for GaitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GaitError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for GaitError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}
