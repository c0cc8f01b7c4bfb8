// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Per-frame overlay annotation.
//!
//! The overlay collaborator receives the [`FrameFeatures`] the pipeline
//! already computed — nothing is recomputed here. [`overlay_lines`] is always
//! available; actually burning text onto an image requires the `annotate`
//! feature.

use crate::features::FrameFeatures;

#[cfg(feature = "annotate")]
use ab_glyph::{FontVec, PxScale};
#[cfg(feature = "annotate")]
use image::{Rgb, RgbImage};
#[cfg(feature = "annotate")]
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut};
#[cfg(feature = "annotate")]
use imageproc::rect::Rect;

#[cfg(feature = "annotate")]
use crate::error::{GaitError, Result};

/// Overlay panel background.
#[cfg(feature = "annotate")]
const PANEL_BG: Rgb<u8> = Rgb([16, 16, 16]);

/// Overlay text color.
#[cfg(feature = "annotate")]
const PANEL_FG: Rgb<u8> = Rgb([243, 243, 243]);

/// Text lines for one frame's on-frame metric block.
#[must_use]
pub fn overlay_lines(frame_idx: usize, features: &FrameFeatures) -> Vec<String> {
    vec![
        format!("Frame: {frame_idx}"),
        format!("L Knee: {:.1} deg", features.left_knee_angle),
        format!("R Knee: {:.1} deg", features.right_knee_angle),
        format!("Hip Drop: {:.1} deg", features.hip_drop),
        format!("Forward Lean: {:.1} deg", features.forward_lean),
    ]
}

/// Load a TrueType/OpenType font for overlay drawing.
///
/// # Errors
///
/// Returns [`GaitError::Io`] if the file cannot be read, or
/// [`GaitError::ReportError`] if the bytes are not a parseable font.
#[cfg(feature = "annotate")]
pub fn load_font<P: AsRef<std::path::Path>>(path: P) -> Result<FontVec> {
    let bytes = std::fs::read(path)?;
    FontVec::try_from_vec(bytes)
        .map_err(|e| GaitError::ReportError(format!("invalid font file: {e}")))
}

/// Draw the metric block onto the top-left corner of a frame.
#[cfg(feature = "annotate")]
pub fn draw_overlay(image: &mut RgbImage, font: &FontVec, lines: &[String]) {
    const MARGIN: i32 = 10;
    const LINE_HEIGHT: i32 = 25;
    const PANEL_WIDTH: u32 = 340;

    if lines.is_empty() {
        return;
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let panel_height = (lines.len() as i32 * LINE_HEIGHT + MARGIN) as u32;
    let panel = Rect::at(MARGIN, MARGIN).of_size(PANEL_WIDTH, panel_height);
    draw_filled_rect_mut(image, panel, PANEL_BG);

    let scale = PxScale::from(18.0);
    for (i, line) in lines.iter().enumerate() {
        #[allow(clippy::cast_possible_truncation)]
        let y = MARGIN * 2 + i as i32 * LINE_HEIGHT;
        draw_text_mut(image, PANEL_FG, MARGIN * 2, y, scale, font, line);
    }
}
