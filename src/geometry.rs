// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Pure geometric functions over 2-D pixel coordinates.
//!
//! All angles are in degrees. Degenerate inputs (coincident points,
//! near-zero-length vectors) never error: the epsilon guard and cosine clamp
//! let results degrade smoothly so per-frame processing stays total.

use crate::pose::Point;

/// Guard against division by zero for near-zero-length vectors.
const NORM_EPS: f64 = 1e-6;

/// Angle at vertex `b` formed by rays `b→a` and `b→c`, in degrees [0, 180].
///
/// Computed via the dot-product/arccosine formula. The cosine is clamped to
/// [-1, 1] before inversion to guard against floating-point overshoot from
/// near-parallel vectors.
///
/// # Arguments
///
/// * `a` - First ray endpoint.
/// * `b` - Vertex.
/// * `c` - Second ray endpoint.
#[must_use]
pub fn joint_angle(a: Point, b: Point, c: Point) -> f64 {
    let ba = (a.x - b.x, a.y - b.y);
    let bc = (c.x - b.x, c.y - b.y);

    let dot = ba.0 * bc.0 + ba.1 * bc.1;
    let norm_ba = ba.0.hypot(ba.1);
    let norm_bc = bc.0.hypot(bc.1);

    let cosine = (dot / (norm_ba * norm_bc + NORM_EPS)).clamp(-1.0, 1.0);
    cosine.acos().to_degrees()
}

/// Signed angle of the segment `lower→upper` from the vertical axis, degrees.
///
/// Sign convention (the only one in this crate): 0° means `upper` is
/// directly above `lower` in image coordinates (where y increases downward);
/// positive means `upper` is displaced toward +x. For a trunk measured
/// hip-midpoint to shoulder-midpoint on a runner facing +x, positive is a
/// forward lean.
#[must_use]
pub fn lean_angle(lower: Point, upper: Point) -> f64 {
    let dx = upper.x - lower.x;
    let dy = lower.y - upper.y;
    dx.atan2(dy).to_degrees()
}

/// Pelvic-tilt angle from the two hip positions, in degrees.
///
/// The tangent is (vertical pixel difference) / (horizontal difference + 1).
/// The `+ 1` is a deliberate, documented bias that avoids division by zero
/// when the hips are vertically aligned in the image; it is not a bug.
#[must_use]
pub fn hip_drop_angle(left_hip: Point, right_hip: Point) -> f64 {
    let dy = (left_hip.y - right_hip.y).abs();
    let dx = (left_hip.x - right_hip.x).abs();
    dy.atan2(dx + 1.0).to_degrees()
}

/// Midpoint of two points.
#[must_use]
pub fn midpoint(a: Point, b: Point) -> Point {
    Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}
