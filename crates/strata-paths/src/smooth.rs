//! Chaikin corner cutting.

use strata_core::Vec3;

/// Upper bound on [`SmoothOptions::iterations`]. Each round doubles the
/// point count, so larger values are clamped to this.
pub const MAX_SMOOTH_ITERATIONS: u32 = 8;

/// Options for [`smooth_path`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SmoothOptions {
    /// Rounds of subdivision. Each round doubles the point count. Clamped
    /// to [`MAX_SMOOTH_ITERATIONS`].
    pub iterations: u32,
    /// Where each segment is cut, as a fraction of its length from either
    /// end. Clamped to `(0, 0.5]`.
    pub ratio: f64,
}

impl Default for SmoothOptions {
    fn default() -> Self {
        Self {
            iterations: 2,
            ratio: 0.25,
        }
    }
}

/// Smooth a polyline by Chaikin subdivision, keeping both endpoints fixed.
///
/// Inputs of two points or fewer come back unchanged.
pub fn smooth_path(points: &[Vec3], options: SmoothOptions) -> Vec<Vec3> {
    if points.len() <= 2 {
        return points.to_vec();
    }
    let ratio = if options.ratio.is_nan() {
        SmoothOptions::default().ratio
    } else {
        options.ratio.clamp(f64::EPSILON, 0.5)
    };

    let mut current = points.to_vec();
    let mut next = Vec::new();
    for _ in 0..options.iterations.min(MAX_SMOOTH_ITERATIONS) {
        next.clear();
        next.reserve(current.len() * 2);
        next.push(current[0]);
        for w in current.windows(2) {
            next.push(w[0].lerp(w[1], ratio));
            next.push(w[0].lerp(w[1], 1.0 - ratio));
        }
        next.push(current[current.len() - 1]);
        std::mem::swap(&mut current, &mut next);
    }
    current
}
