//! Polyline simplification (Ramer–Douglas–Peucker).

use strata_core::Vec3;

/// Options for [`simplify_path`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SimplifyOptions {
    /// Interior points at most this far from the chord between their kept
    /// neighbours are dropped.
    pub tolerance: f64,
}

impl Default for SimplifyOptions {
    fn default() -> Self {
        Self { tolerance: 0.01 }
    }
}

/// Drop interior points that lie within `tolerance` of the chord between
/// their kept neighbours.
///
/// The first and last points are always kept exactly, and kept points stay
/// in their original order. Among equally distant candidates the earliest
/// is split on, which makes the result stable under repeated application:
/// `simplify_path(&simplify_path(p, o), o) == simplify_path(p, o)`.
pub fn simplify_path(points: &[Vec3], options: SimplifyOptions) -> Vec<Vec3> {
    let n = points.len();
    if n <= 2 {
        return points.to_vec();
    }

    let mut keep = vec![false; n];
    keep[0] = true;
    keep[n - 1] = true;

    let mut stack = vec![(0, n - 1)];
    while let Some((first, last)) = stack.pop() {
        if last <= first + 1 {
            continue;
        }
        let (a, b) = (points[first], points[last]);
        let mut far = first;
        let mut far_d = -1.0;
        for (i, p) in points.iter().enumerate().take(last).skip(first + 1) {
            let d = p.distance_to_segment(a, b);
            if d > far_d {
                far = i;
                far_d = d;
            }
        }
        if far_d > options.tolerance {
            keep[far] = true;
            stack.push((far, last));
            stack.push((first, far));
        }
    }

    points
        .iter()
        .zip(keep)
        .filter_map(|(&p, k)| k.then_some(p))
        .collect()
}
