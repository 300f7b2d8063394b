use strata_core::Vec3;

/// Euclidean distance between two points.
#[inline]
pub fn calculate_distance(a: Vec3, b: Vec3) -> f64 {
    a.distance(b)
}

/// Total length of a polyline: the sum of its segment lengths.
///
/// Empty and single-point paths have length 0.
pub fn path_length(points: &[Vec3]) -> f64 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::{RngExt, SeedableRng};

    #[test]
    fn pythagorean() {
        assert_eq!(
            calculate_distance(Vec3::ZERO, Vec3::new(3.0, 4.0, 0.0)),
            5.0
        );
        assert_eq!(
            calculate_distance(Vec3::new(1.0, 2.0, 3.0), Vec3::new(1.0, 2.0, 3.0)),
            0.0
        );
    }

    #[test]
    fn symmetric_and_non_negative() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let a = Vec3::new(
                rng.random_range(-100.0..100.0),
                rng.random_range(-100.0..100.0),
                rng.random_range(-100.0..100.0),
            );
            let b = Vec3::new(
                rng.random_range(-100.0..100.0),
                rng.random_range(-100.0..100.0),
                rng.random_range(-100.0..100.0),
            );
            let d = calculate_distance(a, b);
            assert!(d >= 0.0);
            assert_eq!(d, calculate_distance(b, a));
        }
    }

    #[test]
    fn polyline_length() {
        assert_eq!(path_length(&[]), 0.0);
        assert_eq!(path_length(&[Vec3::new(1.0, 1.0, 1.0)]), 0.0);
        let pts = [
            Vec3::ZERO,
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(2.0, 0.0, 2.0),
        ];
        assert_relative_eq!(path_length(&pts), 2.0 + 2f64.sqrt());
    }
}
