/// Signed excess of a projected coordinate beyond the effective boundary.
#[inline]
pub fn penetration(coordinate: f64, boundary: f64) -> f64 {
    coordinate - boundary
}

/// One-sided harmonic law `U = k p^2 / 2` for `p > 0`.
///
/// Returns `(energy, restoring_magnitude)` where the restoring magnitude is `k p`. The
/// boundary itself (`p == 0`) is force-free, as is any type with `k == 0`.
#[inline]
pub fn one_sided_harmonic(penetration: f64, k: f64) -> (f64, f64) {
    if penetration <= 0.0 || k == 0.0 {
        return (0.0, 0.0);
    }
    let magnitude = k * penetration;
    (0.5 * magnitude * penetration, magnitude)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn penetration_is_coordinate_minus_boundary() {
        assert!(f64_approx_equal(penetration(5.4, 4.9), 0.5));
        assert!(f64_approx_equal(penetration(4.6, 5.1), -0.5));
    }

    #[test]
    fn one_sided_harmonic_is_quadratic_beyond_boundary() {
        let (energy, magnitude) = one_sided_harmonic(1.5, 50.0);
        assert!(f64_approx_equal(energy, 56.25));
        assert!(f64_approx_equal(magnitude, 75.0));
    }

    #[test]
    fn one_sided_harmonic_is_zero_inside_boundary() {
        assert_eq!(one_sided_harmonic(-0.5, 50.0), (0.0, 0.0));
        assert_eq!(one_sided_harmonic(-1e300, 1e6), (0.0, 0.0));
    }

    #[test]
    fn one_sided_harmonic_is_force_free_exactly_at_boundary() {
        assert_eq!(one_sided_harmonic(0.0, 200.0), (0.0, 0.0));
        assert_eq!(one_sided_harmonic(-0.0, 200.0), (0.0, 0.0));
    }

    #[test]
    fn one_sided_harmonic_with_zero_spring_constant_is_inert() {
        assert_eq!(one_sided_harmonic(10.0, 0.0), (0.0, 0.0));
    }

    #[test]
    fn one_sided_harmonic_is_continuous_at_boundary() {
        let (energy, magnitude) = one_sided_harmonic(1e-12, 200.0);
        assert!(energy < 1e-20);
        assert!(magnitude < 1e-9);
    }
}
