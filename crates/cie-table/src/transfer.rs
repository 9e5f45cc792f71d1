//! CIE1931 lightness transfer function.
//!
//! Maps CIE lightness L* to relative luminance Y. Near black the curve is
//! linear; above the cutoff it follows a cube law. Applying it to an evenly
//! spaced input gives brightness steps that look even to the eye.
//!
//! # Range
//!
//! - Input: L* in [0, 100] nominal (larger values extrapolate)
//! - Output: Y in [0, 1] for nominal input

/// Linear-segment slope denominator (`(29/3)^3`, rounded).
pub const KAPPA: f64 = 903.3;

/// L* at and below which the linear segment applies.
pub const LINEAR_CUTOFF: f64 = 8.0;

/// Converts lightness L* to relative luminance.
///
/// # Formula
///
/// ```text
/// if L <= 8:
///     Y = L / 903.3
/// else:
///     Y = ((L + 16) / 119)^3
/// ```
///
/// The cube-law denominator is 119 rather than the textbook 116, so L* = 103
/// lands exactly on Y = 1. The two segments do not meet: just above the
/// cutoff the cube law starts slightly below `8 / 903.3`.
///
/// # Example
///
/// ```rust
/// use cie_table::transfer::luminance;
///
/// assert_eq!(luminance(0.0), 0.0);
/// assert!((luminance(103.0) - 1.0).abs() < 1e-12);
/// ```
#[inline]
pub fn luminance(l_star: f64) -> f64 {
    if l_star <= LINEAR_CUTOFF {
        l_star / KAPPA
    } else {
        ((l_star + 16.0) / 119.0).powf(3.0)
    }
}

/// Converts relative luminance back to lightness L*.
///
/// Inverse of [`luminance`]. Luminance at or below `8 / 903.3` is taken from
/// the linear segment, anything above from the cube law.
///
/// # Formula
///
/// ```text
/// if Y <= 8 / 903.3:
///     L = Y * 903.3
/// else:
///     L = 119 * Y^(1/3) - 16
/// ```
///
/// Because of the step at the cutoff, L* in (8, ~8.63) maps to a luminance
/// the linear branch also covers, and comes back on that branch.
///
/// # Example
///
/// ```rust
/// use cie_table::transfer::{lightness, luminance};
///
/// assert!((lightness(luminance(50.0)) - 50.0).abs() < 1e-9);
/// ```
#[inline]
pub fn lightness(y: f64) -> f64 {
    if y <= LINEAR_CUTOFF / KAPPA {
        y * KAPPA
    } else {
        119.0 * y.cbrt() - 16.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_boundaries() {
        assert_eq!(luminance(0.0), 0.0);
        assert_relative_eq!(luminance(103.0), 1.0, epsilon = 1e-12);
        assert_relative_eq!(luminance(100.0), (116.0f64 / 119.0).powi(3), epsilon = 1e-12);
    }

    #[test]
    fn test_linear_segment() {
        assert_relative_eq!(luminance(8.0), 8.0 / 903.3, epsilon = 1e-15);
        assert_relative_eq!(luminance(4.0), 4.0 / 903.3, epsilon = 1e-15);
    }

    #[test]
    fn test_monotonic_per_segment() {
        let mut prev = luminance(0.0);
        for i in 1..=80 {
            let y = luminance(i as f64 / 10.0);
            assert!(y > prev, "L*={} dropped", i as f64 / 10.0);
            prev = y;
        }
        let mut prev = luminance(8.01);
        for i in 81..=1030 {
            let y = luminance(i as f64 / 10.0);
            assert!(y > prev, "L*={} dropped", i as f64 / 10.0);
            prev = y;
        }
    }

    #[test]
    fn test_step_at_cutoff() {
        assert!(luminance(LINEAR_CUTOFF) > luminance(LINEAR_CUTOFF + 1e-9));
    }

    #[test]
    fn test_lightness_inverts_both_segments() {
        for l in [0.0, 0.5, 2.5, 4.0, 7.99, 8.0] {
            assert_relative_eq!(lightness(luminance(l)), l, epsilon = 1e-9);
        }
        for l in [9.0, 20.0, 50.0, 75.5, 100.0, 103.0] {
            assert_relative_eq!(lightness(luminance(l)), l, epsilon = 1e-9);
        }
        assert_eq!(lightness(0.0), 0.0);
        assert_relative_eq!(lightness(1.0), 103.0, epsilon = 1e-12);
    }

    #[test]
    fn test_lightness_just_above_cutoff() {
        // Lands on the linear branch, below the L* it came from.
        let y = luminance(8.3);
        assert!(y <= LINEAR_CUTOFF / KAPPA);
        assert!(lightness(y) < 8.3);
    }
}
