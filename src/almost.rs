//! Epsilon-tolerant floating-point comparison.
//!
//! Exact `==` on floats rejects values that differ only by rounding error.
//! The harness compares floats against a tolerance instead, defaulting to
//! the type's machine epsilon. The comparison is strict: a delta exactly
//! equal to the tolerance is a mismatch.

/// Floating-point types that support almost-equal comparison.
pub trait AlmostEq: Copy {
    /// Default tolerance: the type's machine epsilon.
    const DEFAULT_TOLERANCE: Self;

    /// Return true if `self` and `other` differ by strictly less than `tolerance`.
    fn almost_eq(self, other: Self, tolerance: Self) -> bool;
}

impl AlmostEq for f32 {
    const DEFAULT_TOLERANCE: Self = f32::EPSILON;

    fn almost_eq(self, other: Self, tolerance: Self) -> bool {
        (self - other).abs() < tolerance
    }
}

impl AlmostEq for f64 {
    const DEFAULT_TOLERANCE: Self = f64::EPSILON;

    fn almost_eq(self, other: Self, tolerance: Self) -> bool {
        (self - other).abs() < tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_values_are_almost_equal() {
        assert!(1.0f32.almost_eq(1.0, f32::EPSILON));
        assert!(10.0f64.almost_eq(10.0, f64::EPSILON));
    }

    #[test]
    fn delta_of_one_epsilon_is_rejected() {
        assert!(!1.0f32.almost_eq(1.0 + f32::EPSILON, f32::EPSILON));
        assert!(!1.0f64.almost_eq(1.0 + f64::EPSILON, f64::EPSILON));
    }

    #[test]
    fn wider_tolerance_accepts_larger_deltas() {
        assert!(1.0f64.almost_eq(1.4, 0.5));
        assert!(!1.0f64.almost_eq(1.6, 0.5));
    }

    #[test]
    fn nan_is_never_almost_equal() {
        assert!(!f64::NAN.almost_eq(f64::NAN, 1.0));
    }
}
