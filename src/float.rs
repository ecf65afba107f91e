//! Scalar comparison helpers for single-precision math.
//!
//! Floating-point results of chained transforms accumulate rounding error,
//! so identity/orthogonality checks and vector equality go through these
//! tolerance-based comparisons instead of `==`.

/// Default comparison tolerance.
pub const TOLERANCE: f32 = f32::EPSILON;

/// Returns true if `a` and `b` are equal within the default tolerance.
#[inline]
pub fn equals(a: f32, b: f32) -> bool {
    equals_with(a, b, TOLERANCE)
}

/// Returns true if `a` and `b` are equal within `tolerance`.
#[inline]
pub fn equals_with(a: f32, b: f32, tolerance: f32) -> bool {
    (a - b).abs() <= tolerance
}

/// Returns true if `a` is zero within the default tolerance.
#[inline]
pub fn is_zero(a: f32) -> bool {
    is_zero_with(a, TOLERANCE)
}

/// Returns true if `a` is zero within `tolerance`.
#[inline]
pub fn is_zero_with(a: f32, tolerance: f32) -> bool {
    a.abs() <= tolerance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equals_within_tolerance() {
        assert!(equals(1.0, 1.0));
        assert!(equals(1.0, 1.0 + f32::EPSILON));
        assert!(!equals(1.0, 1.0 + 1e-3));
    }

    #[test]
    fn is_zero_respects_custom_tolerance() {
        assert!(is_zero(0.0));
        assert!(!is_zero(1e-4));
        assert!(is_zero_with(1e-4, 1e-3));
    }
}
