/// Magnitude below which a value is treated as zero.
pub const EPSILON: f64 = 1e-10;

/// Returns true if `x` is within [`EPSILON`] of zero.
#[inline]
pub fn is_zero(x: f64) -> bool {
    x.abs() < EPSILON
}

/// Snap values within [`EPSILON`] of zero to exactly zero.
///
/// Used before sign tests so numerical noise never flips a comparison.
#[inline]
pub fn align_zero(x: f64) -> f64 {
    if is_zero(x) {
        0.0
    } else {
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_zero() {
        assert!(is_zero(0.0));
        assert!(is_zero(1e-11));
        assert!(is_zero(-1e-11));
        assert!(!is_zero(1e-9));
    }

    #[test]
    fn test_align_zero() {
        assert_eq!(align_zero(1e-12), 0.0);
        assert_eq!(align_zero(-1e-12), 0.0);
        assert_eq!(align_zero(0.5), 0.5);
        assert_eq!(align_zero(-0.5), -0.5);
    }
}
