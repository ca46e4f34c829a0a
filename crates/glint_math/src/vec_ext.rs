// Extra vector utilities for DVec3
//
// Extends glam::DVec3 with the checked normalization and coefficient threshold
// the shading code relies on.

use glam::DVec3;

use crate::{is_zero, MathError, MathResult};

/// Extension trait for DVec3 to provide ray tracing helpers
pub trait DVec3Ext {
    /// Normalize, failing on the zero vector instead of producing NaNs.
    fn try_unit(&self) -> MathResult<DVec3>;

    /// True if every component is within tolerance of zero.
    fn is_zero_vector(&self) -> bool;

    /// True if every component is strictly below `threshold`.
    ///
    /// Used on attenuation coefficient triples to cut off recursion once a
    /// contribution can no longer be seen.
    fn lower_than(&self, threshold: f64) -> bool;
}

impl DVec3Ext for DVec3 {
    fn try_unit(&self) -> MathResult<DVec3> {
        if self.is_zero_vector() {
            return Err(MathError::ZeroVector);
        }
        self.try_normalize().ok_or(MathError::ZeroVector)
    }

    fn is_zero_vector(&self) -> bool {
        is_zero(self.x) && is_zero(self.y) && is_zero(self.z)
    }

    fn lower_than(&self, threshold: f64) -> bool {
        self.x < threshold && self.y < threshold && self.z < threshold
    }
}
