use crate::{is_zero, DVec3, DVec3Ext, MathResult};

/// Distance secondary rays are pushed off a surface to avoid shadow acne.
pub const DELTA: f64 = 1e-5;

/// A half-line in 3D space with an origin and a unit direction.
///
/// Rays are used for raytracing - they represent a line starting at `origin`
/// and traveling in `direction`. The direction is normalized on construction
/// and a ray cannot be built from the zero vector.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    origin: DVec3,
    direction: DVec3,
}

impl Ray {
    /// Create a new ray, normalizing `direction`.
    pub fn new(origin: DVec3, direction: DVec3) -> MathResult<Self> {
        Ok(Self {
            origin,
            direction: direction.try_unit()?,
        })
    }

    /// Create a ray from a direction the caller already normalized.
    ///
    /// Used on hot paths (camera rays) where the direction cannot be zero by
    /// construction. Debug builds check the length.
    #[inline]
    pub fn from_unit(origin: DVec3, direction: DVec3) -> Self {
        debug_assert!(
            (direction.length_squared() - 1.0).abs() < 1e-9,
            "direction must be unit length"
        );
        Self { origin, direction }
    }

    /// Create a ray whose origin is pushed off a surface by [`DELTA`].
    ///
    /// The head is moved along `normal` toward the side `direction` points
    /// to, so a secondary ray never re-hits the surface it leaves. When the
    /// direction is tangent to the surface the head is not moved.
    pub fn offset(head: DVec3, direction: DVec3, normal: DVec3) -> MathResult<Self> {
        let nd = normal.dot(direction);
        let origin = if is_zero(nd) {
            head
        } else {
            head + normal * DELTA.copysign(nd)
        };
        Self::new(origin, direction)
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> DVec3 {
        self.origin
    }

    /// Get the unit direction of the ray.
    #[inline]
    pub fn direction(&self) -> DVec3 {
        self.direction
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f64) -> DVec3 {
        if is_zero(t) {
            self.origin
        } else {
            self.origin + self.direction * t
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MathError;

    #[test]
    fn test_ray_normalizes_direction() {
        let ray = Ray::new(DVec3::new(1.0, 2.0, 3.0), DVec3::new(0.0, 0.0, 5.0)).unwrap();

        assert_eq!(ray.origin(), DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(ray.direction(), DVec3::Z);
    }

    #[test]
    fn test_ray_zero_direction() {
        assert_eq!(
            Ray::new(DVec3::ZERO, DVec3::ZERO),
            Err(MathError::ZeroVector)
        );
    }

    #[test]
    fn test_ray_from_unit() {
        let ray = Ray::from_unit(DVec3::ONE, DVec3::Y);
        assert_eq!(ray, Ray::new(DVec3::ONE, DVec3::Y * 3.0).unwrap());
    }

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(DVec3::new(1.0, 0.0, 0.0), DVec3::X).unwrap();

        // Positive distance
        assert_eq!(ray.at(1.0), DVec3::new(2.0, 0.0, 0.0));
        // Negative distance
        assert_eq!(ray.at(-1.0), DVec3::ZERO);
        // Zero distance returns the origin
        assert_eq!(ray.at(0.0), ray.origin());
    }

    #[test]
    fn test_ray_offset_follows_direction_side() {
        let head = DVec3::ZERO;

        // Leaving on the normal's side
        let out = Ray::offset(head, DVec3::new(1.0, 1.0, 0.0), DVec3::Y).unwrap();
        assert!((out.origin() - DVec3::new(0.0, DELTA, 0.0)).length() < 1e-15);

        // Going through the surface
        let through = Ray::offset(head, DVec3::new(1.0, -1.0, 0.0), DVec3::Y).unwrap();
        assert!((through.origin() - DVec3::new(0.0, -DELTA, 0.0)).length() < 1e-15);

        // Tangent direction keeps the head in place
        let tangent = Ray::offset(head, DVec3::X, DVec3::Y).unwrap();
        assert_eq!(tangent.origin(), head);
    }
}
