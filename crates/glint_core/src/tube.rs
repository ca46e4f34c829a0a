//! Infinite tube primitive.

use glint_math::{align_zero, Aabb, Color, DVec3, Ray};

use crate::{
    error::{GeometryError, GeometryResult},
    intersectable::{hits_at, Geometry, Intersectable, Intersection},
    material::{Material, Surface},
    radial,
};

/// An infinite circular tube around an axis ray.
#[derive(Debug, Clone)]
pub struct Tube {
    axis: Ray,
    radius: f64,
    surface: Surface,
}

impl Tube {
    pub fn new(axis: Ray, radius: f64) -> GeometryResult<Self> {
        if align_zero(radius) <= 0.0 {
            return Err(GeometryError::NonPositiveRadius(radius));
        }
        Ok(Self {
            axis,
            radius,
            surface: Surface::default(),
        })
    }

    pub fn with_emission(mut self, emission: Color) -> Self {
        self.surface.emission = emission;
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.surface.material = material;
        self
    }

    pub fn axis(&self) -> &Ray {
        &self.axis
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Intersectable for Tube {
    fn intersect<'a>(&'a self, ray: &Ray, max_distance: f64) -> Vec<Intersection<'a>> {
        hits_at(
            self,
            ray,
            max_distance,
            radial::lateral_roots(ray, &self.axis, self.radius),
        )
    }

    fn bounding_box(&self) -> Option<Aabb> {
        None
    }
}

impl Geometry for Tube {
    fn normal_at(&self, point: DVec3) -> DVec3 {
        radial::lateral_normal(point, &self.axis)
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ray(origin: DVec3, direction: DVec3) -> Ray {
        Ray::new(origin, direction).unwrap()
    }

    fn tube() -> Tube {
        // Radius 1 around the Z axis
        Tube::new(ray(DVec3::ZERO, DVec3::Z), 1.0).unwrap()
    }

    #[test]
    fn test_non_positive_radius() {
        assert_eq!(
            Tube::new(ray(DVec3::ZERO, DVec3::Z), 0.0).unwrap_err(),
            GeometryError::NonPositiveRadius(0.0)
        );
    }

    #[test]
    fn test_normal() {
        let n = tube().normal_at(DVec3::new(0.6, 0.8, -3.0));
        assert!((n - DVec3::new(0.6, 0.8, 0.0)).length() < 1e-12);
        assert!((n.length() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_ray_crosses_tube() {
        let r = ray(DVec3::new(-2.0, 0.0, 0.0), DVec3::new(1.0, 0.0, 1.0));
        let tube = tube();
        let mut hits = tube.intersect(&r, f64::INFINITY);
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));

        assert_eq!(hits.len(), 2);
        assert!((hits[0].point - DVec3::new(-1.0, 0.0, 1.0)).length() < 1e-9);
        assert!((hits[1].point - DVec3::new(1.0, 0.0, 3.0)).length() < 1e-9);
    }

    #[test]
    fn test_ray_from_inside() {
        let r = ray(DVec3::ZERO, DVec3::new(0.0, 1.0, 1.0));
        let points = tube().find_intersections(&r);

        assert_eq!(points.len(), 1);
        assert!((points[0] - DVec3::new(0.0, 1.0, 1.0)).length() < 1e-9);
    }

    #[test]
    fn test_ray_parallel_to_axis() {
        // Inside, on the surface and outside
        for x in [0.5, 1.0, 2.0] {
            let r = ray(DVec3::new(x, 0.0, 0.0), DVec3::Z);
            assert!(tube().find_intersections(&r).is_empty());
        }
    }

    #[test]
    fn test_ray_misses_and_tangent() {
        assert!(tube()
            .find_intersections(&ray(DVec3::new(-2.0, 3.0, 0.0), DVec3::X))
            .is_empty());
        assert!(tube()
            .find_intersections(&ray(DVec3::new(-2.0, 1.0, 0.0), DVec3::X))
            .is_empty());
    }

    #[test]
    fn test_unbounded() {
        assert!(tube().bounding_box().is_none());
    }
}
