//! Sphere primitive for ray tracing.

use glint_math::{align_zero, Aabb, Color, DVec3, Ray};

use crate::{
    error::{GeometryError, GeometryResult},
    intersectable::{hits_at, Geometry, Intersectable, Intersection},
    material::{Material, Surface},
};

/// A sphere primitive.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: DVec3,
    radius: f64,
    surface: Surface,
    bbox: Aabb,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: DVec3, radius: f64) -> GeometryResult<Self> {
        if align_zero(radius) <= 0.0 {
            return Err(GeometryError::NonPositiveRadius(radius));
        }

        let rvec = DVec3::splat(radius);
        Ok(Self {
            center,
            radius,
            surface: Surface::default(),
            bbox: Aabb::from_points(center - rvec, center + rvec),
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

    pub fn center(&self) -> DVec3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Ray parameters where the ray's line meets the sphere.
    ///
    /// Projects the center onto the ray (`tm`) and measures the distance from
    /// the center to the line (`d`). A tangent line counts as a miss.
    fn roots(&self, ray: &Ray) -> Vec<f64> {
        let u = self.center - ray.origin();
        if u == DVec3::ZERO {
            return vec![self.radius];
        }

        let tm = ray.direction().dot(u);
        let d_squared = (u.length_squared() - tm * tm).max(0.0);
        let r_squared = self.radius * self.radius;
        if align_zero(d_squared.sqrt() - self.radius) >= 0.0 {
            return Vec::new();
        }

        let th = (r_squared - d_squared).sqrt();
        vec![tm - th, tm + th]
    }
}

impl Intersectable for Sphere {
    fn intersect<'a>(&'a self, ray: &Ray, max_distance: f64) -> Vec<Intersection<'a>> {
        hits_at(self, ray, max_distance, self.roots(ray))
    }

    fn bounding_box(&self) -> Option<Aabb> {
        Some(self.bbox)
    }
}

impl Geometry for Sphere {
    fn normal_at(&self, point: DVec3) -> DVec3 {
        (point - self.center) / self.radius
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }
}
