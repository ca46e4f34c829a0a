//! Infinite plane primitive.

use glint_math::{is_zero, Aabb, Color, DVec3, DVec3Ext, Ray};

use crate::{
    error::{GeometryError, GeometryResult},
    intersectable::{hits_at, Geometry, Intersectable, Intersection},
    material::{Material, Surface},
};

/// An infinite plane given by a point on it and a unit normal.
#[derive(Debug, Clone)]
pub struct Plane {
    point: DVec3,
    normal: DVec3,
    surface: Surface,
}

impl Plane {
    /// Create a plane through `point` with the given normal (normalized here).
    pub fn new(point: DVec3, normal: DVec3) -> GeometryResult<Self> {
        Ok(Self {
            point,
            normal: normal.try_unit()?,
            surface: Surface::default(),
        })
    }

    /// Create the plane through three points.
    ///
    /// The normal is `normalize((p2 - p1) x (p3 - p1))`, so its side follows
    /// the winding of the points.
    pub fn from_points(p1: DVec3, p2: DVec3, p3: DVec3) -> GeometryResult<Self> {
        if p1 == p2 || p1 == p3 || p2 == p3 {
            return Err(GeometryError::IdenticalPoints);
        }

        let normal = (p2 - p1).cross(p3 - p1);
        if normal.is_zero_vector() {
            return Err(GeometryError::CollinearPoints);
        }

        Self::new(p1, normal)
    }

    pub fn with_emission(mut self, emission: Color) -> Self {
        self.surface.emission = emission;
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.surface.material = material;
        self
    }

    /// A point on the plane.
    pub fn point(&self) -> DVec3 {
        self.point
    }

    /// The plane's unit normal.
    pub fn normal(&self) -> DVec3 {
        self.normal
    }

    /// Ray parameter where the ray crosses the plane, if any.
    ///
    /// Rays parallel to the plane (including rays lying in it) and rays
    /// starting at the plane's reference point never cross it.
    pub(crate) fn crossing(&self, ray: &Ray) -> Option<f64> {
        let nd = self.normal.dot(ray.direction());
        if is_zero(nd) {
            return None;
        }

        let to_plane = self.point - ray.origin();
        if to_plane.is_zero_vector() {
            return None;
        }

        Some(self.normal.dot(to_plane) / nd)
    }
}

impl Intersectable for Plane {
    fn intersect<'a>(&'a self, ray: &Ray, max_distance: f64) -> Vec<Intersection<'a>> {
        hits_at(self, ray, max_distance, self.crossing(ray))
    }

    fn bounding_box(&self) -> Option<Aabb> {
        None
    }
}

impl Geometry for Plane {
    fn normal_at(&self, _point: DVec3) -> DVec3 {
        self.normal
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }
}
