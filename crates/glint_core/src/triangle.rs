//! Triangle primitive, a three-vertex convex polygon.

use glint_math::{Aabb, Color, DVec3, Ray};

use crate::{
    error::GeometryResult,
    intersectable::{Geometry, Intersectable, Intersection},
    material::{Material, Surface},
    polygon::Polygon,
};

/// A triangle primitive.
#[derive(Debug, Clone)]
pub struct Triangle(Polygon);

impl Triangle {
    /// Create a new triangle from three vertices.
    ///
    /// The face normal follows the winding `(b - a) x (c - a)`.
    pub fn new(a: DVec3, b: DVec3, c: DVec3) -> GeometryResult<Self> {
        Polygon::triangle(a, b, c).map(Self)
    }

    pub fn with_emission(self, emission: Color) -> Self {
        Self(self.0.with_emission(emission))
    }

    pub fn with_material(self, material: Material) -> Self {
        Self(self.0.with_material(material))
    }

    pub fn vertices(&self) -> [DVec3; 3] {
        let v = self.0.vertices();
        [v[0], v[1], v[2]]
    }
}

impl From<Triangle> for Polygon {
    fn from(triangle: Triangle) -> Self {
        triangle.0
    }
}

impl Intersectable for Triangle {
    fn intersect<'a>(&'a self, ray: &Ray, max_distance: f64) -> Vec<Intersection<'a>> {
        self.0.intersect(ray, max_distance)
    }

    fn bounding_box(&self) -> Option<Aabb> {
        self.0.bounding_box()
    }
}

impl Geometry for Triangle {
    fn normal_at(&self, point: DVec3) -> DVec3 {
        self.0.normal_at(point)
    }

    fn surface(&self) -> &Surface {
        self.0.surface()
    }
}
