//! Finite cylinder primitive: a tube segment closed by two caps.

use glint_math::{align_zero, is_zero, Aabb, Color, DVec3, Ray};

use crate::{
    error::{GeometryError, GeometryResult},
    intersectable::{hits_at, Geometry, Intersectable, Intersection},
    material::{Material, Surface},
    plane::Plane,
    radial,
};

/// A closed cylinder standing on the origin of its axis ray.
///
/// The base cap is centered at the axis origin and the top cap `height`
/// units along the axis direction.
#[derive(Debug, Clone)]
pub struct Cylinder {
    axis: Ray,
    radius: f64,
    height: f64,
    base: Plane,
    top: Plane,
    surface: Surface,
    bbox: Aabb,
}

impl Cylinder {
    pub fn new(axis: Ray, radius: f64, height: f64) -> GeometryResult<Self> {
        if align_zero(radius) <= 0.0 {
            return Err(GeometryError::NonPositiveRadius(radius));
        }
        if align_zero(height) <= 0.0 {
            return Err(GeometryError::NonPositiveHeight(height));
        }

        let v = axis.direction();
        let bottom = axis.origin();
        let top_center = axis.at(height);
        let base = Plane::new(bottom, -v)?;
        let top = Plane::new(top_center, v)?;

        // Half extent of a cap disc along each world axis
        let extent = DVec3::new(
            (1.0 - v.x * v.x).max(0.0).sqrt(),
            (1.0 - v.y * v.y).max(0.0).sqrt(),
            (1.0 - v.z * v.z).max(0.0).sqrt(),
        ) * radius;
        let bbox = Aabb::from_points(
            bottom.min(top_center) - extent,
            bottom.max(top_center) + extent,
        );

        Ok(Self {
            axis,
            radius,
            height,
            base,
            top,
            surface: Surface::default(),
            bbox,
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

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Crossing of a cap plane that lands on the disc, rim included.
    fn cap_root(&self, cap: &Plane, ray: &Ray) -> Option<f64> {
        let t = cap.crossing(ray)?;
        let from_center = ray.at(t) - cap.point();
        (align_zero(from_center.length_squared() - self.radius * self.radius) <= 0.0).then_some(t)
    }

    fn roots(&self, ray: &Ray) -> Vec<f64> {
        let mut roots: Vec<f64> = radial::lateral_roots(ray, &self.axis, self.radius)
            .into_iter()
            .filter(|&t| {
                let s = radial::axis_coordinate(ray.at(t), &self.axis);
                align_zero(s) > 0.0 && align_zero(s - self.height) < 0.0
            })
            .collect();

        roots.extend(self.cap_root(&self.base, ray));
        roots.extend(self.cap_root(&self.top, ray));
        roots
    }
}

impl Intersectable for Cylinder {
    fn intersect<'a>(&'a self, ray: &Ray, max_distance: f64) -> Vec<Intersection<'a>> {
        hits_at(self, ray, max_distance, self.roots(ray))
    }

    fn bounding_box(&self) -> Option<Aabb> {
        Some(self.bbox)
    }
}

impl Geometry for Cylinder {
    fn normal_at(&self, point: DVec3) -> DVec3 {
        let s = radial::axis_coordinate(point, &self.axis);
        if is_zero(s) {
            self.base.normal()
        } else if is_zero(s - self.height) {
            self.top.normal()
        } else {
            radial::lateral_normal(point, &self.axis)
        }
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }
}
