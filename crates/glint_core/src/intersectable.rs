//! Intersectable and Geometry traits, intersection records, and the flat
//! `Geometries` aggregate.

use glint_math::{align_zero, Aabb, Color, DVec3, Interval, Ray};

use crate::material::{Material, Surface};

/// A point where a ray meets a geometry.
///
/// Borrows the geometry it was produced by, so it cannot outlive the scene
/// that is being traced.
#[derive(Clone, Copy)]
pub struct Intersection<'a> {
    /// The geometry that was hit
    pub geometry: &'a dyn Geometry,
    /// Point of intersection
    pub point: DVec3,
    /// Parameter t where the intersection occurs
    pub distance: f64,
}

impl<'a> Intersection<'a> {
    pub fn new(geometry: &'a dyn Geometry, point: DVec3, distance: f64) -> Self {
        Self {
            geometry,
            point,
            distance,
        }
    }
}

impl std::fmt::Debug for Intersection<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Intersection")
            .field("point", &self.point)
            .field("distance", &self.distance)
            .finish()
    }
}

/// Anything a ray can be tested against, including composites.
pub trait Intersectable: Send + Sync {
    /// All intersections with parameter `0 < t <= max_distance`, in no
    /// particular order. An empty result means the ray misses.
    fn intersect<'a>(&'a self, ray: &Ray, max_distance: f64) -> Vec<Intersection<'a>>;

    /// Axis-aligned bounds, or `None` for unbounded shapes (planes, tubes).
    fn bounding_box(&self) -> Option<Aabb>;

    /// Intersection points along the whole half-line.
    fn find_intersections(&self, ray: &Ray) -> Vec<DVec3> {
        self.intersect(ray, f64::INFINITY)
            .into_iter()
            .map(|hit| hit.point)
            .collect()
    }
}

/// A single shaded primitive.
pub trait Geometry: Intersectable {
    /// Unit outward normal at a point on the surface.
    fn normal_at(&self, point: DVec3) -> DVec3;

    /// Emission and material of this geometry.
    fn surface(&self) -> &Surface;

    fn emission(&self) -> Color {
        self.surface().emission
    }

    fn material(&self) -> &Material {
        &self.surface().material
    }
}

/// Turn candidate ray parameters into intersections, keeping only
/// `0 < t <= max_distance`.
pub(crate) fn hits_at<'a>(
    geometry: &'a dyn Geometry,
    ray: &Ray,
    max_distance: f64,
    candidates: impl IntoIterator<Item = f64>,
) -> Vec<Intersection<'a>> {
    let range = Interval::new(0.0, max_distance);
    candidates
        .into_iter()
        .map(align_zero)
        .filter(|&t| range.accepts(t))
        .map(|t| Intersection::new(geometry, ray.at(t), t))
        .collect()
}

/// A flat list of intersectable objects.
pub struct Geometries {
    objects: Vec<Box<dyn Intersectable>>,
    /// `None` once any unbounded child was added
    bbox: Option<Aabb>,
}

impl Geometries {
    /// Create a new empty list.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            bbox: Some(Aabb::EMPTY),
        }
    }

    /// Add an object to the list.
    pub fn add(&mut self, object: Box<dyn Intersectable>) {
        self.bbox = match (self.bbox, object.bounding_box()) {
            (Some(acc), Some(b)) => Some(Aabb::surrounding(&acc, &b)),
            _ => None,
        };
        self.objects.push(object);
    }

    /// Add an object, builder style.
    pub fn with(mut self, object: impl Intersectable + 'static) -> Self {
        self.add(Box::new(object));
        self
    }

    /// Get the number of direct children.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Rebuild the children as a bounding volume hierarchy.
    pub fn into_bvh(self) -> crate::Bvh {
        crate::Bvh::build(self.objects)
    }
}

impl Default for Geometries {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<Box<dyn Intersectable>>> for Geometries {
    fn from(objects: Vec<Box<dyn Intersectable>>) -> Self {
        let mut geometries = Self::new();
        for object in objects {
            geometries.add(object);
        }
        geometries
    }
}

impl Intersectable for Geometries {
    fn intersect<'a>(&'a self, ray: &Ray, max_distance: f64) -> Vec<Intersection<'a>> {
        let mut hits = Vec::new();
        for object in &self.objects {
            hits.extend(object.intersect(ray, max_distance));
        }
        hits
    }

    fn bounding_box(&self) -> Option<Aabb> {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Plane, Polygon, Sphere};

    fn ray(origin: DVec3, direction: DVec3) -> Ray {
        Ray::new(origin, direction).unwrap()
    }

    fn sample_geometries() -> Geometries {
        Geometries::new()
            .with(Sphere::new(DVec3::new(0.0, 0.0, 1.0), 1.0).unwrap())
            .with(
                Polygon::triangle(
                    DVec3::new(-4.0, -4.0, 0.0),
                    DVec3::new(4.0, -4.0, 0.0),
                    DVec3::new(0.0, 4.0, 0.0),
                )
                .unwrap(),
            )
            .with(Plane::new(DVec3::new(0.0, 0.0, 3.0), DVec3::Z).unwrap())
    }

    #[test]
    fn test_empty_geometries() {
        let geometries = Geometries::new();
        assert!(geometries.is_empty());
        assert!(geometries
            .find_intersections(&ray(DVec3::ZERO, DVec3::Z))
            .is_empty());
    }

    #[test]
    fn test_no_shape_hit() {
        let geometries = sample_geometries();
        let miss = ray(DVec3::new(10.0, 10.0, -1.0), DVec3::X);
        assert!(geometries.find_intersections(&miss).is_empty());
    }

    #[test]
    fn test_some_shapes_hit() {
        let geometries = sample_geometries();
        // Misses the sphere, crosses triangle and plane
        let r = ray(DVec3::new(2.0, -2.0, -1.0), DVec3::Z);
        assert_eq!(geometries.find_intersections(&r).len(), 2);
    }

    #[test]
    fn test_all_shapes_hit() {
        let geometries = sample_geometries();
        let r = ray(DVec3::new(0.0, 0.0, -1.0), DVec3::Z);
        // Triangle at z=0, sphere at z=0 and z=2, plane at z=3
        assert_eq!(geometries.find_intersections(&r).len(), 4);
    }

    #[test]
    fn test_max_distance_filters_hits() {
        let geometries = sample_geometries();
        let r = ray(DVec3::new(0.0, 0.0, -1.0), DVec3::Z);
        // Only the triangle and the sphere's entry point lie within 1.0
        assert_eq!(geometries.intersect(&r, 1.0).len(), 2);
    }

    #[test]
    fn test_bounding_box_tracks_unbounded_children() {
        let bounded = Geometries::new().with(Sphere::new(DVec3::ZERO, 1.0).unwrap());
        assert!(bounded.bounding_box().is_some());
        assert!(sample_geometries().bounding_box().is_none());
    }

    #[test]
    fn test_hits_at_excludes_origin_and_far_hits() {
        let sphere = Sphere::new(DVec3::ZERO, 1.0).unwrap();
        let r = ray(DVec3::ZERO, DVec3::X);
        let hits = hits_at(&sphere, &r, 2.0, [-1.0, 0.0, 1e-12, 1.0, 2.0, 3.0]);
        let distances: Vec<f64> = hits.iter().map(|h| h.distance).collect();
        assert_eq!(distances, vec![1.0, 2.0]);
    }
}
