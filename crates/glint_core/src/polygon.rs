//! Convex planar polygon primitive.
//!
//! A ray is first intersected with the polygon's supporting plane, then the
//! hit is accepted only if it lies on the same side of every edge.

use glint_math::{align_zero, Aabb, Color, DVec3, Ray};

use crate::{
    error::{GeometryError, GeometryResult},
    intersectable::{hits_at, Geometry, Intersectable, Intersection},
    material::{Material, Surface},
    plane::Plane,
};

/// A convex polygon with at least three coplanar vertices.
#[derive(Debug, Clone)]
pub struct Polygon {
    vertices: Vec<DVec3>,
    plane: Plane,
    surface: Surface,
    bbox: Aabb,
}

impl Polygon {
    /// Create a polygon from vertices given in order around its boundary.
    ///
    /// Fails if there are fewer than three vertices, if the first three are
    /// identical or collinear, if any vertex is off their plane, or if the
    /// outline is not strictly convex.
    pub fn new(vertices: Vec<DVec3>) -> GeometryResult<Self> {
        if vertices.len() < 3 {
            return Err(GeometryError::TooFewVertices(vertices.len()));
        }

        let plane = Plane::from_points(vertices[0], vertices[1], vertices[2])?;
        let normal = plane.normal();

        for (i, v) in vertices.iter().enumerate().skip(3) {
            if align_zero(normal.dot(*v - vertices[0])) != 0.0 {
                return Err(GeometryError::NotCoplanar(i));
            }
        }

        // Every pair of consecutive edges must turn the same way around the
        // normal, which rules out concave outlines.
        let n = vertices.len();
        let mut orientation = None;
        for i in 0..n {
            let prev = vertices[(i + n - 1) % n];
            let curr = vertices[i];
            let next = vertices[(i + 1) % n];
            let turn = align_zero((curr - prev).cross(next - curr).dot(normal));
            if turn == 0.0 {
                return Err(GeometryError::NotConvex(i));
            }
            let positive = turn > 0.0;
            match orientation {
                None => orientation = Some(positive),
                Some(o) if o != positive => return Err(GeometryError::NotConvex(i)),
                Some(_) => {}
            }
        }

        // Star outlines turn consistently but wind more than once, leaving
        // some vertex outside an edge it is not part of.
        let inward = if orientation == Some(true) { 1.0 } else { -1.0 };
        for i in 0..n {
            let start = vertices[i];
            let edge = vertices[(i + 1) % n] - start;
            for (j, v) in vertices.iter().enumerate() {
                if j == i || j == (i + 1) % n {
                    continue;
                }
                if align_zero(edge.cross(*v - start).dot(normal)) * inward <= 0.0 {
                    return Err(GeometryError::NotConvex(j));
                }
            }
        }

        let bbox = Aabb::enclosing(&vertices);
        Ok(Self {
            vertices,
            plane,
            surface: Surface::default(),
            bbox,
        })
    }

    /// Create a triangle.
    pub fn triangle(a: DVec3, b: DVec3, c: DVec3) -> GeometryResult<Self> {
        Self::new(vec![a, b, c])
    }

    pub fn with_emission(mut self, emission: Color) -> Self {
        self.surface.emission = emission;
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.surface.material = material;
        self
    }

    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// True if the ray's line passes strictly inside every edge.
    ///
    /// For each edge `(p_i, p_i+1)` the sign of `d · ((p_i - o) x (p_i+1 - o))`
    /// is taken; all signs must agree and none may be zero (a ray through an
    /// edge or vertex is a miss).
    fn inside_edges(&self, ray: &Ray) -> bool {
        let origin = ray.origin();
        let direction = ray.direction();
        let n = self.vertices.len();

        let mut orientation = None;
        for i in 0..n {
            let v1 = self.vertices[i] - origin;
            let v2 = self.vertices[(i + 1) % n] - origin;
            let side = align_zero(direction.dot(v1.cross(v2)));
            if side == 0.0 {
                return false;
            }
            let positive = side > 0.0;
            match orientation {
                None => orientation = Some(positive),
                Some(o) if o != positive => return false,
                Some(_) => {}
            }
        }
        true
    }
}

impl Intersectable for Polygon {
    fn intersect<'a>(&'a self, ray: &Ray, max_distance: f64) -> Vec<Intersection<'a>> {
        let Some(t) = self.plane.crossing(ray) else {
            return Vec::new();
        };
        if !self.inside_edges(ray) {
            return Vec::new();
        }
        hits_at(self, ray, max_distance, [t])
    }

    fn bounding_box(&self) -> Option<Aabb> {
        Some(self.bbox)
    }
}

impl Geometry for Polygon {
    fn normal_at(&self, _point: DVec3) -> DVec3 {
        self.plane.normal()
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

    fn unit_square() -> Polygon {
        Polygon::new(vec![
            DVec3::new(0.0, 0.0, 1.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
            DVec3::new(-1.0, 1.0, 1.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_polygon_construction() {
        // Convex quadrangle with vertices in order
        assert_eq!(unit_square().vertices().len(), 4);

        // Vertices in wrong order
        assert!(matches!(
            Polygon::new(vec![
                DVec3::new(0.0, 0.0, 1.0),
                DVec3::new(0.0, 1.0, 0.0),
                DVec3::new(1.0, 0.0, 0.0),
                DVec3::new(-1.0, 1.0, 1.0),
            ]),
            Err(GeometryError::NotConvex(_))
        ));

        // Vertex off the plane
        assert_eq!(
            Polygon::new(vec![
                DVec3::new(0.0, 0.0, 1.0),
                DVec3::new(1.0, 0.0, 0.0),
                DVec3::new(0.0, 1.0, 0.0),
                DVec3::new(0.0, 2.0, 2.0),
            ])
            .unwrap_err(),
            GeometryError::NotCoplanar(3)
        );

        // Too few vertices
        assert_eq!(
            Polygon::new(vec![DVec3::ZERO, DVec3::X]).unwrap_err(),
            GeometryError::TooFewVertices(2)
        );
    }

    #[test]
    fn test_polygon_degenerate_vertices() {
        // Vertex on a side of the quadrangle
        assert!(Polygon::new(vec![
            DVec3::new(0.0, 0.0, 1.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
            DVec3::new(0.0, 0.5, 0.5),
        ])
        .is_err());

        // Repeated vertex
        assert!(Polygon::new(vec![
            DVec3::new(0.0, 0.0, 1.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
        ])
        .is_err());
    }

    #[test]
    fn test_star_outline_is_rejected() {
        let corner = |k: usize| {
            let angle = k as f64 * std::f64::consts::TAU / 5.0;
            DVec3::new(angle.cos(), angle.sin(), 0.0)
        };

        let pentagon = Polygon::new((0..5).map(corner).collect()).unwrap();
        assert_eq!(
            pentagon
                .find_intersections(&ray(DVec3::new(0.75, 0.0, 1.0), -DVec3::Z))
                .len(),
            1
        );

        // Same corners visited every other one: each turn has the same sign
        let pentagram = [0, 2, 4, 1, 3].into_iter().map(corner).collect();
        assert!(matches!(
            Polygon::new(pentagram),
            Err(GeometryError::NotConvex(_))
        ));
    }

    #[test]
    fn test_polygon_normal() {
        let polygon = unit_square();
        let n = polygon.normal_at(DVec3::new(0.0, 0.0, 1.0));
        let expected = DVec3::new(1.0, 1.0, 1.0) / 3f64.sqrt();

        assert!((n.length() - 1.0).abs() < 1e-9);
        // Normal of the plane, either orientation
        assert!((n - expected).length() < 1e-9 || (n + expected).length() < 1e-9);
    }

    #[test]
    fn test_triangle_inside() {
        let triangle = Polygon::triangle(
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(2.0, 0.0, 0.0),
            DVec3::new(0.0, 2.0, 0.0),
        )
        .unwrap();

        let points = triangle.find_intersections(&ray(DVec3::new(0.5, 0.5, -1.0), DVec3::Z));
        assert_eq!(points, vec![DVec3::new(0.5, 0.5, 0.0)]);
    }

    #[test]
    fn test_triangle_outside_against_edge() {
        let triangle = Polygon::triangle(
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(2.0, 0.0, 0.0),
            DVec3::new(0.0, 2.0, 0.0),
        )
        .unwrap();

        // In front of the hypotenuse
        assert!(triangle
            .find_intersections(&ray(DVec3::new(1.5, 1.5, -1.0), DVec3::Z))
            .is_empty());
        // In front of a vertex
        assert!(triangle
            .find_intersections(&ray(DVec3::new(-1.0, -1.0, -1.0), DVec3::Z))
            .is_empty());
    }

    #[test]
    fn test_triangle_boundary_is_miss() {
        let triangle = Polygon::triangle(
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(2.0, 0.0, 0.0),
            DVec3::new(0.0, 2.0, 0.0),
        )
        .unwrap();

        // On an edge
        assert!(triangle
            .find_intersections(&ray(DVec3::new(1.0, 0.0, -1.0), DVec3::Z))
            .is_empty());
        // On a vertex
        assert!(triangle
            .find_intersections(&ray(DVec3::new(2.0, 0.0, -1.0), DVec3::Z))
            .is_empty());
        // On an edge's continuation
        assert!(triangle
            .find_intersections(&ray(DVec3::new(3.0, 0.0, -1.0), DVec3::Z))
            .is_empty());
    }

    #[test]
    fn test_square_hit() {
        let square = Polygon::new(vec![
            DVec3::new(-1.0, -1.0, 2.0),
            DVec3::new(1.0, -1.0, 2.0),
            DVec3::new(1.0, 1.0, 2.0),
            DVec3::new(-1.0, 1.0, 2.0),
        ])
        .unwrap();

        let hits = square.intersect(&ray(DVec3::ZERO, DVec3::new(0.2, 0.3, 1.0)), f64::INFINITY);
        assert_eq!(hits.len(), 1);
        assert!((hits[0].point.z - 2.0).abs() < 1e-12);
        assert!(square.bounding_box().is_some());
    }
}
