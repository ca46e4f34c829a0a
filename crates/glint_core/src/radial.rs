//! Shared math for shapes built around an axis (tubes and cylinders).

use glint_math::{align_zero, is_zero, DVec3, Ray};

/// Component of `v` perpendicular to the unit `axis`.
#[inline]
pub(crate) fn radial_component(v: DVec3, axis: DVec3) -> DVec3 {
    v - axis * v.dot(axis)
}

/// Signed coordinate of `point` along an axis, measured from its origin.
#[inline]
pub(crate) fn axis_coordinate(point: DVec3, axis: &Ray) -> f64 {
    (point - axis.origin()).dot(axis.direction())
}

/// Ray parameters where `ray` meets the infinite tube of `radius` around `axis`.
///
/// Both the direction and the origin offset are projected onto the plane
/// perpendicular to the axis, leaving a circle intersection in that plane.
/// Rays parallel to the axis and tangent rays give no roots.
pub(crate) fn lateral_roots(ray: &Ray, axis: &Ray, radius: f64) -> Vec<f64> {
    let v = axis.direction();
    let dr = radial_component(ray.direction(), v);
    let a = dr.length_squared();
    if is_zero(a) {
        return Vec::new();
    }

    let delta = radial_component(ray.origin() - axis.origin(), v);
    let b = 2.0 * dr.dot(delta);
    let c = delta.length_squared() - radius * radius;

    let discriminant = b * b - 4.0 * a * c;
    if align_zero(discriminant) <= 0.0 {
        return Vec::new();
    }

    let sqrt_d = discriminant.sqrt();
    vec![(-b - sqrt_d) / (2.0 * a), (-b + sqrt_d) / (2.0 * a)]
}

/// Outward unit normal of a tube around `axis` at a point on its surface.
pub(crate) fn lateral_normal(point: DVec3, axis: &Ray) -> DVec3 {
    let foot = axis.at(axis_coordinate(point, axis));
    (point - foot).normalize_or_zero()
}
