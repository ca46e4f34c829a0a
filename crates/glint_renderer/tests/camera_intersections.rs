//! Counts of intersections between a 3x3 camera's pixel rays and single
//! geometries placed in front of, around and behind the view plane.

use glint_core::{Intersectable, Plane, Sphere, Triangle};
use glint_math::DVec3;
use glint_renderer::Camera;

fn camera_at(location: DVec3) -> Camera {
    Camera::builder()
        .with_location(location)
        .with_direction(-DVec3::Z, DVec3::Y)
        .with_vp_size(3.0, 3.0)
        .with_vp_distance(1.0)
        .with_resolution(3, 3)
        .build()
        .unwrap()
}

fn count_intersections(camera: &Camera, geometry: &dyn Intersectable) -> usize {
    let mut count = 0;
    for row in 0..3 {
        for col in 0..3 {
            count += geometry
                .find_intersections(&camera.construct_ray(col, row))
                .len();
        }
    }
    count
}

#[test]
fn test_camera_sphere_intersections() {
    let front = camera_at(DVec3::ZERO);
    let close = camera_at(DVec3::new(0.0, 0.0, 0.5));

    // View plane in front of a small sphere
    let sphere = Sphere::new(DVec3::new(0.0, 0.0, -3.0), 1.0).unwrap();
    assert_eq!(count_intersections(&front, &sphere), 2);

    // View plane inside a big sphere
    let sphere = Sphere::new(DVec3::new(0.0, 0.0, -2.5), 2.5).unwrap();
    assert_eq!(count_intersections(&close, &sphere), 18);

    // View plane inside a medium sphere, corners miss
    let sphere = Sphere::new(DVec3::new(0.0, 0.0, -2.0), 2.0).unwrap();
    assert_eq!(count_intersections(&close, &sphere), 10);

    // Camera inside the sphere
    let sphere = Sphere::new(DVec3::new(0.0, 0.0, -2.0), 4.0).unwrap();
    assert_eq!(count_intersections(&close, &sphere), 9);

    // Sphere behind the camera
    let sphere = Sphere::new(DVec3::new(0.0, 0.0, 1.0), 0.5).unwrap();
    assert_eq!(count_intersections(&close, &sphere), 0);
}

#[test]
fn test_camera_plane_intersections() {
    let camera = camera_at(DVec3::new(0.0, 0.0, 1.0));

    // Parallel to the view plane
    let plane = Plane::from_points(
        DVec3::new(0.0, 5.0, -2.0),
        DVec3::new(1.0, -3.0, -2.0),
        DVec3::new(5.0, -3.0, -2.0),
    )
    .unwrap();
    assert_eq!(count_intersections(&camera, &plane), 9);

    // Slightly tilted
    let plane = Plane::from_points(
        DVec3::new(0.0, 5.0, 0.0),
        DVec3::new(1.0, -3.0, -2.0),
        DVec3::new(5.0, -3.0, -2.0),
    )
    .unwrap();
    assert_eq!(count_intersections(&camera, &plane), 9);

    // Steeply tilted, the bottom row runs parallel or away
    let plane = Plane::from_points(
        DVec3::new(0.0, 0.0, -2.0),
        DVec3::new(0.0, -2.0, -4.0),
        DVec3::new(-2.0, 0.0, -2.0),
    )
    .unwrap();
    assert_eq!(count_intersections(&camera, &plane), 6);
}

#[test]
fn test_camera_triangle_intersections() {
    let camera = camera_at(DVec3::new(0.0, 0.0, 1.0));

    // Small triangle, only the center pixel
    let triangle = Triangle::new(
        DVec3::new(0.0, 1.0, -2.0),
        DVec3::new(1.0, -1.0, -2.0),
        DVec3::new(-1.0, -1.0, -2.0),
    )
    .unwrap();
    assert_eq!(count_intersections(&camera, &triangle), 1);

    // Tall triangle, the center and top-middle pixels
    let triangle = Triangle::new(
        DVec3::new(0.0, 20.0, -2.0),
        DVec3::new(1.0, -1.0, -2.0),
        DVec3::new(-1.0, -1.0, -2.0),
    )
    .unwrap();
    assert_eq!(count_intersections(&camera, &triangle), 2);
}
