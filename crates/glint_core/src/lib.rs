//! Glint Core - Geometry, materials, lights and scenes for ray tracing.
//!
//! This crate provides:
//!
//! - **Primitives**: `Plane`, `Sphere`, `Polygon`, `Triangle`, `Tube`, `Cylinder`
//! - **Aggregates**: the flat `Geometries` list and the `Bvh` accelerator
//! - **Shading data**: `Material`, `Surface`, and the light sources
//! - **Scene**: everything a tracer reads while rendering
//!
//! # Example
//!
//! ```
//! use glint_core::{Geometries, Intersectable, Plane, Sphere};
//! use glint_math::{DVec3, Ray};
//!
//! let geometries = Geometries::new()
//!     .with(Sphere::new(DVec3::new(0.0, 0.0, -3.0), 1.0)?)
//!     .with(Plane::new(DVec3::new(0.0, -1.0, 0.0), DVec3::Y)?);
//!
//! let ray = Ray::new(DVec3::ZERO, -DVec3::Z)?;
//! assert_eq!(geometries.find_intersections(&ray).len(), 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod bvh;
pub mod cylinder;
pub mod error;
pub mod intersectable;
pub mod light;
pub mod material;
pub mod plane;
pub mod polygon;
mod radial;
pub mod scene;
pub mod sphere;
pub mod triangle;
pub mod tube;

// Re-export commonly used types
pub use bvh::{Bvh, BvhNode};
pub use cylinder::Cylinder;
pub use error::{GeometryError, GeometryResult};
pub use intersectable::{Geometries, Geometry, Intersectable, Intersection};
pub use light::{AmbientLight, DirectionalLight, LightArea, LightSource, PointLight, SpotLight};
pub use material::{Material, Surface};
pub use plane::Plane;
pub use polygon::Polygon;
pub use scene::Scene;
pub use sphere::Sphere;
pub use triangle::Triangle;
pub use tube::Tube;
