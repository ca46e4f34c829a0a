//! Glint Renderer - CPU recursive ray tracing.
//!
//! A Whitted-style ray tracer with Phong shading, hard and soft shadows,
//! mirror reflection and transparency, supersampling, and a rayon-based
//! pixel scheduler.
//!
//! # Example
//!
//! ```no_run
//! use glint_core::{Geometries, PointLight, Scene, Sphere};
//! use glint_math::{Color, DVec3};
//! use glint_renderer::{render, Camera, SimpleRayTracer};
//!
//! let scene = Scene::new("example")
//!     .with_geometries(Geometries::new().with(Sphere::new(DVec3::new(0.0, 0.0, -5.0), 1.0)?))
//!     .with_light(PointLight::new(Color::ONE, DVec3::new(2.0, 2.0, 0.0)));
//!
//! let camera = Camera::builder()
//!     .with_location(DVec3::ZERO)
//!     .with_direction(-DVec3::Z, DVec3::Y)
//!     .with_vp_distance(1.0)
//!     .with_vp_size(1.0, 1.0)
//!     .with_resolution(200, 200)
//!     .build()?;
//!
//! let image = render(&camera, &SimpleRayTracer::new(&scene));
//! image.save_png("example.png")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod bucket;
mod camera;
mod error;
mod image_buffer;
mod renderer;
mod sampling;
mod settings;
mod tracer;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::{Camera, CameraBuilder};
pub use error::{CameraError, RenderError, RenderResult};
pub use image_buffer::{color_to_rgba, ImageBuffer};
pub use renderer::{render, render_with_progress, Parallelism, ProgressFn};
pub use sampling::{concentric_disc, SamplingConfig, SamplingPattern, TargetShape};
pub use settings::RenderSettings;
pub use tracer::{SimpleRayTracer, TraceSettings, Tracer};
