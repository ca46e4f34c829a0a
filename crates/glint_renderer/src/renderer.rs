//! Pixel scheduler.
//!
//! Every pixel is independent, so the image is rendered with rayon either one
//! row per task or one bucket per task. Workers share the camera, tracer and
//! scene by reference and write to disjoint parts of the output.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    bucket::{generate_buckets, render_bucket, DEFAULT_BUCKET_SIZE},
    camera::Camera,
    image_buffer::ImageBuffer,
    tracer::Tracer,
};

/// How pixels are spread over threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Parallelism {
    /// Single-threaded, row by row
    None,
    /// Rows in parallel on the global rayon pool
    #[default]
    PerRow,
    /// Spiral-ordered buckets on a dedicated pool; 0 threads picks a count
    /// from the available cores
    Chunked { threads: usize },
}

/// Callback receiving the fraction of pixels finished, in `[0, 1]`.
pub type ProgressFn<'a> = &'a (dyn Fn(f64) + Sync);

/// Shared completed-pixel counter.
struct Progress<'a> {
    done: AtomicUsize,
    total: usize,
    /// Pixels between log lines; 0 disables logging
    log_step: usize,
    callback: Option<ProgressFn<'a>>,
}

impl<'a> Progress<'a> {
    fn new(total: usize, interval_percent: f64, callback: Option<ProgressFn<'a>>) -> Self {
        let log_step = if interval_percent > 0.0 {
            ((total as f64 * interval_percent / 100.0).ceil() as usize).max(1)
        } else {
            0
        };
        Self {
            done: AtomicUsize::new(0),
            total,
            log_step,
            callback,
        }
    }

    fn advance(&self, pixels: usize) {
        let before = self.done.fetch_add(pixels, Ordering::Relaxed);
        let after = before + pixels;
        let fraction = after as f64 / self.total.max(1) as f64;

        if let Some(callback) = self.callback {
            callback(fraction);
        }
        if self.log_step > 0 && before / self.log_step != after / self.log_step {
            log::info!("Rendering... {:.0}%", fraction * 100.0);
        }
    }
}

/// Number of workers for `Chunked { threads }`.
fn worker_count(threads: usize) -> usize {
    if threads > 0 {
        return threads;
    }
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    cores.saturating_sub(2).max(1)
}

/// Render the camera's view of the scene behind `tracer`.
pub fn render(camera: &Camera, tracer: &dyn Tracer) -> ImageBuffer {
    render_with_progress(camera, tracer, None)
}

/// Render, reporting progress to `progress` as pixels complete.
pub fn render_with_progress(
    camera: &Camera,
    tracer: &dyn Tracer,
    progress: Option<ProgressFn<'_>>,
) -> ImageBuffer {
    let (nx, ny) = camera.resolution();
    let mut image = ImageBuffer::new(nx, ny);
    let progress = Progress::new(image.pixels.len(), camera.progress_interval(), progress);
    let start = Instant::now();

    match camera.parallelism() {
        Parallelism::None => {
            for (row, pixels) in image.pixels.chunks_mut(nx as usize).enumerate() {
                render_row(camera, tracer, row as u32, pixels);
                progress.advance(pixels.len());
            }
        }
        Parallelism::PerRow => {
            image
                .pixels
                .par_chunks_mut(nx as usize)
                .enumerate()
                .for_each(|(row, pixels)| {
                    render_row(camera, tracer, row as u32, pixels);
                    progress.advance(pixels.len());
                });
        }
        Parallelism::Chunked { threads } => {
            render_chunked(camera, tracer, worker_count(threads), &progress, &mut image);
        }
    }

    log::info!(
        "Rendered {}x{} ({} samples/pixel, {:?}) in {:.2?}",
        nx,
        ny,
        camera.sampling().sample_count(),
        camera.parallelism(),
        start.elapsed()
    );
    image
}

fn render_row(camera: &Camera, tracer: &dyn Tracer, row: u32, pixels: &mut [glint_math::Color]) {
    for (col, pixel) in pixels.iter_mut().enumerate() {
        *pixel = camera.render_pixel(tracer, col as u32, row);
    }
}

fn render_chunked(
    camera: &Camera,
    tracer: &dyn Tracer,
    threads: usize,
    progress: &Progress<'_>,
    image: &mut ImageBuffer,
) {
    let buckets = generate_buckets(image.width, image.height, DEFAULT_BUCKET_SIZE);
    let run = || {
        buckets
            .par_iter()
            .map(|&bucket| {
                let result = render_bucket(bucket, camera, tracer);
                progress.advance(bucket.pixel_count());
                result
            })
            .collect::<Vec<_>>()
    };

    let results = match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
        Ok(pool) => {
            log::debug!("Rendering {} buckets on {} threads", buckets.len(), threads);
            pool.install(run)
        }
        Err(e) => {
            log::warn!("Failed to build a {threads}-thread pool ({e}), using the global pool");
            run()
        }
    };

    for result in results {
        let b = result.bucket;
        for (i, color) in result.pixels.into_iter().enumerate() {
            let i = i as u32;
            image.set_pixel(b.x + i % b.width, b.y + i / b.width, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracer::SimpleRayTracer;
    use glint_core::{Geometries, Material, PointLight, Scene, Sphere};
    use glint_math::{Color, DVec3};
    use std::sync::Mutex;

    fn scene() -> Scene {
        let sphere = Sphere::new(DVec3::new(0.0, 0.0, -5.0), 1.5)
            .unwrap()
            .with_emission(Color::new(0.1, 0.0, 0.0))
            .with_material(Material::new().with_kd(0.6).with_ks(0.3).with_shininess(10));
        Scene::new("scheduler")
            .with_background(Color::new(0.0, 0.0, 0.2))
            .with_geometries(Geometries::new().with(sphere))
            .with_light(PointLight::new(Color::ONE, DVec3::new(3.0, 3.0, 0.0)))
    }

    fn camera(parallelism: Parallelism) -> Camera {
        Camera::builder()
            .with_location(DVec3::ZERO)
            .with_direction(-DVec3::Z, DVec3::Y)
            .with_vp_distance(1.0)
            .with_vp_size(1.0, 1.0)
            .with_resolution(21, 13)
            .with_parallelism(parallelism)
            .build()
            .unwrap()
    }

    #[test]
    fn test_worker_count() {
        assert_eq!(worker_count(3), 3);
        assert!(worker_count(0) >= 1);
    }

    #[test]
    fn test_all_modes_render_the_same_image() {
        let scene = scene();
        let tracer = SimpleRayTracer::new(&scene);

        let reference = render(&camera(Parallelism::None), &tracer);
        for mode in [
            Parallelism::PerRow,
            Parallelism::Chunked { threads: 2 },
            Parallelism::Chunked { threads: 0 },
        ] {
            let image = render(&camera(mode), &tracer);
            assert_eq!(image.pixels, reference.pixels, "{mode:?}");
        }

        // Center hits the sphere, corner sees the background
        assert_ne!(reference.get_pixel(10, 6), scene.background);
        assert_eq!(reference.get_pixel(0, 0), scene.background);
    }

    #[test]
    fn test_progress_reaches_completion() {
        let scene = scene();
        let tracer = SimpleRayTracer::new(&scene);
        let seen = Mutex::new(Vec::new());
        let callback = |fraction: f64| seen.lock().unwrap().push(fraction);

        render_with_progress(&camera(Parallelism::PerRow), &tracer, Some(&callback));

        let seen = seen.into_inner().unwrap();
        assert_eq!(seen.len(), 13); // one report per row
        let max = seen.iter().cloned().fold(0.0, f64::max);
        assert!((max - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_parallelism_json() {
        let chunked: Parallelism = serde_json::from_str(r#"{"Chunked": {"threads": 4}}"#).unwrap();
        assert_eq!(chunked, Parallelism::Chunked { threads: 4 });
        assert_eq!(Parallelism::default(), Parallelism::PerRow);
    }
}
