//! Camera for ray generation.
//!
//! The camera sits at `location` looking along `to`, with a view plane
//! `distance` units ahead. The view plane is `width x height` scene units and
//! is divided into `nx x ny` pixels; rows run top to bottom, against `up`.

use glint_math::{align_zero, is_zero, Color, DVec3, DVec3Ext, Ray};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::{
    error::CameraError,
    renderer::Parallelism,
    sampling::{SamplingConfig, TargetShape},
    tracer::Tracer,
};

/// Camera for generating rays into the scene.
///
/// Immutable once built; create one with [`Camera::builder`].
#[derive(Debug, Clone)]
pub struct Camera {
    location: DVec3,
    to: DVec3,
    up: DVec3,
    right: DVec3,

    // View plane
    distance: f64,
    width: f64,
    height: f64,

    // Image settings
    nx: u32,
    ny: u32,
    sampling: SamplingConfig,
    parallelism: Parallelism,
    progress_interval: f64,
}

impl Camera {
    pub fn builder() -> CameraBuilder {
        CameraBuilder::default()
    }

    pub fn location(&self) -> DVec3 {
        self.location
    }

    /// Unit `(to, up, right)` axes.
    pub fn axes(&self) -> (DVec3, DVec3, DVec3) {
        (self.to, self.up, self.right)
    }

    /// Image resolution `(nx, ny)` in pixels.
    pub fn resolution(&self) -> (u32, u32) {
        (self.nx, self.ny)
    }

    pub fn sampling(&self) -> &SamplingConfig {
        &self.sampling
    }

    pub fn parallelism(&self) -> Parallelism {
        self.parallelism
    }

    /// Percent of pixels between progress log lines; 0 disables them.
    pub fn progress_interval(&self) -> f64 {
        self.progress_interval
    }

    /// Size of one pixel on the view plane.
    fn pixel_size(&self) -> (f64, f64) {
        (self.width / self.nx as f64, self.height / self.ny as f64)
    }

    /// Center of pixel (col, row) on the view plane.
    fn pixel_center(&self, col: u32, row: u32) -> DVec3 {
        let pc = self.location + self.to * self.distance;
        let (rx, ry) = self.pixel_size();

        let x = (col as f64 - (self.nx as f64 - 1.0) / 2.0) * rx;
        let y = -(row as f64 - (self.ny as f64 - 1.0) / 2.0) * ry;

        let mut p = pc;
        if !is_zero(x) {
            p += self.right * x;
        }
        if !is_zero(y) {
            p += self.up * y;
        }
        p
    }

    fn ray_through(&self, point: DVec3) -> Ray {
        // The view plane lies `distance > 0` ahead, so the direction is never zero
        Ray::from_unit(self.location, (point - self.location).normalize())
    }

    /// Construct the ray from the camera through the center of pixel (col, row).
    pub fn construct_ray(&self, col: u32, row: u32) -> Ray {
        self.ray_through(self.pixel_center(col, row))
    }

    /// All supersampling rays for pixel (col, row).
    ///
    /// Jittered offsets come from an RNG seeded with the pixel index, so a
    /// render is reproducible regardless of scheduling.
    pub fn pixel_rays(&self, col: u32, row: u32) -> Vec<Ray> {
        let center = self.pixel_center(col, row);
        if self.sampling.sample_count() == 1 {
            return vec![self.ray_through(center)];
        }

        let seed = row as u64 * self.nx as u64 + col as u64;
        let mut rng = StdRng::seed_from_u64(seed);

        let (rx, ry) = self.pixel_size();
        let (sx, sy) = match self.sampling.target {
            TargetShape::Rectangle => (rx, ry),
            // Disc inscribed in the pixel
            TargetShape::Disc => (rx * 0.5, ry * 0.5),
        };

        self.sampling
            .offsets(&mut rng)
            .into_iter()
            .map(|o| self.ray_through(center + self.right * (o.x * sx) + self.up * (o.y * sy)))
            .collect()
    }

    /// Color of pixel (col, row): the mean over its sample rays.
    pub fn render_pixel(&self, tracer: &dyn Tracer, col: u32, row: u32) -> Color {
        let rays = self.pixel_rays(col, row);
        let sum = rays.iter().fold(Color::ZERO, |acc, ray| acc + tracer.trace_ray(ray));
        sum / rays.len() as f64
    }
}

/// Direction given explicitly or by a point to look at.
#[derive(Debug, Clone, Copy)]
enum Orientation {
    Axes { to: DVec3, up: DVec3 },
    Target { target: DVec3, up: DVec3 },
}

/// Builder validating camera settings once in [`CameraBuilder::build`].
#[derive(Debug, Clone)]
pub struct CameraBuilder {
    location: Option<DVec3>,
    orientation: Option<Orientation>,
    distance: Option<f64>,
    size: Option<(f64, f64)>,
    resolution: (u32, u32),
    sampling: SamplingConfig,
    parallelism: Parallelism,
    progress_interval: f64,
}

impl Default for CameraBuilder {
    fn default() -> Self {
        Self {
            location: None,
            orientation: None,
            distance: None,
            size: None,
            resolution: (1, 1),
            sampling: SamplingConfig::default(),
            parallelism: Parallelism::default(),
            progress_interval: 0.0,
        }
    }
}

impl CameraBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set camera position.
    pub fn with_location(mut self, location: DVec3) -> Self {
        self.location = Some(location);
        self
    }

    /// Look along `to`, with `up` orthogonal to it.
    pub fn with_direction(mut self, to: DVec3, up: DVec3) -> Self {
        self.orientation = Some(Orientation::Axes { to, up });
        self
    }

    /// Look at `target`; `up` only needs to be non-parallel to the view
    /// direction and is re-orthogonalized.
    pub fn with_target(mut self, target: DVec3, up: DVec3) -> Self {
        self.orientation = Some(Orientation::Target { target, up });
        self
    }

    /// Look at `target` with +Y as the up hint.
    pub fn with_look_at(self, target: DVec3) -> Self {
        self.with_target(target, DVec3::Y)
    }

    /// Set distance from the camera to the view plane.
    pub fn with_vp_distance(mut self, distance: f64) -> Self {
        self.distance = Some(distance);
        self
    }

    /// Set view plane size in scene units.
    pub fn with_vp_size(mut self, width: f64, height: f64) -> Self {
        self.size = Some((width, height));
        self
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, nx: u32, ny: u32) -> Self {
        self.resolution = (nx, ny);
        self
    }

    pub fn with_sampling(mut self, sampling: SamplingConfig) -> Self {
        self.sampling = sampling;
        self
    }

    pub fn with_parallelism(mut self, parallelism: Parallelism) -> Self {
        self.parallelism = parallelism;
        self
    }

    /// Log render progress every `percent` percent of pixels.
    pub fn with_progress_interval(mut self, percent: f64) -> Self {
        self.progress_interval = percent;
        self
    }

    fn axes(&self, location: DVec3) -> Result<(DVec3, DVec3, DVec3), CameraError> {
        match self.orientation.ok_or(CameraError::Missing("direction"))? {
            Orientation::Axes { to, up } => {
                let to = to.try_unit()?;
                let up = up.try_unit()?;
                if !is_zero(to.dot(up)) {
                    return Err(CameraError::NotOrthogonal);
                }
                Ok((to, up, to.cross(up)))
            }
            Orientation::Target { target, up } => {
                let to = target - location;
                let right = to.cross(up);
                let up = right.cross(to);
                Ok((to.try_unit()?, up.try_unit()?, right.try_unit()?))
            }
        }
    }

    /// Validate the settings and create the camera.
    pub fn build(self) -> Result<Camera, CameraError> {
        let location = self.location.ok_or(CameraError::Missing("location"))?;
        let (to, up, right) = self.axes(location)?;

        let distance = self.distance.ok_or(CameraError::Missing("vp_distance"))?;
        if align_zero(distance) <= 0.0 {
            return Err(CameraError::NonPositive("vp_distance"));
        }

        let (width, height) = self.size.ok_or(CameraError::Missing("vp_size"))?;
        if align_zero(width) <= 0.0 {
            return Err(CameraError::NonPositive("width"));
        }
        if align_zero(height) <= 0.0 {
            return Err(CameraError::NonPositive("height"));
        }

        let (nx, ny) = self.resolution;
        if nx == 0 || ny == 0 {
            return Err(CameraError::InvalidResolution);
        }

        log::debug!(
            "Camera at {:?} looking {:?} (up {:?}), view plane {}x{} at {}, {}x{} pixels, {} samples",
            location,
            to,
            up,
            width,
            height,
            distance,
            nx,
            ny,
            self.sampling.sample_count()
        );

        Ok(Camera {
            location,
            to,
            up,
            right,
            distance,
            width,
            height,
            nx,
            ny,
            sampling: self.sampling,
            parallelism: self.parallelism,
            progress_interval: self.progress_interval.max(0.0),
        })
    }
}
