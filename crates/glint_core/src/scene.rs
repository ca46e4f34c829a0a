//! Scene description for ray tracing.
//!
//! A scene is read-only while rendering, so it can be shared by reference
//! across render threads.

use glint_math::{color, Color};

use crate::{
    intersectable::{Geometries, Intersectable},
    light::{AmbientLight, LightSource},
};

/// Everything a tracer needs: geometry, lights and the background.
pub struct Scene {
    /// Scene name (used for logging and output naming)
    pub name: String,

    /// Color returned for rays that hit nothing
    pub background: Color,

    /// Uniform ambient light
    pub ambient_light: AmbientLight,

    /// Root aggregate of all geometry
    pub geometries: Geometries,

    /// Lights used for direct illumination
    pub lights: Vec<Box<dyn LightSource>>,
}

impl Scene {
    /// Create an empty scene with a black background and no lights.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            background: color::BLACK,
            ambient_light: AmbientLight::NONE,
            geometries: Geometries::new(),
            lights: Vec::new(),
        }
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_ambient_light(mut self, ambient_light: AmbientLight) -> Self {
        self.ambient_light = ambient_light;
        self
    }

    pub fn with_geometries(mut self, geometries: Geometries) -> Self {
        self.geometries = geometries;
        self
    }

    pub fn with_light(mut self, light: impl LightSource + 'static) -> Self {
        self.lights.push(Box::new(light));
        self
    }

    /// Add a geometry (or aggregate) to the root.
    pub fn add_geometry(&mut self, geometry: impl Intersectable + 'static) {
        self.geometries.add(Box::new(geometry));
    }

    pub fn add_light(&mut self, light: impl LightSource + 'static) {
        self.lights.push(Box::new(light));
    }

    /// Replace the flat root with a single BVH over its children.
    pub fn with_bvh(mut self) -> Self {
        let flat = std::mem::take(&mut self.geometries);
        self.geometries = Geometries::new().with(flat.into_bvh());
        self
    }

    /// Get light count.
    pub fn light_count(&self) -> usize {
        self.lights.len()
    }
}
