//! Recursive Phong ray tracer.
//!
//! Colors a ray by finding its closest hit and summing, at that point:
//! - the geometry's emission,
//! - ambient light scaled by `ka`,
//! - diffuse and specular light from every unshadowed light source,
//! - recursively traced mirror reflection and transparency.
//!
//! Recursion stops after `max_level` bounces or once the accumulated
//! attenuation drops below `min_k` on every channel.

use glint_core::{Intersectable, Intersection, LightArea, LightSource, Scene};
use glint_math::{align_zero, is_zero, Coefficients, Color, DVec3, DVec3Ext, Ray};
use serde::{Deserialize, Serialize};

use crate::sampling::{SamplingConfig, SamplingPattern, TargetShape};

/// Anything that can color a camera ray.
pub trait Tracer: Sync {
    fn trace_ray(&self, ray: &Ray) -> Color;
}

/// Recursion and soft-shadow settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceSettings {
    /// Maximum recursion depth for reflection and transparency
    pub max_level: u32,
    /// Attenuation below which a contribution is no longer traced
    pub min_k: f64,
    /// How shadow rays are spread over an area light
    pub shadow_pattern: SamplingPattern,
}

impl Default for TraceSettings {
    fn default() -> Self {
        Self {
            max_level: 10,
            min_k: 0.001,
            shadow_pattern: SamplingPattern::Grid,
        }
    }
}

/// A hit with the vectors every shading step needs.
struct ShadingContext<'a> {
    hit: Intersection<'a>,
    /// Direction of the incoming ray
    v: DVec3,
    /// Surface normal at the hit
    n: DVec3,
    vn: f64,
}

impl<'a> ShadingContext<'a> {
    /// `None` when the ray grazes the surface (`v·n ≈ 0`).
    fn new(hit: Intersection<'a>, v: DVec3) -> Option<Self> {
        let n = hit.geometry.normal_at(hit.point);
        let vn = v.dot(n);
        if is_zero(vn) {
            return None;
        }
        Some(Self { hit, v, n, vn })
    }
}

/// Whitted-style tracer with Phong local illumination.
pub struct SimpleRayTracer<'s> {
    scene: &'s Scene,
    settings: TraceSettings,
}

impl<'s> SimpleRayTracer<'s> {
    pub fn new(scene: &'s Scene) -> Self {
        Self {
            scene,
            settings: TraceSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: TraceSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &TraceSettings {
        &self.settings
    }

    fn closest_intersection(&self, ray: &Ray) -> Option<Intersection<'s>> {
        self.scene
            .geometries
            .intersect(ray, f64::INFINITY)
            .into_iter()
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    fn calc_color(&self, ctx: &ShadingContext<'s>, level: u32, k: Coefficients) -> Color {
        let geometry = ctx.hit.geometry;
        let emission = geometry.emission();
        if level == 0 || k.lower_than(self.settings.min_k) {
            return emission;
        }

        let ambient = self.scene.ambient_light.intensity * geometry.material().ka;
        emission + ambient + self.local_effects(ctx, k) + self.global_effects(ctx, level, k)
    }

    fn local_effects(&self, ctx: &ShadingContext<'s>, k: Coefficients) -> Color {
        let material = ctx.hit.geometry.material();
        let mut color = Color::ZERO;

        for light in &self.scene.lights {
            let l = light.direction_at(ctx.hit.point);
            let ln = l.dot(ctx.n);
            // Light and viewer must be on the same side of the surface
            if align_zero(ln * ctx.vn) <= 0.0 {
                continue;
            }

            let ktr = self.transparency(ctx, light.as_ref(), l);
            if (ktr * k).lower_than(self.settings.min_k) {
                continue;
            }

            let diffuse = material.kd * ln.abs();
            let r = l - ctx.n * (2.0 * ln);
            let vr = -ctx.v.dot(r);
            let specular = material.ks * vr.max(0.0).powi(material.shininess);

            color += light.intensity_at(ctx.hit.point) * ktr * (diffuse + specular);
        }
        color
    }

    /// Fraction of a light that reaches the hit point through blockers.
    fn transparency(
        &self,
        ctx: &ShadingContext<'s>,
        light: &dyn LightSource,
        l: DVec3,
    ) -> Coefficients {
        let point = ctx.hit.point;
        match light.area() {
            Some(area) => self.area_transparency(ctx, &area, l),
            None => self.transmittance(point, ctx.n, -l, light.distance_to(point)),
        }
    }

    /// Average transmittance toward sample points on a light's disc.
    ///
    /// The disc is centered on the light and faces the shaded point.
    fn area_transparency(
        &self,
        ctx: &ShadingContext<'s>,
        area: &LightArea,
        l: DVec3,
    ) -> Coefficients {
        let point = ctx.hit.point;
        let (u, w) = l.any_orthonormal_pair();
        let sampling = SamplingConfig::new(area.samples)
            .with_target(TargetShape::Disc)
            .with_pattern(self.settings.shadow_pattern);
        let offsets = sampling.offsets(&mut rand::thread_rng());

        let mut total = Coefficients::ZERO;
        for offset in &offsets {
            let sample = area.center + (u * offset.x + w * offset.y) * area.radius;
            let to_light = sample - point;
            // Offset directions on the wrong side of the surface see nothing
            if align_zero(to_light.dot(ctx.n) * ctx.vn) >= 0.0 {
                continue;
            }
            total += self.transmittance(point, ctx.n, to_light, to_light.length());
        }
        total / offsets.len() as f64
    }

    /// Product of the `kt` of everything between `point` and a light.
    fn transmittance(
        &self,
        point: DVec3,
        n: DVec3,
        to_light: DVec3,
        distance: f64,
    ) -> Coefficients {
        let Ok(shadow_ray) = Ray::offset(point, to_light, n) else {
            return Coefficients::ONE;
        };

        let mut ktr = Coefficients::ONE;
        for blocker in self.scene.geometries.intersect(&shadow_ray, distance) {
            ktr *= blocker.geometry.material().kt;
            if ktr.lower_than(self.settings.min_k) {
                return Coefficients::ZERO;
            }
        }
        ktr
    }

    fn global_effects(&self, ctx: &ShadingContext<'s>, level: u32, k: Coefficients) -> Color {
        let material = ctx.hit.geometry.material();
        let point = ctx.hit.point;
        let mut color = Color::ZERO;

        if material.kr != Coefficients::ZERO {
            let r = ctx.v.reflect(ctx.n);
            if let Ok(reflected) = Ray::offset(point, r, ctx.n) {
                color += self.global_effect(&reflected, level, k, material.kr);
            }
        }

        if material.kt != Coefficients::ZERO {
            // Transparency does not bend the ray
            if let Ok(refracted) = Ray::offset(point, ctx.v, ctx.v) {
                color += self.global_effect(&refracted, level, k, material.kt);
            }
        }

        color
    }

    fn global_effect(&self, ray: &Ray, level: u32, k: Coefficients, kx: Coefficients) -> Color {
        let new_k = k * kx;
        if new_k.lower_than(self.settings.min_k) {
            return Color::ZERO;
        }

        let Some(hit) = self.closest_intersection(ray) else {
            return self.scene.background * kx;
        };
        match ShadingContext::new(hit, ray.direction()) {
            Some(ctx) => self.calc_color(&ctx, level - 1, new_k) * kx,
            None => Color::ZERO,
        }
    }
}

impl Tracer for SimpleRayTracer<'_> {
    fn trace_ray(&self, ray: &Ray) -> Color {
        let Some(hit) = self.closest_intersection(ray) else {
            return self.scene.background;
        };
        match ShadingContext::new(hit, ray.direction()) {
            Some(ctx) => self.calc_color(&ctx, self.settings.max_level, Coefficients::ONE),
            None => Color::ZERO,
        }
    }
}
