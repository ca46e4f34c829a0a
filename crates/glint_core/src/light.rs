//! Light sources.
//!
//! Every light answers three questions about a point being shaded: how much
//! light reaches it, from which direction, and how far away the light is
//! (used to bound shadow rays).

use glint_math::{Color, DVec3, DVec3Ext};
use serde::{Deserialize, Serialize};

use crate::error::GeometryResult;

/// A light that contributes to direct (local) illumination.
pub trait LightSource: Send + Sync {
    /// Intensity arriving at `point`, after attenuation.
    fn intensity_at(&self, point: DVec3) -> Color;

    /// Unit direction of travel from the light to `point`.
    fn direction_at(&self, point: DVec3) -> DVec3;

    /// Distance from `point` to the light; infinite for directional lights.
    fn distance_to(&self, point: DVec3) -> f64;

    /// Disc the light is sampled over for soft shadows, if any.
    fn area(&self) -> Option<LightArea> {
        None
    }
}

/// A light's emitting disc, used to average shadow rays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightArea {
    pub center: DVec3,
    pub radius: f64,
    pub samples: usize,
}

/// Uniform light added to every surface, scaled by each material's `ka`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmbientLight {
    pub intensity: Color,
}

impl AmbientLight {
    /// No ambient light at all.
    pub const NONE: AmbientLight = AmbientLight {
        intensity: DVec3::ZERO,
    };

    /// Ambient light of `color` scaled by the attenuation factor `ka`.
    pub fn new(color: Color, ka: f64) -> Self {
        Self {
            intensity: color * ka,
        }
    }
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self::NONE
    }
}

/// Light arriving from a fixed direction with no falloff (e.g. the sun).
#[derive(Debug, Clone, Copy)]
pub struct DirectionalLight {
    intensity: Color,
    direction: DVec3,
}

impl DirectionalLight {
    pub fn new(intensity: Color, direction: DVec3) -> GeometryResult<Self> {
        Ok(Self {
            intensity,
            direction: direction.try_unit()?,
        })
    }
}

impl LightSource for DirectionalLight {
    fn intensity_at(&self, _point: DVec3) -> Color {
        self.intensity
    }

    fn direction_at(&self, _point: DVec3) -> DVec3 {
        self.direction
    }

    fn distance_to(&self, _point: DVec3) -> f64 {
        f64::INFINITY
    }
}

/// Omnidirectional light with `1 / (kc + kl d + kq d²)` falloff.
///
/// A positive radius together with more than one sample turns the point into
/// a disc for soft shadows.
#[derive(Debug, Clone, Copy)]
pub struct PointLight {
    intensity: Color,
    position: DVec3,
    kc: f64,
    kl: f64,
    kq: f64,
    radius: f64,
    samples: usize,
}

impl PointLight {
    pub fn new(intensity: Color, position: DVec3) -> Self {
        Self {
            intensity,
            position,
            kc: 1.0,
            kl: 0.0,
            kq: 0.0,
            radius: 0.0,
            samples: 1,
        }
    }

    pub fn with_kc(mut self, kc: f64) -> Self {
        self.kc = kc;
        self
    }

    pub fn with_kl(mut self, kl: f64) -> Self {
        self.kl = kl;
        self
    }

    pub fn with_kq(mut self, kq: f64) -> Self {
        self.kq = kq;
        self
    }

    /// Radius of the emitting disc used for soft shadows.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius.max(0.0);
        self
    }

    /// Number of shadow rays averaged per shaded point.
    ///
    /// Shadow rays are laid on a square grid, so the count is rounded to the
    /// nearest square; fewer than 3 leaves a single ray and hard shadows.
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples.max(1);
        self
    }

    pub fn position(&self) -> DVec3 {
        self.position
    }

    fn attenuation(&self, point: DVec3) -> f64 {
        let d = self.position.distance(point);
        self.kc + self.kl * d + self.kq * d * d
    }
}

impl LightSource for PointLight {
    fn intensity_at(&self, point: DVec3) -> Color {
        self.intensity / self.attenuation(point)
    }

    fn direction_at(&self, point: DVec3) -> DVec3 {
        (point - self.position).normalize_or_zero()
    }

    fn distance_to(&self, point: DVec3) -> f64 {
        self.position.distance(point)
    }

    fn area(&self) -> Option<LightArea> {
        let side = (self.samples as f64).sqrt().round() as usize;
        (self.radius > 0.0 && side > 1).then_some(LightArea {
            center: self.position,
            radius: self.radius,
            samples: side * side,
        })
    }
}

/// A point light whose intensity is concentrated around a direction.
///
/// Intensity is scaled by `max(0, dir · l)^narrow_beam`, where `l` is the
/// direction from the light to the shaded point.
#[derive(Debug, Clone, Copy)]
pub struct SpotLight {
    light: PointLight,
    direction: DVec3,
    narrow_beam: f64,
}

impl SpotLight {
    pub fn new(intensity: Color, position: DVec3, direction: DVec3) -> GeometryResult<Self> {
        Ok(Self {
            light: PointLight::new(intensity, position),
            direction: direction.try_unit()?,
            narrow_beam: 1.0,
        })
    }

    /// Exponent sharpening the beam; 1 is a plain cosine falloff.
    pub fn with_narrow_beam(mut self, narrow_beam: f64) -> Self {
        self.narrow_beam = narrow_beam;
        self
    }

    pub fn with_kc(mut self, kc: f64) -> Self {
        self.light = self.light.with_kc(kc);
        self
    }

    pub fn with_kl(mut self, kl: f64) -> Self {
        self.light = self.light.with_kl(kl);
        self
    }

    pub fn with_kq(mut self, kq: f64) -> Self {
        self.light = self.light.with_kq(kq);
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.light = self.light.with_radius(radius);
        self
    }

    pub fn with_samples(mut self, samples: usize) -> Self {
        self.light = self.light.with_samples(samples);
        self
    }
}

impl LightSource for SpotLight {
    fn intensity_at(&self, point: DVec3) -> Color {
        let l = self.light.direction_at(point);
        let factor = self.direction.dot(l).max(0.0).powf(self.narrow_beam);
        self.light.intensity_at(point) * factor
    }

    fn direction_at(&self, point: DVec3) -> DVec3 {
        self.light.direction_at(point)
    }

    fn distance_to(&self, point: DVec3) -> f64 {
        self.light.distance_to(point)
    }

    fn area(&self) -> Option<LightArea> {
        self.light.area()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GeometryError;
    use glint_math::MathError;

    #[test]
    fn test_ambient_light() {
        let ambient = AmbientLight::new(Color::new(0.5, 1.0, 0.2), 0.5);
        assert_eq!(ambient.intensity, Color::new(0.25, 0.5, 0.1));
        assert_eq!(AmbientLight::default(), AmbientLight::NONE);
    }

    #[test]
    fn test_directional_light() {
        let light = DirectionalLight::new(Color::ONE, DVec3::new(0.0, -2.0, 0.0)).unwrap();
        let p = DVec3::new(3.0, 4.0, 5.0);

        assert_eq!(light.direction_at(p), -DVec3::Y);
        assert_eq!(light.intensity_at(p), Color::ONE);
        assert!(light.distance_to(p).is_infinite());
        assert!(light.area().is_none());
    }

    #[test]
    fn test_directional_light_zero_direction() {
        assert_eq!(
            DirectionalLight::new(Color::ONE, DVec3::ZERO).unwrap_err(),
            GeometryError::Math(MathError::ZeroVector)
        );
    }

    #[test]
    fn test_point_light_attenuation() {
        let light = PointLight::new(Color::splat(10.0), DVec3::ZERO)
            .with_kc(1.0)
            .with_kl(0.5)
            .with_kq(0.25);
        let p = DVec3::new(0.0, 2.0, 0.0);

        // 10 / (1 + 0.5 * 2 + 0.25 * 4)
        assert!((light.intensity_at(p) - Color::splat(10.0 / 3.0)).length() < 1e-12);
        assert_eq!(light.direction_at(p), DVec3::Y);
        assert_eq!(light.distance_to(p), 2.0);
    }

    #[test]
    fn test_point_light_area() {
        let hard = PointLight::new(Color::ONE, DVec3::ZERO).with_radius(2.0);
        assert!(hard.area().is_none());

        let soft = hard.with_samples(16);
        let area = soft.area().unwrap();
        assert_eq!(area.radius, 2.0);
        assert_eq!(area.samples, 16);

        // Rounded to the square grid actually traced
        assert_eq!(hard.with_samples(10).area().unwrap().samples, 9);
        assert!(hard.with_samples(2).area().is_none());
    }

    #[test]
    fn test_spot_light_beam() {
        let spot = SpotLight::new(Color::ONE, DVec3::ZERO, -DVec3::Z)
            .unwrap()
            .with_narrow_beam(2.0);

        // On the beam axis: full intensity
        assert!((spot.intensity_at(DVec3::new(0.0, 0.0, -3.0)) - Color::ONE).length() < 1e-12);

        // 60 degrees off axis: cos^2 = 0.25
        let off = DVec3::new(3f64.sqrt(), 0.0, -1.0);
        assert!((spot.intensity_at(off) - Color::splat(0.25)).length() < 1e-9);

        // Behind the light: nothing
        assert_eq!(spot.intensity_at(DVec3::new(0.0, 0.0, 1.0)), Color::ZERO);
    }
}
