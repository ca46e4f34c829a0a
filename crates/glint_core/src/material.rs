//! Phong material coefficients and per-geometry surface data.

use glint_math::{color, Coefficients, Color, DVec3};
use serde::{Deserialize, Serialize};

/// Phong reflectance model coefficients.
///
/// Every triple is per color channel, each channel nominally in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    /// Diffuse reflection
    pub kd: Coefficients,
    /// Specular reflection
    pub ks: Coefficients,
    /// Transparency
    pub kt: Coefficients,
    /// Mirror reflectivity
    pub kr: Coefficients,
    /// Ambient response
    pub ka: Coefficients,
    /// Phong shininess exponent
    pub shininess: i32,
}

impl Default for Material {
    /// An inert material: no diffuse, specular, transparency or reflection,
    /// full response to ambient light.
    fn default() -> Self {
        Self {
            kd: DVec3::ZERO,
            ks: DVec3::ZERO,
            kt: DVec3::ZERO,
            kr: DVec3::ZERO,
            ka: DVec3::ONE,
            shininess: 0,
        }
    }
}

impl Material {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kd(mut self, kd: f64) -> Self {
        self.kd = DVec3::splat(kd);
        self
    }

    pub fn with_ks(mut self, ks: f64) -> Self {
        self.ks = DVec3::splat(ks);
        self
    }

    pub fn with_kt(mut self, kt: f64) -> Self {
        self.kt = DVec3::splat(kt);
        self
    }

    pub fn with_kr(mut self, kr: f64) -> Self {
        self.kr = DVec3::splat(kr);
        self
    }

    pub fn with_ka(mut self, ka: f64) -> Self {
        self.ka = DVec3::splat(ka);
        self
    }

    pub fn with_shininess(mut self, shininess: i32) -> Self {
        self.shininess = shininess;
        self
    }
}

/// Emission and material owned by a single geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub emission: Color,
    pub material: Material,
}

impl Default for Surface {
    fn default() -> Self {
        Self {
            emission: color::BLACK,
            material: Material::default(),
        }
    }
}
