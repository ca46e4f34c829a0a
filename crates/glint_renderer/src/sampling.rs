//! 2D sample patterns for supersampling pixels and area lights.
//!
//! Offsets are produced on a `k x k` grid of cells covering either the square
//! `[-0.5, 0.5]²` or, mapped concentrically, the unit disc. Callers scale them
//! to a pixel or a light's radius.

use std::f64::consts::FRAC_PI_4;

use glint_math::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Region the samples cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TargetShape {
    /// The square `[-0.5, 0.5]²`
    #[default]
    Rectangle,
    /// The unit disc
    Disc,
}

/// Where inside each grid cell a sample is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SamplingPattern {
    /// Cell centers
    #[default]
    Grid,
    /// A uniformly random point per cell
    Jittered,
}

/// Supersampling configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Requested sample count, rounded to the nearest square
    pub samples: usize,
    pub target: TargetShape,
    pub pattern: SamplingPattern,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            samples: 1,
            target: TargetShape::Rectangle,
            pattern: SamplingPattern::Grid,
        }
    }
}

impl SamplingConfig {
    pub fn new(samples: usize) -> Self {
        Self {
            samples,
            ..Default::default()
        }
    }

    pub fn with_target(mut self, target: TargetShape) -> Self {
        self.target = target;
        self
    }

    pub fn with_pattern(mut self, pattern: SamplingPattern) -> Self {
        self.pattern = pattern;
        self
    }

    /// Side of the sample grid: `round(sqrt(samples))`, at least 1.
    pub fn grid_size(&self) -> usize {
        ((self.samples as f64).sqrt().round() as usize).max(1)
    }

    /// Number of offsets [`Self::offsets`] returns.
    pub fn sample_count(&self) -> usize {
        let k = self.grid_size();
        k * k
    }

    /// Generate the sample offsets.
    ///
    /// A single grid cell always yields the origin, so one sample means the
    /// center of the pixel or light.
    pub fn offsets<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<DVec2> {
        let k = self.grid_size();
        if k == 1 {
            return vec![DVec2::ZERO];
        }

        let cell = 1.0 / k as f64;
        let mut offsets = Vec::with_capacity(k * k);
        for row in 0..k {
            for col in 0..k {
                let (du, dv) = match self.pattern {
                    SamplingPattern::Grid => (0.5, 0.5),
                    SamplingPattern::Jittered => (rng.gen::<f64>(), rng.gen::<f64>()),
                };
                let square = DVec2::new(
                    (col as f64 + du) * cell - 0.5,
                    (row as f64 + dv) * cell - 0.5,
                );
                offsets.push(match self.target {
                    TargetShape::Rectangle => square,
                    TargetShape::Disc => concentric_disc(square * 2.0),
                });
            }
        }
        offsets
    }
}

/// Map a point of `[-1, 1]²` onto the unit disc, preserving relative area.
///
/// Concentric squares map to concentric circles, so a regular grid stays
/// evenly spread over the disc.
pub fn concentric_disc(p: DVec2) -> DVec2 {
    if p.x == 0.0 && p.y == 0.0 {
        return DVec2::ZERO;
    }

    let (r, theta) = if p.x.abs() > p.y.abs() {
        (p.x, FRAC_PI_4 * (p.y / p.x))
    } else {
        (p.y, 2.0 * FRAC_PI_4 - FRAC_PI_4 * (p.x / p.y))
    };
    DVec2::new(r * theta.cos(), r * theta.sin())
}
