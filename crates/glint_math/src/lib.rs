// Re-export glam for convenience
pub use glam::*;

// Glint math types
mod aabb;
pub mod color;
mod error;
mod interval;
mod ray;
mod util;
mod vec_ext;

pub use aabb::Aabb;
pub use color::Color;
pub use error::{MathError, MathResult};
pub use interval::Interval;
pub use ray::{Ray, DELTA};
pub use util::{align_zero, is_zero, EPSILON};
pub use vec_ext::DVec3Ext;

/// Per-channel material coefficients (kD, kS, kT, kR, kA).
pub type Coefficients = DVec3;
