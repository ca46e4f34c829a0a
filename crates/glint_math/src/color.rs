//! Linear RGB color.
//!
//! Colors are plain `DVec3` triples on a linear `[0, 1]` scale. Values may
//! exceed 1 while light contributions are summed; they are clamped only when
//! written out as 8-bit pixels.

use glam::DVec3;

/// Color type alias (RGB values typically 0-1)
pub type Color = DVec3;

pub const BLACK: Color = DVec3::ZERO;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_attenuation() {
        // Component-wise multiply attenuates each channel independently
        let light = Color::new(0.8, 0.4, 0.2);
        let k = DVec3::new(0.5, 1.0, 0.0);
        assert!((light * k - Color::new(0.4, 0.4, 0.0)).length() < 1e-12);
        assert_eq!(BLACK * k, BLACK);
    }
}
