//! Image buffer for storing render output.

use std::path::Path;

use glint_math::Color;

use crate::error::RenderResult;

/// Clamp a value to [0, 1] range.
#[inline]
pub fn clamp_01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

/// Convert a linear color to 8-bit RGBA.
///
/// Channels are clamped to `[0, 1]` here and nowhere else.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let r = (255.0 * clamp_01(color.x)).round() as u8;
    let g = (255.0 * clamp_01(color.y)).round() as u8;
    let b = (255.0 * clamp_01(color.z)).round() as u8;
    [r, g, b, 255]
}

/// Row-major grid of linear colors.
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    #[inline]
    fn index(&self, col: u32, row: u32) -> usize {
        row as usize * self.width as usize + col as usize
    }

    /// Get the pixel at (col, row).
    pub fn get_pixel(&self, col: u32, row: u32) -> Color {
        self.pixels[self.index(col, row)]
    }

    /// Set the pixel at (col, row).
    pub fn set_pixel(&mut self, col: u32, row: u32, color: Color) {
        let i = self.index(col, row);
        self.pixels[i] = color;
    }

    /// Draw grid lines every `interval` pixels in both directions.
    pub fn print_grid(&mut self, interval: u32, color: Color) {
        if interval == 0 {
            return;
        }
        for row in 0..self.height {
            for col in 0..self.width {
                if row % interval == 0 || col % interval == 0 {
                    self.set_pixel(col, row, color);
                }
            }
        }
    }

    /// Convert to RGBA bytes (for display or saving).
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgba(*color));
        }
        bytes
    }

    /// Write the image as a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        let path = path.as_ref();
        image::save_buffer_with_format(
            path,
            &self.to_rgba(),
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )?;
        log::info!("Saved {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_to_rgba_clamps() {
        assert_eq!(color_to_rgba(Color::new(0.0, 0.5, 1.0)), [0, 128, 255, 255]);
        assert_eq!(color_to_rgba(Color::new(-1.0, 2.0, 1.5)), [0, 255, 255, 255]);
    }

    #[test]
    fn test_set_get_pixel() {
        let mut image = ImageBuffer::new(4, 3);
        image.set_pixel(3, 2, Color::ONE);

        assert_eq!(image.get_pixel(3, 2), Color::ONE);
        assert_eq!(image.get_pixel(0, 0), Color::ZERO);
        assert_eq!(image.pixels[11], Color::ONE);
    }

    #[test]
    fn test_print_grid() {
        let mut image = ImageBuffer::new(5, 5);
        let red = Color::new(1.0, 0.0, 0.0);
        image.print_grid(2, red);

        // Lines on rows and columns 0, 2 and 4
        assert_eq!(image.get_pixel(0, 3), red);
        assert_eq!(image.get_pixel(3, 2), red);
        assert_eq!(image.get_pixel(4, 4), red);
        assert_eq!(image.get_pixel(1, 1), Color::ZERO);
        assert_eq!(image.get_pixel(3, 3), Color::ZERO);
    }

    #[test]
    fn test_to_rgba_layout() {
        let mut image = ImageBuffer::new(2, 1);
        image.set_pixel(1, 0, Color::new(1.0, 0.0, 0.0));
        assert_eq!(image.to_rgba(), vec![0, 0, 0, 255, 255, 0, 0, 255]);
    }

    #[test]
    fn test_save_png() {
        let mut image = ImageBuffer::new(8, 8);
        image.print_grid(4, Color::new(1.0, 1.0, 0.0));

        let path = std::env::temp_dir().join("glint_test_save_png.png");
        image.save_png(&path).unwrap();
        assert!(path.exists());
        std::fs::remove_file(&path).unwrap();
    }
}
