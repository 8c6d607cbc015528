use std::path::Path;

use anyhow::Context;
use image::{Rgb, RgbImage};

use crate::core::color::Color;

pub struct Film {
    image: RgbImage,
}

impl Film {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbImage::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn set_pixel(&mut self, row: u32, col: u32, r: u8, g: u8, b: u8) {
        self.image.put_pixel(col, row, Rgb([r, g, b]));
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        self.image
            .save(path)
            .context(format!("film - can't save image to '{}'", path.display()))
    }
}

/// Gamma-2 tone map and clamp, applied once per pixel before `set_pixel`.
pub fn color_to_rgb8(color: Color) -> (u8, u8, u8) {
    let color = color.sqrt();
    let r = (color.r * 255.0).clamp(0.0, 255.0) as u8;
    let g = (color.g * 255.0).clamp(0.0, 255.0) as u8;
    let b = (color.b * 255.0).clamp(0.0, 255.0) as u8;
    (r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tone_map_clamps_and_gamma_corrects() {
        assert_eq!(color_to_rgb8(Color::BLACK), (0, 0, 0));
        assert_eq!(color_to_rgb8(Color::WHITE), (255, 255, 255));
        assert_eq!(color_to_rgb8(Color::gray(4.0)), (255, 255, 255));

        // 0.25 -> sqrt -> 0.5
        let (r, _, _) = color_to_rgb8(Color::gray(0.25));
        assert!((r as i32 - 127).abs() <= 1);
    }

    #[test]
    fn non_finite_input_never_panics() {
        let (r, g, b) = color_to_rgb8(Color::new(f32::NAN, f32::INFINITY, -1.0));
        // NaN clamps to 0 through the max(0) in sqrt
        assert_eq!((r, g, b), (0, 255, 0));
    }
}
