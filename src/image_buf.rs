//! Row-major `width x height` RGB8 pixel grid.
//!
//! Backed by `image::RgbImage` (the teacher's existing dependency for pixel
//! storage); the PPM sink in `ppm.rs` walks it directly rather than using
//! the `image` crate's binary encoders, since spec.md mandates literal
//! ASCII P3 output.

use crate::vec3::Vec3u8;
use image::{Rgb, RgbImage};

pub struct Image {
    buf: RgbImage,
}

impl Image {
    /// All pixels start at black (spec.md I7: pixels outside any hit keep
    /// the default background).
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            buf: RgbImage::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.buf.width()
    }

    pub fn height(&self) -> u32 {
        self.buf.height()
    }

    /// Out-of-range access is a programmer error and fails fast (spec.md
    /// §7), matching `image::RgbImage::put_pixel`'s own panicking contract.
    pub fn set(&mut self, col: u32, row: u32, color: Vec3u8) {
        self.buf.put_pixel(col, row, Rgb([color.x, color.y, color.z]));
    }

    pub fn get(&self, col: u32, row: u32) -> Vec3u8 {
        let Rgb([r, g, b]) = *self.buf.get_pixel(col, row);
        Vec3u8::new(r, g, b)
    }

    pub fn rows(&self) -> impl Iterator<Item = Vec<Vec3u8>> + '_ {
        (0..self.height()).map(move |row| (0..self.width()).map(|col| self.get(col, row)).collect())
    }
}
