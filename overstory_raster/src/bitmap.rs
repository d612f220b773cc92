// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! RGBA bitmap with a logical-to-pixel scale factor.

use alloc::vec;
use alloc::vec::Vec;

use kurbo::{Rect, Size};

/// An 8-bit RGBA image produced by snapshot capture.
///
/// Pixels are row-major, unpremultiplied, 4 bytes per pixel. The `scale`
/// factor records how many pixels correspond to one logical unit, so
/// logical-space rectangles (view bounds, crop regions) can be mapped onto
/// the pixel grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Bitmap {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixels per logical unit.
    pub scale: f64,
    /// RGBA bytes, `width * height * 4` long.
    pub pixels: Vec<u8>,
}

impl Bitmap {
    /// Creates a transparent bitmap of the given pixel dimensions.
    #[must_use]
    pub fn new(width: u32, height: u32, scale: f64) -> Self {
        Self {
            width,
            height,
            scale,
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Creates a transparent bitmap covering `size` logical units at the
    /// given scale, rounding pixel dimensions up.
    #[must_use]
    pub fn with_logical_size(size: Size, scale: f64) -> Self {
        let (width, height) = pixel_extent(size, scale);
        Self::new(width, height, scale)
    }

    /// Returns the RGBA bytes of the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) out of bounds ({}x{})",
            self.width,
            self.height
        );
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    /// Writes the RGBA bytes of the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) out of bounds ({}x{})",
            self.width,
            self.height
        );
        let i = (y as usize * self.width as usize + x as usize) * 4;
        self.pixels[i..i + 4].copy_from_slice(&rgba);
    }

    /// Extracts the part of the bitmap covered by `region`, given in logical
    /// units.
    ///
    /// The region is scaled by [`scale`](Self::scale), expanded outward to
    /// whole pixels, and intersected with the bitmap. Returns `None` if the
    /// intersection is empty.
    #[must_use]
    pub fn crop(&self, region: Rect) -> Option<Self> {
        let x0 = (region.x0 * self.scale).floor().max(0.0);
        let y0 = (region.y0 * self.scale).floor().max(0.0);
        let x1 = (region.x1 * self.scale).ceil().min(f64::from(self.width));
        let y1 = (region.y1 * self.scale).ceil().min(f64::from(self.height));
        if x1 - x0 < 1.0 || y1 - y0 < 1.0 {
            return None;
        }

        // The bounds above guarantee the values are non-negative and within
        // the source dimensions.
        #[expect(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "clamped to the pixel grid before the cast"
        )]
        let (x0, y0, x1, y1) = (x0 as u32, y0 as u32, x1 as u32, y1 as u32);

        let mut out = Self::new(x1 - x0, y1 - y0, self.scale);
        for row in 0..out.height {
            let src_start = ((y0 + row) as usize * self.width as usize + x0 as usize) * 4;
            let src_end = src_start + out.width as usize * 4;
            let dst_start = row as usize * out.width as usize * 4;
            let dst_end = dst_start + out.width as usize * 4;
            out.pixels[dst_start..dst_end].copy_from_slice(&self.pixels[src_start..src_end]);
        }
        Some(out)
    }
}

/// Maps a logical size onto the pixel grid, rounding up.
#[must_use]
pub fn pixel_extent(size: Size, scale: f64) -> (u32, u32) {
    let width = (size.width * scale).ceil().max(0.0);
    let height = (size.height * scale).ceil().max(0.0);
    // `ceil().max(0.0)` keeps the values non-negative and integral.
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "rounded and clamped before the cast"
    )]
    let extent = (width as u32, height as u32);
    extent
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_logical_size_rounds_up() {
        let bitmap = Bitmap::with_logical_size(Size::new(10.4, 20.0), 2.0);
        assert_eq!(bitmap.width, 21);
        assert_eq!(bitmap.height, 40);
        assert_eq!(bitmap.scale, 2.0);
        assert_eq!(bitmap.pixels.len(), 21 * 40 * 4);
    }

    #[test]
    fn pixel_round_trip() {
        let mut bitmap = Bitmap::new(4, 4, 1.0);
        bitmap.set_pixel(2, 3, [1, 2, 3, 4]);
        assert_eq!(bitmap.pixel(2, 3), [1, 2, 3, 4]);
        assert_eq!(bitmap.pixel(0, 0), [0, 0, 0, 0]);
    }

    #[test]
    fn crop_scales_by_bitmap_scale() {
        // 10x10 logical units at scale 2 -> 20x20 pixels.
        let mut bitmap = Bitmap::new(20, 20, 2.0);
        bitmap.set_pixel(10, 10, [255, 0, 0, 255]);

        // Logical (5, 5)..(10, 10) -> pixel (10, 10)..(20, 20).
        let cropped = bitmap.crop(Rect::new(5.0, 5.0, 10.0, 10.0)).unwrap();
        assert_eq!(cropped.width, 10);
        assert_eq!(cropped.height, 10);
        assert_eq!(cropped.pixel(0, 0), [255, 0, 0, 255]);
    }

    #[test]
    fn crop_clamps_to_bounds() {
        let bitmap = Bitmap::new(8, 8, 1.0);
        let cropped = bitmap.crop(Rect::new(-4.0, 6.0, 4.0, 20.0)).unwrap();
        assert_eq!(cropped.width, 4);
        assert_eq!(cropped.height, 2);
    }

    #[test]
    fn crop_outside_returns_none() {
        let bitmap = Bitmap::new(8, 8, 1.0);
        assert!(bitmap.crop(Rect::new(10.0, 10.0, 20.0, 20.0)).is_none());
        assert!(bitmap.crop(Rect::new(-5.0, -5.0, -1.0, -1.0)).is_none());
    }

    #[test]
    fn crop_expands_fractional_regions_outward() {
        let bitmap = Bitmap::new(8, 8, 1.0);
        let cropped = bitmap.crop(Rect::new(1.2, 1.2, 2.8, 2.8)).unwrap();
        // floor(1.2)..ceil(2.8) covers pixels 1..3.
        assert_eq!(cropped.width, 2);
        assert_eq!(cropped.height, 2);
    }

    #[test]
    fn crop_full_is_identity() {
        let mut bitmap = Bitmap::new(4, 4, 1.0);
        bitmap.set_pixel(1, 2, [9, 9, 9, 9]);
        let cropped = bitmap.crop(Rect::new(0.0, 0.0, 4.0, 4.0)).unwrap();
        assert_eq!(cropped, bitmap);
    }
}
