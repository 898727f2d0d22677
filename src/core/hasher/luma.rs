//! RGB to grayscale conversion.
//!
//! The weights are fixed at 0.30 / 0.59 / 0.11 and the result is truncated,
//! not rounded. Stored fingerprints depend on this exact formula, so it does
//! not use `image`'s own luma conversion (which uses Rec. 709 weights).

use image::{Rgb, RgbImage};

/// Convert one RGB pixel to an intensity in `[0, 255]`.
pub fn to_gray(pixel: Rgb<u8>) -> u8 {
    let [r, g, b] = pixel.0;
    (0.30 * r as f64 + 0.59 * g as f64 + 0.11 * b as f64) as u8
}

/// Build the intensity grid of a raster.
///
/// The outer loop walks x and the inner loop walks y, so the cell for
/// pixel `(x, y)` lives at `x * height + y`.
pub fn intensity_grid(image: &RgbImage) -> Vec<u8> {
    let (width, height) = image.dimensions();
    let mut grid = Vec::with_capacity((width * height) as usize);

    for x in 0..width {
        for y in 0..height {
            grid.push(to_gray(*image.get_pixel(x, y)));
        }
    }

    grid
}
