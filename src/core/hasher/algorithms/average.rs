//! Average Hash (aHash) implementation.
//!
//! aHash works by:
//! 1. Resizing the image to grid_size x grid_size (aspect ratio ignored)
//! 2. Converting to grayscale with the fixed 0.30 / 0.59 / 0.11 weights
//! 3. Computing the truncated mean intensity
//! 4. For each cell: if intensity >= mean, set bit to 1, else 0
//! 5. Packing the bits four at a time into hex digits
//!
//! Ties go to 1, so a perfectly uniform image hashes to all ones.

use super::super::fast_resize::FastResizer;
use super::super::hex::{pack_bits, NibblePacking};
use super::super::luma::intensity_grid;
use crate::error::HashError;
use image::DynamicImage;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Default grid edge length; 8 x 8 gives a 64-bit plane
pub const DEFAULT_GRID_SIZE: u32 = 8;

/// Range of image dimensions that get a fingerprint.
///
/// An image is rejected when either side is below `min`, or when BOTH sides
/// are above `max`. A 4001 x 7 image is rejected for its height, a
/// 4001 x 4000 image is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeWindow {
    pub min: u32,
    pub max: u32,
}

impl SizeWindow {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Whether an image of this size gets a fingerprint
    pub fn accepts(&self, width: u32, height: u32) -> bool {
        if width < self.min || height < self.min {
            return false;
        }
        !(width > self.max && height > self.max)
    }
}

impl Default for SizeWindow {
    fn default() -> Self {
        Self::new(8, 4000)
    }
}

/// Average Hash (aHash) implementation
#[derive(Debug, Clone)]
pub struct AverageHasher {
    /// Size of the grid (width and height)
    grid_size: u32,
    window: SizeWindow,
    packing: NibblePacking,
}

impl AverageHasher {
    /// Create a new aHash hasher
    pub fn new(grid_size: u32, window: SizeWindow, packing: NibblePacking) -> Self {
        Self {
            grid_size,
            window,
            packing,
        }
    }

    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    pub fn window(&self) -> SizeWindow {
        self.window
    }

    pub fn packing(&self) -> NibblePacking {
        self.packing
    }

    /// Threshold the image's intensity grid against its mean.
    ///
    /// Entry `x * grid_size + y` holds the bit for resampled pixel `(x, y)`.
    pub fn bit_plane(&self, image: &DynamicImage) -> Result<Vec<u8>, HashError> {
        let resized = FastResizer::new().resize(image, self.grid_size, self.grid_size, false)?;
        let grid = intensity_grid(&resized);

        let total: u32 = grid.iter().map(|&v| v as u32).sum();
        let average = total / grid.len() as u32;
        trace!(average, "average hash threshold");

        Ok(grid
            .iter()
            .map(|&intensity| u8::from(intensity >= average as u8))
            .collect())
    }

    /// Compute the hex segment, or an empty string if the image is outside
    /// the size window.
    pub fn hash_image(&self, image: &DynamicImage) -> Result<String, HashError> {
        if !self.window.accepts(image.width(), image.height()) {
            return Ok(String::new());
        }

        let bits = self.bit_plane(image)?;
        Ok(pack_bits(&bits, self.packing))
    }
}

impl Default for AverageHasher {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_SIZE, SizeWindow::default(), NibblePacking::Legacy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};

    fn create_solid_image(width: u32, height: u32, r: u8, g: u8, b: u8) -> DynamicImage {
        let img = ImageBuffer::from_fn(width, height, |_, _| Rgb([r, g, b]));
        DynamicImage::ImageRgb8(img)
    }

    /// Left half black, right half white
    fn create_split_image(width: u32, height: u32) -> DynamicImage {
        let img = ImageBuffer::from_fn(width, height, |x, _| {
            if x < width / 2 {
                Rgb([0, 0, 0])
            } else {
                Rgb([255, 255, 255])
            }
        });
        DynamicImage::ImageRgb8(img)
    }

    /// Horizontal stripes one grid cell tall, bright on even cell rows
    fn create_striped_image(width: u32, height: u32) -> DynamicImage {
        let band = height / 8;
        let img = ImageBuffer::from_fn(width, height, |_, y| {
            if (y / band) % 2 == 0 {
                Rgb([255, 255, 255])
            } else {
                Rgb([0, 0, 0])
            }
        });
        DynamicImage::ImageRgb8(img)
    }

    fn is_hex(s: &str) -> bool {
        s.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
    }

    #[test]
    fn solid_black_hashes_to_all_ones() {
        let hasher = AverageHasher::default();
        let image = create_solid_image(64, 64, 0, 0, 0);

        assert_eq!(hasher.hash_image(&image).unwrap(), "ffffffffffffffff");
    }

    #[test]
    fn ties_set_the_bit() {
        let hasher = AverageHasher::default();
        let image = create_solid_image(16, 16, 255, 255, 255);

        let bits = hasher.bit_plane(&image).unwrap();
        assert_eq!(bits.len(), 64);
        assert!(bits.iter().all(|&b| b == 1));
    }

    #[test]
    fn hash_is_sixteen_lowercase_hex_chars() {
        let hasher = AverageHasher::default();
        let image = ImageBuffer::from_fn(97, 41, |x, y| {
            Rgb([(x * 13 % 256) as u8, (y * 29 % 256) as u8, ((x * y) % 256) as u8])
        });

        let hash = hasher.hash_image(&DynamicImage::ImageRgb8(image)).unwrap();

        assert_eq!(hash.len(), 16);
        assert!(is_hex(&hash));
    }

    #[test]
    fn bit_plane_is_column_major() {
        let hasher = AverageHasher::default();
        let bits = hasher.bit_plane(&create_split_image(64, 64)).unwrap();

        // Columns x = 0..4 are dark, so the first 32 entries are 0
        assert!(bits[..32].iter().all(|&b| b == 0));
        assert!(bits[32..].iter().all(|&b| b == 1));
    }

    #[test]
    fn split_image_packs_in_grid_order() {
        let hasher = AverageHasher::default();
        let hash = hasher.hash_image(&create_split_image(64, 64)).unwrap();

        assert_eq!(hash, "00000000ffffffff");
    }

    #[test]
    fn striped_image_packs_differently_per_mode() {
        let image = create_striped_image(64, 64);
        let legacy = AverageHasher::new(8, SizeWindow::default(), NibblePacking::Legacy);
        let exact = AverageHasher::new(8, SizeWindow::default(), NibblePacking::Exact);

        // Every column reads 1,0,1,0,1,0,1,0
        assert_eq!(legacy.bit_plane(&image).unwrap(), [1u8, 0].repeat(32));
        assert_eq!(legacy.hash_image(&image).unwrap(), "b".repeat(16));
        assert_eq!(exact.hash_image(&image).unwrap(), "a".repeat(16));
    }

    #[test]
    fn identical_images_produce_identical_hash() {
        let hasher = AverageHasher::default();
        let image = create_split_image(120, 80);

        assert_eq!(
            hasher.hash_image(&image).unwrap(),
            hasher.hash_image(&image).unwrap()
        );
    }

    #[test]
    fn size_window_boundaries() {
        let window = SizeWindow::default();

        assert!(window.accepts(8, 8));
        assert!(!window.accepts(7, 7));
        assert!(!window.accepts(7, 100));
        assert!(!window.accepts(100, 7));
        assert!(!window.accepts(4001, 4001));
        assert!(window.accepts(4001, 4000));
        assert!(window.accepts(4000, 4000));
        // Width over the limit alone does not reject; the height still does
        assert!(!window.accepts(4001, 7));
        assert!(window.accepts(4001, 8));
    }

    #[test]
    fn too_small_image_yields_empty_hash() {
        let hasher = AverageHasher::default();
        let image = create_solid_image(7, 7, 10, 20, 30);

        assert_eq!(hasher.hash_image(&image).unwrap(), "");
    }

    #[test]
    fn smallest_accepted_image_hashes() {
        let hasher = AverageHasher::default();
        let image = create_solid_image(8, 8, 10, 20, 30);

        assert_eq!(hasher.hash_image(&image).unwrap().len(), 16);
    }

    #[test]
    fn wide_short_image_is_accepted() {
        let hasher = AverageHasher::default();
        let image = create_solid_image(4001, 8, 200, 10, 10);

        assert_eq!(hasher.hash_image(&image).unwrap(), "ffffffffffffffff");
    }

    #[test]
    fn both_sides_over_limit_is_rejected() {
        let hasher = AverageHasher::new(8, SizeWindow::new(8, 100), NibblePacking::Legacy);
        let image = create_solid_image(101, 101, 0, 0, 0);

        assert_eq!(hasher.hash_image(&image).unwrap(), "");
    }

    #[test]
    fn larger_grid_yields_longer_hash() {
        let hasher = AverageHasher::new(16, SizeWindow::default(), NibblePacking::Legacy);
        let image = create_solid_image(64, 64, 0, 0, 0);

        assert_eq!(hasher.hash_image(&image).unwrap(), "f".repeat(64));
    }
}
