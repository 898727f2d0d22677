//! # Hasher Module
//!
//! The pieces of an image fingerprint.
//!
//! ## Components
//! - **Resampler** (`fast_resize`) - scales a raster, optionally keeping aspect ratio
//! - **Luma converter** (`luma`) - fixed-weight RGB to grayscale
//! - **aHash engine** (`AverageHasher`) - resample, grayscale, threshold, pack
//! - **Hex codec** (`hex`) - nibble/hex conversion and bit-plane packing
//! - **Collaborators** (`traits`) - image decoding and the reference hash,
//!   with `FastDecoder` and `PerceptualHasher` as the default implementations
//!
//! ## Example
//! ```rust,ignore
//! use image_fingerprint::core::hasher::{HasherConfig, NibblePacking};
//!
//! let hasher = HasherConfig::new()
//!     .grid_size(8)
//!     .packing(NibblePacking::Legacy)
//!     .build()?;
//!
//! let hex = hasher.hash_image(&image)?;
//! ```

mod algorithms;
pub mod fast_decode;
pub mod fast_resize;
pub mod hex;
pub mod luma;
pub mod mmap_decode;
mod traits;

pub use algorithms::{AverageHasher, PerceptualHasher, SizeWindow, DEFAULT_GRID_SIZE};
pub use fast_decode::FastDecoder;
pub use hex::{hex_to_binary, nibble_to_hex, pack_bits, pack_quad_to_hex, NibblePacking};
pub use traits::{HashAlgorithmKind, ImageDecoder, ReferenceHasher};

use crate::error::FingerprintError;

/// Configuration builder for the average hasher
#[derive(Debug, Clone)]
pub struct HasherConfig {
    /// Grid edge length; the bit plane has grid_size² entries
    grid_size: u32,
    /// Images outside this window get no fingerprint
    size_window: SizeWindow,
    /// How bits are folded into hex digits
    packing: NibblePacking,
}

impl HasherConfig {
    /// Create a new hasher configuration with defaults
    pub fn new() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            size_window: SizeWindow::default(),
            packing: NibblePacking::Legacy,
        }
    }

    /// Set the grid size.
    ///
    /// Only 8 produces fingerprints compatible with stored ones.
    /// - 8: 64 bits, 16 hex characters
    /// - 16: 256 bits, 64 hex characters
    pub fn grid_size(mut self, size: u32) -> Self {
        self.grid_size = size;
        self
    }

    /// Set the accepted image size window
    pub fn size_window(mut self, window: SizeWindow) -> Self {
        self.size_window = window;
        self
    }

    /// Set the nibble packing
    pub fn packing(mut self, packing: NibblePacking) -> Self {
        self.packing = packing;
        self
    }

    /// Build the hasher
    pub fn build(self) -> Result<AverageHasher, FingerprintError> {
        let cells = self.grid_size.checked_mul(self.grid_size);
        if self.grid_size < 2 || !cells.is_some_and(|cells| cells % 4 == 0) {
            return Err(FingerprintError::Config(format!(
                "grid size {} does not give a bit plane divisible into nibbles",
                self.grid_size
            )));
        }

        if self.size_window.min == 0 || self.size_window.min > self.size_window.max {
            return Err(FingerprintError::Config(format!(
                "invalid size window {}..={}",
                self.size_window.min, self.size_window.max
            )));
        }

        Ok(AverageHasher::new(
            self.grid_size,
            self.size_window,
            self.packing,
        ))
    }
}

impl Default for HasherConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_to_legacy_8x8() {
        let config = HasherConfig::new();
        assert_eq!(config.grid_size, 8);
        assert_eq!(config.packing, NibblePacking::Legacy);
        assert_eq!(config.size_window, SizeWindow::new(8, 4000));
    }

    #[test]
    fn config_builder_works() {
        let config = HasherConfig::new()
            .packing(NibblePacking::Exact)
            .grid_size(16);

        assert_eq!(config.packing, NibblePacking::Exact);
        assert_eq!(config.grid_size, 16);
    }

    #[test]
    fn build_creates_hasher() {
        let hasher = HasherConfig::new().build().unwrap();
        assert_eq!(hasher.grid_size(), 8);
    }

    #[test]
    fn odd_grid_size_is_rejected() {
        let result = HasherConfig::new().grid_size(3).build();
        assert!(matches!(result, Err(FingerprintError::Config(_))));

        let result = HasherConfig::new().grid_size(0).build();
        assert!(matches!(result, Err(FingerprintError::Config(_))));
    }

    #[test]
    fn huge_grid_size_is_rejected() {
        let result = HasherConfig::new().grid_size(65536).build();
        assert!(matches!(result, Err(FingerprintError::Config(_))));

        let result = HasherConfig::new().grid_size(u32::MAX).build();
        assert!(matches!(result, Err(FingerprintError::Config(_))));
    }

    #[test]
    fn empty_size_window_is_rejected() {
        let result = HasherConfig::new()
            .size_window(SizeWindow::new(0, 100))
            .build();
        assert!(matches!(result, Err(FingerprintError::Config(_))));

        let result = HasherConfig::new()
            .size_window(SizeWindow::new(50, 10))
            .build();
        assert!(matches!(result, Err(FingerprintError::Config(_))));
    }
}
