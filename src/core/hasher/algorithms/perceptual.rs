//! Perceptual Hash (pHash) reference hasher.
//!
//! pHash uses the Discrete Cosine Transform (DCT) to extract
//! frequency information from the image. This makes it more
//! robust to:
//! - Scaling
//! - Minor rotations
//! - Brightness/contrast changes
//! - Compression artifacts
//!
//! For simplicity, we use the image_hasher crate which provides
//! a well-tested pHash implementation. The hash bits are rendered as
//! `'0'`/`'1'` characters, most significant bit of each byte first.

use super::super::traits::{HashAlgorithmKind, ReferenceHasher};
use crate::error::HashError;
use image::DynamicImage;
use image_hasher::{HashAlg, HasherConfig as ImageHasherConfig};

/// Perceptual Hash (pHash) implementation using DCT
pub struct PerceptualHasher {
    hash_size: u32,
    /// Internal hasher from image_hasher crate
    hasher: image_hasher::Hasher,
}

impl PerceptualHasher {
    /// Create a new pHash hasher producing `hash_size * hash_size` digits
    pub fn new(hash_size: u32) -> Self {
        let hasher = ImageHasherConfig::new()
            .hash_size(hash_size, hash_size)
            .hash_alg(HashAlg::Mean)
            .preproc_dct()
            .to_hasher();

        Self { hash_size, hasher }
    }

    pub fn hash_size(&self) -> u32 {
        self.hash_size
    }
}

impl Default for PerceptualHasher {
    fn default() -> Self {
        Self::new(8)
    }
}

impl ReferenceHasher for PerceptualHasher {
    fn reference_hash(&self, image: &DynamicImage) -> Result<String, HashError> {
        let hash = self.hasher.hash_image(image);

        Ok(hash
            .as_bytes()
            .iter()
            .map(|byte| format!("{:08b}", byte))
            .collect())
    }

    fn kind(&self) -> HashAlgorithmKind {
        HashAlgorithmKind::Perceptual
    }
}
