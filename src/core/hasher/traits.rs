//! Trait definitions for the fingerprint's external collaborators.

use crate::error::HashError;
use image::DynamicImage;
use serde::{Deserialize, Serialize};

/// Turns encoded image bytes into a pixel raster.
pub trait ImageDecoder: Send + Sync {
    /// Decode `bytes`, or `None` if they are not an image this decoder understands
    fn decode(&self, bytes: &[u8]) -> Option<DynamicImage>;
}

/// Second hash algorithm whose output is embedded in the fingerprint.
///
/// The result is a string of decimal digit characters, one per bit. Only
/// `0` and `1` are meaningful, but the fingerprint packs whatever digits it
/// is given.
pub trait ReferenceHasher: Send + Sync {
    /// Compute the digit string for an already-decoded image
    fn reference_hash(&self, image: &DynamicImage) -> Result<String, HashError>;

    /// Get the algorithm kind
    fn kind(&self) -> HashAlgorithmKind;
}

/// Available hash algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashAlgorithmKind {
    /// Average Hash (aHash) - the fingerprint's primary segment
    Average,
    /// Perceptual Hash (pHash) - the default reference segment
    Perceptual,
    /// A reference hasher supplied by the caller
    Custom,
}

impl HashAlgorithmKind {
    /// Get a human-readable description of the algorithm
    pub fn description(&self) -> &'static str {
        match self {
            HashAlgorithmKind::Average => {
                "Average Hash (aHash) - 8x8 grayscale grid thresholded at its mean"
            }
            HashAlgorithmKind::Perceptual => {
                "Perceptual Hash (pHash) - DCT-based, robust to edits and transformations"
            }
            HashAlgorithmKind::Custom => "Caller-supplied reference hash",
        }
    }
}

impl std::fmt::Display for HashAlgorithmKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HashAlgorithmKind::Average => write!(f, "aHash"),
            HashAlgorithmKind::Perceptual => write!(f, "pHash"),
            HashAlgorithmKind::Custom => write!(f, "custom"),
        }
    }
}
