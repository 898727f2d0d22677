//! Fingerprint assembly: decode, size check, reference hash, aHash.

use super::types::Fingerprint;
use crate::core::hasher::{
    pack_bits, AverageHasher, FastDecoder, HasherConfig, ImageDecoder, NibblePacking,
    PerceptualHasher, ReferenceHasher, SizeWindow,
};
use crate::error::{FingerprintError, HashError};
use tracing::debug;

/// Zero entries appended to the reference digits before packing
const REFERENCE_PADDING: [u8; 3] = [0, 0, 0];

/// Pack a reference hash digit string into its hex segment.
///
/// Each character must be a decimal digit. Three zeros are appended before
/// grouping by four, so a 64-digit hash yields 17 hex characters.
pub fn reference_segment(digits: &str, packing: NibblePacking) -> Result<String, HashError> {
    let mut values = Vec::with_capacity(digits.len() + REFERENCE_PADDING.len());

    for (position, digit) in digits.chars().enumerate() {
        let value = digit
            .to_digit(10)
            .ok_or(HashError::InvalidReferenceDigit { digit, position })?;
        values.push(value as u8);
    }
    values.extend_from_slice(&REFERENCE_PADDING);

    Ok(pack_bits(&values, packing))
}

/// Computes fingerprints from encoded image bytes.
///
/// Holds no per-call state; one instance can be shared across threads.
pub struct Fingerprinter {
    decoder: Box<dyn ImageDecoder>,
    reference: Box<dyn ReferenceHasher>,
    hasher: AverageHasher,
}

impl Fingerprinter {
    /// Create a builder for fingerprinter configuration
    pub fn builder() -> FingerprinterBuilder {
        FingerprinterBuilder::new()
    }

    /// Compute the fingerprint of `bytes`.
    ///
    /// `Ok(None)` means the bytes did not decode or the image is outside the
    /// size window. Errors from the reference hasher or resampling propagate.
    pub fn compute(&self, bytes: &[u8]) -> Result<Option<Fingerprint>, HashError> {
        let Some(image) = self.decoder.decode(bytes) else {
            debug!(len = bytes.len(), "no image");
            return Ok(None);
        };

        let (width, height) = (image.width(), image.height());
        debug!(width, height, "image decoded");

        if !self.hasher.window().accepts(width, height) {
            debug!(width, height, "image outside size window");
            return Ok(None);
        }

        let digits = self.reference.reference_hash(&image)?;
        let reference_hash = reference_segment(&digits, self.hasher.packing())?;
        let average_hash = self.hasher.hash_image(&image)?;

        Ok(Some(Fingerprint {
            average_hash,
            reference_hash,
            height,
            width,
        }))
    }

    /// Compute the fingerprint string of `bytes`.
    ///
    /// Returns the empty string when no fingerprint could be computed.
    pub fn fingerprint(&self, bytes: &[u8]) -> Result<String, HashError> {
        Ok(self
            .compute(bytes)?
            .map(|fingerprint| fingerprint.to_string())
            .unwrap_or_default())
    }

    pub fn average_hasher(&self) -> &AverageHasher {
        &self.hasher
    }
}

impl Default for Fingerprinter {
    fn default() -> Self {
        Self {
            decoder: Box::new(FastDecoder),
            reference: Box::new(PerceptualHasher::default()),
            hasher: AverageHasher::default(),
        }
    }
}

/// Builder for fingerprinter configuration
pub struct FingerprinterBuilder {
    config: HasherConfig,
    decoder: Option<Box<dyn ImageDecoder>>,
    reference: Option<Box<dyn ReferenceHasher>>,
}

impl FingerprinterBuilder {
    /// Create a new fingerprinter builder
    pub fn new() -> Self {
        Self {
            config: HasherConfig::new(),
            decoder: None,
            reference: None,
        }
    }

    /// Set the aHash grid size
    pub fn grid_size(mut self, size: u32) -> Self {
        self.config = self.config.grid_size(size);
        self
    }

    /// Set the accepted image size window
    pub fn size_window(mut self, window: SizeWindow) -> Self {
        self.config = self.config.size_window(window);
        self
    }

    /// Set the nibble packing used for both segments
    pub fn packing(mut self, packing: NibblePacking) -> Self {
        self.config = self.config.packing(packing);
        self
    }

    /// Replace the image decoder
    pub fn decoder(mut self, decoder: Box<dyn ImageDecoder>) -> Self {
        self.decoder = Some(decoder);
        self
    }

    /// Replace the reference hasher
    pub fn reference_hasher(mut self, reference: Box<dyn ReferenceHasher>) -> Self {
        self.reference = Some(reference);
        self
    }

    /// Build the fingerprinter
    pub fn build(self) -> Result<Fingerprinter, FingerprintError> {
        Ok(Fingerprinter {
            decoder: self.decoder.unwrap_or_else(|| Box::new(FastDecoder)),
            reference: self
                .reference
                .unwrap_or_else(|| Box::new(PerceptualHasher::default())),
            hasher: self.config.build()?,
        })
    }
}

impl Default for FingerprinterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
