//! # Fingerprint Module
//!
//! Combines the aHash segment, the reference hash segment and the original
//! image dimensions into one comparable string.
//!
//! ## Format
//! `<average_hash>|<reference_hash>|<height>|<width>`
//!
//! The empty string means no fingerprint could be computed: the bytes were
//! not an image, or the image was smaller than 8 px on a side or larger than
//! 4000 px on both sides. Comparing fingerprints is left to callers.
//!
//! ## Example
//! ```rust,ignore
//! let fingerprinter = Fingerprinter::builder().build()?;
//! let fingerprint = fingerprinter.fingerprint(&bytes)?;
//! ```

mod assembler;
mod types;

pub use assembler::{reference_segment, Fingerprinter, FingerprinterBuilder};
pub use types::{Fingerprint, FingerprintBits, FIELD_SEPARATOR};
