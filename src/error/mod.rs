//! # Error Module
//!
//! Error types for image fingerprinting.
//!
//! ## Design Principles
//! - **Never panic** on image data - return errors instead
//! - **Expected variability is not an error** - undecodable or out-of-range
//!   images produce the empty fingerprint, not an `Err`
//! - **Misuse is an error** - malformed hex or reference digits are reported
//!   with the offending character and its position

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum FingerprintError {
    #[error("Hashing error: {0}")]
    Hash(#[from] HashError),

    #[error("Invalid fingerprint {value:?}: {reason}")]
    InvalidFingerprint { value: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors that occur while hashing or decoding hash strings
#[derive(Error, Debug)]
pub enum HashError {
    #[error("Invalid hex digit {digit:?} at position {position}")]
    InvalidHexDigit { digit: char, position: usize },

    #[error("Invalid reference hash digit {digit:?} at position {position}")]
    InvalidReferenceDigit { digit: char, position: usize },

    #[error("Cannot resample a degenerate raster ({width}x{height})")]
    DegenerateRaster { width: u32, height: u32 },

    #[error("Resampling failed: {0}")]
    ResizeFailed(String),

    #[error("Reference hash failed: {0}")]
    ReferenceHashFailed(String),

    #[error("Failed to read image file {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, FingerprintError>;
