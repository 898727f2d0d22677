//! # Core Module
//!
//! The fingerprinting engine. Pure and synchronous: every call works on its
//! own raster and buffers, with no shared mutable state.
//!
//! ## Modules
//! - `hasher` - Resampling, grayscale, aHash, hex codec and collaborators
//! - `fingerprint` - Assembles the final fingerprint string

pub mod fingerprint;
pub mod hasher;

// Re-export commonly used types
pub use fingerprint::{Fingerprint, Fingerprinter};
pub use hasher::{HashAlgorithmKind, NibblePacking};
