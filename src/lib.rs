//! # Image Fingerprint
//!
//! Short, comparable image signatures that survive resizing, recompression
//! and slight recolouring, but differ for visually distinct images.
//!
//! ## Architecture
//! - `core` - The fingerprinting engine (decode, aHash, reference hash, assembly)
//! - `error` - Error types
//! - `cli` - Command-line interface (binary only)
//!
//! ## Example
//! ```rust,ignore
//! use image_fingerprint::core::Fingerprinter;
//!
//! let fingerprinter = Fingerprinter::default();
//! let fingerprint = fingerprinter.fingerprint(&std::fs::read("photo.jpg")?)?;
//! ```

pub mod core;
pub mod error;

// Re-export commonly used types at the crate root
pub use error::{FingerprintError, HashError, Result};

/// Initialize tracing for the library
///
/// This should be called by the application entry point.
pub fn init_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set global default tracing subscriber");
}
