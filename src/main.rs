//! # image-fingerprint CLI
//!
//! Command-line interface for image fingerprinting.
//!
//! ## Usage
//! ```bash
//! image-fingerprint hash ~/Photos --recursive
//! image-fingerprint decode a14aa1dbdb818f97
//! ```

mod cli;

use image_fingerprint::Result;

fn main() -> Result<()> {
    image_fingerprint::init_tracing();
    cli::run()
}
