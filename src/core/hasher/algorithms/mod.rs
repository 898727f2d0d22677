//! Hash algorithm implementations.

mod average;
mod perceptual;

pub use average::{AverageHasher, SizeWindow, DEFAULT_GRID_SIZE};
pub use perceptual::PerceptualHasher;
