//! Nibble / hex digit conversion and bit-plane packing.
//!
//! Fingerprints written by earlier releases were packed with a formula that
//! reads the third bit of every group twice and never reads the fourth.
//! [`NibblePacking::Legacy`] reproduces that bit-for-bit and stays the
//! default so new fingerprints compare against stored ones.
//! [`NibblePacking::Exact`] is the true 4-bit pack; fingerprints produced
//! with it are NOT comparable with legacy ones.

use crate::error::HashError;
use serde::{Deserialize, Serialize};

/// Character emitted for a group value outside `[0, 15]`.
pub const UNMAPPED_NIBBLE: char = ' ';

/// How four bit-plane entries are folded into one hex digit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NibblePacking {
    /// `b0*8 + b1*4 + b2*2 + b2`, compatible with stored fingerprints
    #[default]
    Legacy,
    /// `b0*8 + b1*4 + b2*2 + b3`
    Exact,
}

impl std::fmt::Display for NibblePacking {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NibblePacking::Legacy => write!(f, "legacy"),
            NibblePacking::Exact => write!(f, "exact"),
        }
    }
}

/// Map a value in `[0, 15]` to its lowercase hex digit.
///
/// Anything else yields [`UNMAPPED_NIBBLE`].
pub fn nibble_to_hex(nibble: u32) -> char {
    std::char::from_digit(nibble, 16).unwrap_or(UNMAPPED_NIBBLE)
}

/// Decode each hex digit to its zero-padded 4-bit binary form.
///
/// Upper- and lowercase digits are both accepted.
pub fn hex_to_binary(hex: &str) -> Result<String, HashError> {
    let mut binary = String::with_capacity(hex.len() * 4);

    for (position, digit) in hex.chars().enumerate() {
        let value = digit
            .to_digit(16)
            .ok_or(HashError::InvalidHexDigit { digit, position })?;
        binary.push_str(&format!("{:04b}", value));
    }

    Ok(binary)
}

/// Fold one group of four bit-plane entries into a hex character.
///
/// Entries are not restricted to 0/1: reference hashes may carry any
/// decimal digit, and a group whose value exceeds 15 maps to
/// [`UNMAPPED_NIBBLE`].
pub fn pack_quad_to_hex(quad: [u8; 4], packing: NibblePacking) -> char {
    let [b0, b1, b2, b3] = quad.map(u32::from);
    let value = match packing {
        NibblePacking::Legacy => b0 * 8 + b1 * 4 + b2 * 2 + b2,
        NibblePacking::Exact => b0 * 8 + b1 * 4 + b2 * 2 + b3,
    };
    nibble_to_hex(value)
}

/// Pack a bit plane into hex, four entries per character.
///
/// A trailing group shorter than four reads its missing entries as 0.
pub fn pack_bits(bits: &[u8], packing: NibblePacking) -> String {
    bits.chunks(4)
        .map(|chunk| {
            let mut quad = [0u8; 4];
            quad[..chunk.len()].copy_from_slice(chunk);
            pack_quad_to_hex(quad, packing)
        })
        .collect()
}
