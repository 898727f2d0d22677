//! The fingerprint value and its debugging view.

use crate::core::hasher::hex_to_binary;
use crate::error::{FingerprintError, HashError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Separator between fingerprint fields
pub const FIELD_SEPARATOR: char = '|';

/// A computed image fingerprint.
///
/// Rendered as `<average_hash>|<reference_hash>|<height>|<width>`, with the
/// dimensions of the original image, not the resampled one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fingerprint {
    /// aHash segment, one hex digit per four bits
    pub average_hash: String,
    /// Packed reference hash segment
    pub reference_hash: String,
    /// Original image height in pixels
    pub height: u32,
    /// Original image width in pixels
    pub width: u32,
}

impl Fingerprint {
    /// Decode both hex segments to bit strings.
    ///
    /// Fails if a segment contains a non-hex character, which happens when
    /// the reference hash carried digits above 1.
    pub fn inspect(&self) -> Result<FingerprintBits, HashError> {
        Ok(FingerprintBits {
            average_bits: hex_to_binary(&self.average_hash)?,
            reference_bits: hex_to_binary(&self.reference_hash)?,
            height: self.height,
            width: self.width,
        })
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{sep}{}{sep}{}{sep}{}",
            self.average_hash,
            self.reference_hash,
            self.height,
            self.width,
            sep = FIELD_SEPARATOR
        )
    }
}

impl FromStr for Fingerprint {
    type Err = FingerprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| FingerprintError::InvalidFingerprint {
            value: s.to_string(),
            reason: reason.to_string(),
        };

        let fields: Vec<&str> = s.split(FIELD_SEPARATOR).collect();
        let [average_hash, reference_hash, height, width] = fields[..] else {
            return Err(invalid("expected four '|'-separated fields"));
        };

        if average_hash.is_empty() {
            return Err(invalid("average hash segment is empty"));
        }

        let height = height
            .parse()
            .map_err(|_| invalid("height is not a number"))?;
        let width = width.parse().map_err(|_| invalid("width is not a number"))?;

        Ok(Self {
            average_hash: average_hash.to_string(),
            reference_hash: reference_hash.to_string(),
            height,
            width,
        })
    }
}

/// A fingerprint with both segments expanded to `0`/`1` strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FingerprintBits {
    pub average_bits: String,
    pub reference_bits: String,
    pub height: u32,
    pub width: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Fingerprint {
        Fingerprint {
            average_hash: "ffffffffffffffff".to_string(),
            reference_hash: "a14aa1dbdb818f9750".to_string(),
            height: 480,
            width: 640,
        }
    }

    #[test]
    fn display_orders_height_before_width() {
        assert_eq!(
            sample().to_string(),
            "ffffffffffffffff|a14aa1dbdb818f9750|480|640"
        );
    }

    #[test]
    fn parses_its_own_output() {
        let parsed: Fingerprint = sample().to_string().parse().unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn rejects_wrong_field_count() {
        let result = "abcd|1234|10".parse::<Fingerprint>();
        assert!(matches!(
            result,
            Err(FingerprintError::InvalidFingerprint { .. })
        ));
    }

    #[test]
    fn rejects_empty_sentinel() {
        assert!("".parse::<Fingerprint>().is_err());
        assert!("|0|10|10".parse::<Fingerprint>().is_err());
    }

    #[test]
    fn rejects_non_numeric_dimensions() {
        let err = "abcd|1234|tall|10".parse::<Fingerprint>().unwrap_err();
        assert!(err.to_string().contains("height"));
    }

    #[test]
    fn inspect_expands_segments() {
        let fingerprint = Fingerprint {
            average_hash: "a0".to_string(),
            reference_hash: "f".to_string(),
            height: 8,
            width: 9,
        };

        let bits = fingerprint.inspect().unwrap();

        assert_eq!(bits.average_bits, "10100000");
        assert_eq!(bits.reference_bits, "1111");
        assert_eq!((bits.height, bits.width), (8, 9));
    }

    #[test]
    fn inspect_reports_unmapped_nibbles() {
        let fingerprint = Fingerprint {
            average_hash: "00".to_string(),
            reference_hash: "1 ".to_string(),
            height: 8,
            width: 8,
        };

        assert!(matches!(
            fingerprint.inspect(),
            Err(HashError::InvalidHexDigit {
                digit: ' ',
                position: 1
            })
        ));
    }
}
