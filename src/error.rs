//! Typed error hierarchy for the codec and its PPM collaborator.
//!
//! Split into one enum per direction (encode/decode/ppm) rather than a single
//! grab-bag type, so a caller matching on `Result<_, DecodeError>` is never
//! forced to handle encode-only variants.

use thiserror::Error;

/// Errors returned by [`crate::encode`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    /// Pixel buffer length does not match `width * height * bytes_per_pixel`,
    /// or width/height is zero, or channel/colorspace metadata is out of range.
    #[error("invalid metadata: {0}")]
    InvalidMetadata(String),
}

/// Errors returned by [`crate::decode`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// Header failed validation: bad magic, bad channels/colorspace, or zero dimensions.
    #[error("malformed header: {0}")]
    MalformedHeader(String),

    /// A chunk's tag byte was present but its operand bytes were not.
    #[error("truncated input: expected {needed} more byte(s) at offset {offset}")]
    TruncatedInput { offset: usize, needed: usize },

    /// The final 8 bytes of the stream were not the canonical terminator.
    #[error("terminator mismatch: expected 00 00 00 00 00 00 00 01")]
    TerminatorMismatch,

    /// Decoding produced a different pixel count than `width * height` implies.
    #[error("pixel count mismatch: expected {expected}, got {actual}")]
    PixelCountMismatch { expected: usize, actual: usize },
}

/// Errors returned by [`crate::ppm::ppm_read`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PpmError {
    #[error("bad PPM magic: expected \"P6\", got {0:?}")]
    BadMagic(String),

    #[error("unsupported PPM maxval: {0} (only 255 is supported)")]
    UnsupportedMaxval(u32),

    #[error("malformed PPM header: {0}")]
    MalformedHeader(String),

    #[error("truncated PPM pixel data: expected {expected} bytes, got {actual}")]
    TruncatedPixelData { expected: usize, actual: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_error_display_is_non_empty() {
        let e = EncodeError::InvalidMetadata("width is zero".into());
        assert!(!e.to_string().is_empty());
        assert!(e.to_string().contains("width is zero"));
    }

    #[test]
    fn decode_error_variants_display_non_empty() {
        let variants = [
            DecodeError::MalformedHeader("bad magic".into()),
            DecodeError::TruncatedInput {
                offset: 14,
                needed: 3,
            },
            DecodeError::TerminatorMismatch,
            DecodeError::PixelCountMismatch {
                expected: 4,
                actual: 3,
            },
        ];
        for v in variants {
            assert!(!v.to_string().is_empty());
        }
    }

    #[test]
    fn ppm_error_variants_display_non_empty() {
        let variants = [
            PpmError::BadMagic("P3".into()),
            PpmError::UnsupportedMaxval(65535),
            PpmError::MalformedHeader("missing maxval".into()),
            PpmError::TruncatedPixelData {
                expected: 12,
                actual: 6,
            },
        ];
        for v in variants {
            assert!(!v.to_string().is_empty());
        }
    }
}
