//! The 14-byte QOI file header: magic, dimensions, channel count, colorspace tag.

use byteorder::{BigEndian, ReadBytesExt};
use std::io::Cursor;

use crate::error::DecodeError;

pub const HEADER_SIZE: usize = 14;
pub const MAGIC: [u8; 4] = *b"qoif";
pub const TERMINATOR: [u8; 8] = [0, 0, 0, 0, 0, 0, 0, 1];

/// Whether an image stores an alpha channel (`channels == 4`) or not (`channels == 3`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channels {
    Rgb = 3,
    Rgba = 4,
}

impl Channels {
    pub const fn has_alpha(self) -> bool {
        matches!(self, Channels::Rgba)
    }

    pub const fn from_has_alpha(has_alpha: bool) -> Self {
        if has_alpha {
            Channels::Rgba
        } else {
            Channels::Rgb
        }
    }

    pub const fn byte_value(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Channels {
    type Error = DecodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            3 => Ok(Channels::Rgb),
            4 => Ok(Channels::Rgba),
            other => Err(DecodeError::MalformedHeader(format!(
                "channels must be 3 or 4, got {other}"
            ))),
        }
    }
}

/// The colorspace tag. Purely informational: the codec never transforms
/// channel values based on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colorspace {
    Srgb = 0,
    Linear = 1,
}

impl Colorspace {
    pub const fn is_all_linear(self) -> bool {
        matches!(self, Colorspace::Linear)
    }

    pub const fn from_all_linear(all_linear: bool) -> Self {
        if all_linear {
            Colorspace::Linear
        } else {
            Colorspace::Srgb
        }
    }

    pub const fn byte_value(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Colorspace {
    type Error = DecodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Colorspace::Srgb),
            1 => Ok(Colorspace::Linear),
            other => Err(DecodeError::MalformedHeader(format!(
                "colorspace must be 0 or 1, got {other}"
            ))),
        }
    }
}

/// Parsed (or to-be-emitted) QOI file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub width: u32,
    pub height: u32,
    pub channels: Channels,
    pub colorspace: Colorspace,
}

impl Header {
    pub fn new(width: u32, height: u32, has_alpha: bool, all_linear: bool) -> Self {
        Header {
            width,
            height,
            channels: Channels::from_has_alpha(has_alpha),
            colorspace: Colorspace::from_all_linear(all_linear),
        }
    }

    pub const fn has_alpha(&self) -> bool {
        self.channels.has_alpha()
    }

    pub const fn all_linear(&self) -> bool {
        self.colorspace.is_all_linear()
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Parses the 14-byte header out of the front of `bytes`.
    ///
    /// Rejects: length < 14; magic mismatch; channels not in {3,4};
    /// colorspace not in {0,1}; width or height zero.
    pub fn parse(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.len() < HEADER_SIZE {
            return Err(DecodeError::MalformedHeader(format!(
                "need {HEADER_SIZE} header bytes, got {}",
                bytes.len()
            )));
        }

        let mut cursor = Cursor::new(&bytes[..HEADER_SIZE]);

        let mut magic = [0u8; 4];
        for slot in magic.iter_mut() {
            *slot = cursor
                .read_u8()
                .map_err(|e| DecodeError::MalformedHeader(e.to_string()))?;
        }
        if magic != MAGIC {
            return Err(DecodeError::MalformedHeader(format!(
                "magic bytes must be \"qoif\", got {magic:?}"
            )));
        }

        let width = cursor
            .read_u32::<BigEndian>()
            .map_err(|e| DecodeError::MalformedHeader(e.to_string()))?;
        let height = cursor
            .read_u32::<BigEndian>()
            .map_err(|e| DecodeError::MalformedHeader(e.to_string()))?;

        if width == 0 || height == 0 {
            return Err(DecodeError::MalformedHeader(
                "width and height must both be non-zero".to_string(),
            ));
        }

        let channels: Channels = cursor
            .read_u8()
            .map_err(|e| DecodeError::MalformedHeader(e.to_string()))?
            .try_into()?;
        let colorspace: Colorspace = cursor
            .read_u8()
            .map_err(|e| DecodeError::MalformedHeader(e.to_string()))?
            .try_into()?;

        Ok(Header {
            width,
            height,
            channels,
            colorspace,
        })
    }

    /// Packs the header into its canonical 14-byte encoding.
    pub fn to_bytes(self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        out[0..4].copy_from_slice(&MAGIC);
        out[4..8].copy_from_slice(&self.width.to_be_bytes());
        out[8..12].copy_from_slice(&self.height.to_be_bytes());
        out[12] = self.channels.byte_value();
        out[13] = self.colorspace.byte_value();
        out
    }
}
