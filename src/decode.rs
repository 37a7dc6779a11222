//! The decoder state machine: QOI byte stream in, flat RGBA pixel buffer out.
//!
//! Reworked from the teacher's `std::io::Read`-driven loop into an in-memory
//! slice-cursor loop, since the whole encoded stream is always available up
//! front (§1 Non-goals excludes incremental streaming decode) and explicit
//! cursor arithmetic makes the truncation/terminator checks exact instead of
//! relying on `read_exact`'s I/O error to surface truncation.

use crate::chunk::Chunk;
use crate::error::DecodeError;
use crate::header::{Header, TERMINATOR};
use crate::pixel::{Pixel, RunningIndex};

/// A fully decoded image: metadata plus `width * height` RGBA pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub has_alpha: bool,
    pub all_linear: bool,
    /// Always RGBA, regardless of `has_alpha` — callers drop alpha themselves
    /// when they only want RGB.
    pub pixels: Vec<u8>,
}

/// Decodes a complete QOI byte stream.
pub fn decode(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let header = Header::parse(bytes)?;
    let pixel_count = header.pixel_count();

    let mut cursor = crate::header::HEADER_SIZE;
    let mut index = RunningIndex::new();
    let mut previous = Pixel::initial();
    let mut pixels = Vec::with_capacity(pixel_count * 4);
    let mut produced = 0usize;

    while produced < pixel_count {
        // At least the 8-byte terminator must remain once every pixel chunk
        // has been consumed; a chunk tag appearing inside that trailing
        // window is truncated input, not terminator.
        if bytes.len() < cursor + 1 {
            return Err(DecodeError::TruncatedInput {
                offset: cursor,
                needed: cursor + 1 - bytes.len(),
            });
        }

        let (chunk, consumed) = Chunk::parse(bytes, cursor)?;
        cursor += consumed;

        match chunk {
            Chunk::Run { length } => {
                let remaining = pixel_count - produced;
                let take = (length as usize).min(remaining);
                for _ in 0..take {
                    pixels.extend_from_slice(&previous.to_rgba_bytes());
                }
                produced += take;
                // RunningIndex is untouched by a run: `previous` does not change.
            }
            Chunk::Index { index: slot } => {
                let current = index.get(slot);
                pixels.extend_from_slice(&current.to_rgba_bytes());
                previous = current;
                produced += 1;
                // The index path does not push: the slot already equals `current`.
            }
            Chunk::Diff { dr, dg, db } => {
                let current = Pixel::new(
                    crate::chunk::apply_delta(previous.r, dr),
                    crate::chunk::apply_delta(previous.g, dg),
                    crate::chunk::apply_delta(previous.b, db),
                    previous.a,
                );
                pixels.extend_from_slice(&current.to_rgba_bytes());
                index.push(current);
                previous = current;
                produced += 1;
            }
            Chunk::Luma { dg, dr_dg, db_dg } => {
                let dr = dg.wrapping_add(dr_dg);
                let db = dg.wrapping_add(db_dg);
                let current = Pixel::new(
                    crate::chunk::apply_delta(previous.r, dr),
                    crate::chunk::apply_delta(previous.g, dg),
                    crate::chunk::apply_delta(previous.b, db),
                    previous.a,
                );
                pixels.extend_from_slice(&current.to_rgba_bytes());
                index.push(current);
                previous = current;
                produced += 1;
            }
            Chunk::Rgb { r, g, b } => {
                let current = Pixel::new(r, g, b, previous.a);
                pixels.extend_from_slice(&current.to_rgba_bytes());
                index.push(current);
                previous = current;
                produced += 1;
            }
            Chunk::Rgba { r, g, b, a } => {
                let current = Pixel::new(r, g, b, a);
                pixels.extend_from_slice(&current.to_rgba_bytes());
                index.push(current);
                previous = current;
                produced += 1;
            }
        }
    }

    if produced != pixel_count || pixels.len() != pixel_count * 4 {
        return Err(DecodeError::PixelCountMismatch {
            expected: pixel_count,
            actual: produced,
        });
    }

    let tail = bytes.get(cursor..).ok_or(DecodeError::TruncatedInput {
        offset: cursor,
        needed: TERMINATOR.len(),
    })?;
    if tail != TERMINATOR {
        return Err(DecodeError::TerminatorMismatch);
    }

    Ok(DecodedImage {
        width: header.width,
        height: header.height,
        has_alpha: header.has_alpha(),
        all_linear: header.all_linear(),
        pixels,
    })
}
