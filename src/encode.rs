//! The encoder state machine: pixel sequence in, QOI byte stream out.
//!
//! No encoder exists in the reference crate this repository started from (it
//! ships decode-only); this module implements the complete algorithm from
//! scratch, in the teacher's plain, allocation-light, `match`-driven style.

use crate::chunk::{self, Chunk, MAX_RUN};
use crate::error::EncodeError;
use crate::header::{Header, TERMINATOR};
use crate::pixel::{Pixel, RunningIndex};

/// Encodes a flat pixel buffer into a QOI byte stream.
///
/// `pixels` must hold exactly `width * height` pixels, packed as 3 bytes
/// (RGB) per pixel when `has_alpha` is `false`, or 4 bytes (RGBA) per pixel
/// when `has_alpha` is `true`. Alpha is held fixed at 255 throughout when
/// `has_alpha` is `false`.
pub fn encode(
    pixels: &[u8],
    width: u32,
    height: u32,
    has_alpha: bool,
    all_linear: bool,
) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidMetadata(
            "width and height must both be non-zero".to_string(),
        ));
    }

    let bytes_per_pixel = if has_alpha { 4 } else { 3 };
    let pixel_count = width as usize * height as usize;
    let expected_len = pixel_count
        .checked_mul(bytes_per_pixel)
        .ok_or_else(|| EncodeError::InvalidMetadata("pixel buffer length overflows".to_string()))?;

    if pixels.len() != expected_len {
        return Err(EncodeError::InvalidMetadata(format!(
            "expected {expected_len} pixel bytes ({pixel_count} pixels * {bytes_per_pixel} bytes), got {}",
            pixels.len()
        )));
    }

    let header = Header::new(width, height, has_alpha, all_linear);
    let mut out = Vec::with_capacity(encoded_size_limit(width, height, has_alpha));
    out.extend_from_slice(&header.to_bytes());

    let mut index = RunningIndex::new();
    let mut previous = Pixel::initial();
    let mut run: u8 = 0;

    for raw in pixels.chunks_exact(bytes_per_pixel) {
        let current = if has_alpha {
            Pixel::new(raw[0], raw[1], raw[2], raw[3])
        } else {
            Pixel::new(raw[0], raw[1], raw[2], 255)
        };

        if current == previous {
            run += 1;
            if run == MAX_RUN {
                Chunk::Run { length: run }.write_to(&mut out);
                run = 0;
            }
            continue;
        }

        if run > 0 {
            Chunk::Run { length: run }.write_to(&mut out);
            run = 0;
        }

        let hash = current.hash();
        if index.get(hash) == current {
            Chunk::Index { index: hash }.write_to(&mut out);
            previous = current;
            continue;
        }

        let pick = if current.a == previous.a {
            let dr = chunk::wrapping_delta(current.r, previous.r);
            let dg = chunk::wrapping_delta(current.g, previous.g);
            let db = chunk::wrapping_delta(current.b, previous.b);
            chunk::try_diff(dr, dg, db)
                .or_else(|| chunk::try_luma(dr, dg, db))
                .unwrap_or(Chunk::Rgb {
                    r: current.r,
                    g: current.g,
                    b: current.b,
                })
        } else {
            Chunk::Rgba {
                r: current.r,
                g: current.g,
                b: current.b,
                a: current.a,
            }
        };
        pick.write_to(&mut out);

        index.push(current);
        previous = current;
    }

    if run > 0 {
        Chunk::Run { length: run }.write_to(&mut out);
    }

    out.extend_from_slice(&TERMINATOR);
    Ok(out)
}

/// Upper bound on the encoded size of an image with the given dimensions,
/// useful for preallocating the output buffer.
fn encoded_size_limit(width: u32, height: u32, has_alpha: bool) -> usize {
    let bytes_per_pixel = if has_alpha { 5 } else { 4 };
    width as usize * height as usize * bytes_per_pixel
        + crate::header::HEADER_SIZE
        + TERMINATOR.len()
}
