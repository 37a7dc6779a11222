//! The six QOI chunk forms, as a closed tagged variant, plus the packing and
//! parsing logic shared by the encoder and decoder.
//!
//! Keeping this as one `match`-exhaustive enum (rather than the stringly-typed
//! dispatch of the format's reference implementations) means the compiler
//! flags any chunk form the encoder's precedence rule or the decoder's
//! dispatch forgets to handle.

use crate::error::DecodeError;

pub const TAG_RGB: u8 = 0xFE;
pub const TAG_RGBA: u8 = 0xFF;
pub const TAG_INDEX: u8 = 0x00; // top 2 bits
pub const TAG_DIFF: u8 = 0x40; // top 2 bits
pub const TAG_LUMA: u8 = 0x80; // top 2 bits
pub const TAG_RUN: u8 = 0xC0; // top 2 bits
const TWO_BIT_MASK: u8 = 0xC0;

/// Maximum run length a single `QOI_OP_RUN` chunk can carry. 63 and 64 are
/// reserved by `QOI_OP_RGB`/`QOI_OP_RGBA`.
pub const MAX_RUN: u8 = 62;

/// One decoded (or about-to-be-encoded) chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chunk {
    Index { index: u8 },
    Diff { dr: i8, dg: i8, db: i8 },
    Luma { dg: i8, dr_dg: i8, db_dg: i8 },
    Run { length: u8 },
    Rgb { r: u8, g: u8, b: u8 },
    Rgba { r: u8, g: u8, b: u8, a: u8 },
}

impl Chunk {
    /// Appends this chunk's packed bytes to `out`.
    pub fn write_to(self, out: &mut Vec<u8>) {
        match self {
            Chunk::Index { index } => {
                debug_assert!(index <= 63, "QOI_OP_INDEX allowed range is [0, 63]");
                out.push(TAG_INDEX | index);
            }
            Chunk::Diff { dr, dg, db } => {
                debug_assert!(
                    (-2..=1).contains(&dr) && (-2..=1).contains(&dg) && (-2..=1).contains(&db),
                    "QOI_OP_DIFF all deltas must be in range [-2, 1]"
                );
                let br = bias(dr, 2);
                let bg = bias(dg, 2);
                let bb = bias(db, 2);
                out.push(TAG_DIFF | (br << 4) | (bg << 2) | bb);
            }
            Chunk::Luma { dg, dr_dg, db_dg } => {
                debug_assert!(
                    (-32..=31).contains(&dg),
                    "QOI_OP_LUMA green delta must be in range [-32, 31]"
                );
                debug_assert!(
                    (-8..=7).contains(&dr_dg) && (-8..=7).contains(&db_dg),
                    "QOI_OP_LUMA red, blue offsets from green must be in range [-8, 7]"
                );
                let bg = bias(dg, 32);
                let br = bias(dr_dg, 8);
                let bb = bias(db_dg, 8);
                out.push(TAG_LUMA | bg);
                out.push((br << 4) | bb);
            }
            Chunk::Run { length } => {
                debug_assert!(
                    (1..=MAX_RUN).contains(&length),
                    "QOI_OP_RUN allowed range is [1, 62]"
                );
                out.push(TAG_RUN | (length - 1));
            }
            Chunk::Rgb { r, g, b } => {
                out.push(TAG_RGB);
                out.push(r);
                out.push(g);
                out.push(b);
            }
            Chunk::Rgba { r, g, b, a } => {
                out.push(TAG_RGBA);
                out.push(r);
                out.push(g);
                out.push(b);
                out.push(a);
            }
        }
    }

    /// Parses the chunk beginning at `bytes[0]`, returning it and the number
    /// of bytes consumed.
    ///
    /// 8-bit tags (`0xFE`, `0xFF`) are checked before the 2-bit tags, since
    /// both have their top two bits set to `11` and would otherwise be
    /// mistaken for `QOI_OP_RUN` with an illegal length of 63 or 64.
    pub fn parse(bytes: &[u8], offset: usize) -> Result<(Chunk, usize), DecodeError> {
        let need = |n: usize| -> Result<(), DecodeError> {
            if bytes.len() < offset + n {
                Err(DecodeError::TruncatedInput {
                    offset,
                    needed: offset + n - bytes.len(),
                })
            } else {
                Ok(())
            }
        };

        need(1)?;
        let tag = bytes[offset];

        if tag == TAG_RGB {
            need(4)?;
            return Ok((
                Chunk::Rgb {
                    r: bytes[offset + 1],
                    g: bytes[offset + 2],
                    b: bytes[offset + 3],
                },
                4,
            ));
        }
        if tag == TAG_RGBA {
            need(5)?;
            return Ok((
                Chunk::Rgba {
                    r: bytes[offset + 1],
                    g: bytes[offset + 2],
                    b: bytes[offset + 3],
                    a: bytes[offset + 4],
                },
                5,
            ));
        }

        match tag & TWO_BIT_MASK {
            TAG_INDEX => Ok((
                Chunk::Index {
                    index: tag & 0x3F,
                },
                1,
            )),
            TAG_DIFF => {
                let dr = unbias((tag >> 4) & 0x03, 2);
                let dg = unbias((tag >> 2) & 0x03, 2);
                let db = unbias(tag & 0x03, 2);
                Ok((Chunk::Diff { dr, dg, db }, 1))
            }
            TAG_LUMA => {
                need(2)?;
                let b2 = bytes[offset + 1];
                let dg = unbias(tag & 0x3F, 32);
                let dr_dg = unbias((b2 >> 4) & 0x0F, 8);
                let db_dg = unbias(b2 & 0x0F, 8);
                Ok((
                    Chunk::Luma {
                        dg,
                        dr_dg,
                        db_dg,
                    },
                    2,
                ))
            }
            TAG_RUN => Ok((
                Chunk::Run {
                    length: (tag & 0x3F) + 1,
                },
                1,
            )),
            _ => unreachable!("top 2 bits only take 4 values, all handled above"),
        }
    }
}

/// Wraps a signed delta in `[-bound, bound-1]` into an unsigned value in
/// `[0, 2*bound-1]` by adding `bound`.
fn bias(value: i8, bound: i16) -> u8 {
    (value as i16 + bound) as u8
}

/// Inverse of [`bias`]: given a `width`-bit unsigned field and its bias, recovers
/// the signed delta.
fn unbias(value: u8, bound: i16) -> i8 {
    (value as i16 - bound) as i8
}

/// Interprets `current.wrapping_sub(previous)` as an 8-bit two's-complement delta.
#[inline]
pub fn wrapping_delta(current: u8, previous: u8) -> i8 {
    current.wrapping_sub(previous) as i8
}

/// Applies a signed delta to a channel with 8-bit wrap-around.
#[inline]
pub fn apply_delta(base: u8, delta: i8) -> u8 {
    base.wrapping_add(delta as u8)
}

/// Tries to express `(dr, dg, db)` as `QOI_OP_DIFF`; `None` if any component
/// falls outside `[-2, 1]`.
pub fn try_diff(dr: i8, dg: i8, db: i8) -> Option<Chunk> {
    if (-2..=1).contains(&dr) && (-2..=1).contains(&dg) && (-2..=1).contains(&db) {
        Some(Chunk::Diff { dr, dg, db })
    } else {
        None
    }
}

/// Tries to express `(dr, dg, db)` as `QOI_OP_LUMA`; `None` if the green delta
/// falls outside `[-32, 31]` or either red/blue-relative-to-green offset falls
/// outside `[-8, 7]`.
pub fn try_luma(dr: i8, dg: i8, db: i8) -> Option<Chunk> {
    let dr_dg = dr.wrapping_sub(dg);
    let db_dg = db.wrapping_sub(dg);
    if (-32..=31).contains(&dg) && (-8..=7).contains(&dr_dg) && (-8..=7).contains(&db_dg) {
        Some(Chunk::Luma { dg, dr_dg, db_dg })
    } else {
        None
    }
}
