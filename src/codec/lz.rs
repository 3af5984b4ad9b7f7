//! Back-reference decompression for HQR entries (pure Rust).
//!
//! # Format
//!
//! The stream is a sequence of groups: one control byte followed by up to
//! eight tokens, one per control bit starting at bit 0.
//!
//! - Bit set: the token is a single literal byte, copied to the output.
//! - Bit clear: the token is a 16-bit little-endian reference word. The
//!   low 4 bits hold `match_length - min_match` (`min_match` is 2 for
//!   mode 1, 3 for mode 2) and the high 12 bits hold `distance - 1`,
//!   counted back from the current write position. The referenced bytes
//!   are copied forward one at a time, so a match may overlap its own
//!   output (`distance < match_length` repeats recent bytes).
//!
//! Decoding stops the instant the output reaches its target length, even
//! mid-group; trailing control bits are ignored. The encoded stream
//! carries no terminator and no length of its own.

use crate::error::{Error, Result};
use crate::format::CompressionKind;

/// Largest back-reference distance encodable in the 12-bit field.
const MAX_DISTANCE: usize = 4096;

/// Largest `match_length - min_match` encodable in the 4-bit field.
const MAX_LENGTH_EXTRA: usize = 15;

fn truncated(offset: usize) -> Error {
    Error::CorruptData {
        offset,
        reason: "compressed stream truncated",
    }
}

/// Decompresses `src` into `dst`, filling it completely.
///
/// `dst.len()` is the decompressed length; decoding stops exactly there
/// and never writes past the slice, even if the stream nominally encodes
/// more. For [`CompressionKind::Stored`] the payload is copied verbatim.
///
/// # Errors
///
/// Returns [`Error::CorruptData`] if the stream ends mid-token before the
/// output is full, or if a back-reference points before the start of the
/// output. The reported offset is relative to the start of `src`.
pub fn decompress(dst: &mut [u8], src: &[u8], kind: CompressionKind) -> Result<()> {
    let Some(min_match) = kind.min_match() else {
        if src.len() < dst.len() {
            return Err(truncated(src.len()));
        }
        dst.copy_from_slice(&src[..dst.len()]);
        return Ok(());
    };

    let mut pos = 0; // read cursor in src
    let mut out = 0; // write cursor in dst

    while out < dst.len() {
        let control = *src.get(pos).ok_or_else(|| truncated(pos))?;
        pos += 1;

        for bit in 0..8 {
            if out == dst.len() {
                break;
            }
            if control & (1 << bit) != 0 {
                dst[out] = *src.get(pos).ok_or_else(|| truncated(pos))?;
                pos += 1;
                out += 1;
            } else {
                let word = src
                    .get(pos..pos + 2)
                    .map(|b| u16::from_le_bytes([b[0], b[1]]))
                    .ok_or_else(|| truncated(pos))?;
                pos += 2;

                let length = (word & 0x0F) as usize + min_match;
                let distance = (word >> 4) as usize + 1;
                if distance > out {
                    return Err(Error::CorruptData {
                        offset: pos - 2,
                        reason: "back-reference before start of output",
                    });
                }

                // A malformed stream may encode a match running past the
                // target length; clamp rather than overrun.
                let length = length.min(dst.len() - out);
                for _ in 0..length {
                    dst[out] = dst[out - distance];
                    out += 1;
                }
            }
        }
    }

    Ok(())
}

/// Compresses `src` with a greedy longest-match search.
///
/// This is the reference encoder paired with [`decompress`]: it produces
/// streams the game engines' decoder accepts, favouring simplicity over
/// ratio. For [`CompressionKind::Stored`] the input is returned verbatim.
pub fn compress(src: &[u8], kind: CompressionKind) -> Vec<u8> {
    let Some(min_match) = kind.min_match() else {
        return src.to_vec();
    };
    let max_match = min_match + MAX_LENGTH_EXTRA;

    let mut out = Vec::with_capacity(src.len() / 2 + 16);
    let mut pos = 0;

    while pos < src.len() {
        let control_at = out.len();
        out.push(0);
        let mut control = 0u8;

        for bit in 0..8 {
            if pos == src.len() {
                break;
            }
            match find_match(src, pos, min_match, max_match) {
                Some((distance, length)) => {
                    let word = (((distance - 1) as u16) << 4) | (length - min_match) as u16;
                    out.extend_from_slice(&word.to_le_bytes());
                    pos += length;
                }
                None => {
                    control |= 1 << bit;
                    out.push(src[pos]);
                    pos += 1;
                }
            }
        }

        out[control_at] = control;
    }

    out
}

/// Finds the longest match for `src[pos..]` within the reference window.
///
/// Matches may overlap the current position: comparing against `src`
/// directly is sound because the decoder's output equals the input up to
/// `pos` when the match is applied.
fn find_match(
    src: &[u8],
    pos: usize,
    min_match: usize,
    max_match: usize,
) -> Option<(usize, usize)> {
    let remaining = src.len() - pos;
    if remaining < min_match {
        return None;
    }
    let limit = max_match.min(remaining);

    let mut best: Option<(usize, usize)> = None;
    for distance in 1..=MAX_DISTANCE.min(pos) {
        let start = pos - distance;
        let mut length = 0;
        while length < limit && src[start + length] == src[pos + length] {
            length += 1;
        }
        if length >= min_match && best.is_none_or(|(_, l)| length > l) {
            best = Some((distance, length));
            if length == limit {
                break;
            }
        }
    }
    best
}
