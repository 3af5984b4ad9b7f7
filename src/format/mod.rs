//! HQR container layout: directory table and per-entry headers.
//!
//! An HQR file is a flat container:
//!
//! | Offset | Field | Size | Meaning |
//! |---|---|---|---|
//! | 0 | directory size | 4 | `(entry_count + 1) * 4` |
//! | `4*i` | data offset of entry `i` | 4 | absolute offset of the entry header |
//! | offset | real size | 4 | decompressed length |
//! | offset+4 | compressed size | 4 | on-disk payload length |
//! | offset+8 | mode | 2 | 0 = stored, 1/2 = compressed |
//! | offset+10 | payload | — | entry bytes |
//!
//! All integers are little-endian. The first directory word doubles as the
//! offset of entry 0's header (the directory ends where the data begins),
//! and the directory carries one trailing slot past the last entry, so
//! `entry_count = first_word / 4 - 1`.
//!
//! "Hidden" sub-entries are chained directly after a base entry's payload:
//! each hop advances by `compressed_size + 10` and lands on another full
//! 10-byte header. Hidden entries never appear in the directory; the VOX
//! voice archives use them for localized variants of a sample.

pub mod reader;

use std::io::Read;

use crate::error::{Error, Result};
use reader::{read_u16_le, read_u32_le};

/// Size in bytes of an entry header (real size + compressed size + mode).
pub const ENTRY_HEADER_SIZE: u64 = 10;

/// Per-entry storage selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompressionKind {
    /// Mode 0: the payload is the entry's bytes, stored verbatim.
    Stored,
    /// Mode 1: back-reference compression with minimum match length 2.
    Lz1,
    /// Mode 2: back-reference compression with minimum match length 3.
    Lz2,
}

impl CompressionKind {
    /// Parses the raw 16-bit mode field of an entry header.
    ///
    /// Values outside {0, 1, 2} are not part of the format and are
    /// rejected as [`Error::UnsupportedMode`].
    pub fn from_mode(mode: u16) -> Result<Self> {
        match mode {
            0 => Ok(CompressionKind::Stored),
            1 => Ok(CompressionKind::Lz1),
            2 => Ok(CompressionKind::Lz2),
            _ => Err(Error::UnsupportedMode { mode }),
        }
    }

    /// Returns the raw mode value written to an entry header.
    pub fn mode(self) -> u16 {
        match self {
            CompressionKind::Stored => 0,
            CompressionKind::Lz1 => 1,
            CompressionKind::Lz2 => 2,
        }
    }

    /// Minimum back-reference match length, `None` for stored entries.
    ///
    /// A reference token stores `match_length - min_match` in its low
    /// 4 bits, so the minimum is also the length bias.
    pub fn min_match(self) -> Option<usize> {
        match self {
            CompressionKind::Stored => None,
            CompressionKind::Lz1 => Some(2),
            CompressionKind::Lz2 => Some(3),
        }
    }
}

/// A decoded 10-byte entry header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryHeader {
    /// Exact decompressed length of the entry.
    pub real_size: u32,
    /// On-disk payload length for compressed entries. Stored entries keep
    /// it equal to `real_size`; hidden-chain hops use it either way.
    pub compressed_size: u32,
    /// How the payload is stored.
    pub kind: CompressionKind,
}

impl EntryHeader {
    /// Reads the three header fields from the current position of `r`.
    pub fn read_from<R: Read>(r: &mut R) -> Result<Self> {
        let real_size = read_u32_le(r)?;
        let compressed_size = read_u32_le(r)?;
        let kind = CompressionKind::from_mode(read_u16_le(r)?)?;
        Ok(EntryHeader {
            real_size,
            compressed_size,
            kind,
        })
    }

    /// Number of payload bytes following this header on disk.
    pub fn payload_len(&self) -> u32 {
        match self.kind {
            CompressionKind::Stored => self.real_size,
            _ => self.compressed_size,
        }
    }
}
