//! Building HQR containers.
//!
//! The original engines only ever read HQR files, but a writer is needed
//! to round-trip the format in tests and to repack modified assets. The
//! writer buffers entries in memory and emits the directory, headers and
//! payloads in one pass.
//!
//! # Example
//!
//! ```rust,no_run
//! use hqr::{CompressionKind, Writer};
//!
//! fn main() -> hqr::Result<()> {
//!     let mut writer = Writer::new();
//!     writer.add_entry(b"palette data", CompressionKind::Stored);
//!     writer.add_entry(b"script bytecode", CompressionKind::Lz1);
//!     writer.write_path("out.hqr")?;
//!     Ok(())
//! }
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::codec;
use crate::error::Result;
use crate::format::{CompressionKind, ENTRY_HEADER_SIZE, EntryHeader};

/// One packed blob: a header plus its on-disk payload.
#[derive(Debug, Clone)]
struct Blob {
    header: EntryHeader,
    payload: Vec<u8>,
}

impl Blob {
    fn pack(data: &[u8], kind: CompressionKind) -> Self {
        let payload = codec::compress(data, kind);
        Blob {
            header: EntryHeader {
                real_size: data.len() as u32,
                compressed_size: payload.len() as u32,
                kind,
            },
            payload,
        }
    }

    fn disk_len(&self) -> u64 {
        ENTRY_HEADER_SIZE + self.payload.len() as u64
    }
}

/// Builds an HQR container entry by entry.
///
/// Directory entries are written in insertion order. Hidden sub-entries
/// attach to the most recently added entry and follow its payload on disk
/// without a directory slot of their own.
#[derive(Debug, Default)]
pub struct Writer {
    /// Each directory entry with its chain of hidden sub-entries.
    entries: Vec<Vec<Blob>>,
}

impl Writer {
    /// Creates an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a directory entry, returning its index.
    pub fn add_entry(&mut self, data: &[u8], kind: CompressionKind) -> u32 {
        self.entries.push(vec![Blob::pack(data, kind)]);
        (self.entries.len() - 1) as u32
    }

    /// Chains a hidden sub-entry after the most recently added entry.
    ///
    /// # Panics
    ///
    /// Panics if no entry has been added yet; a hidden entry cannot exist
    /// without a base.
    pub fn add_hidden_entry(&mut self, data: &[u8], kind: CompressionKind) {
        let chain = self
            .entries
            .last_mut()
            .expect("hidden entry requires a base entry");
        chain.push(Blob::pack(data, kind));
    }

    /// Number of directory entries added so far.
    pub fn len(&self) -> u32 {
        self.entries.len() as u32
    }

    /// Returns `true` if no entries have been added.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serializes the container to `w`.
    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<()> {
        // Directory: one slot per entry plus the trailing end-offset slot.
        // Slot 0 doubles as the directory size, which is also where entry
        // 0's header starts.
        let directory_size = (self.entries.len() as u64 + 1) * 4;

        let mut offset = directory_size;
        for chain in &self.entries {
            w.write_all(&(offset as u32).to_le_bytes())?;
            offset += chain.iter().map(Blob::disk_len).sum::<u64>();
        }
        // Trailing slot: end of the last entry's data.
        w.write_all(&(offset as u32).to_le_bytes())?;

        for chain in &self.entries {
            for blob in chain {
                w.write_all(&blob.header.real_size.to_le_bytes())?;
                w.write_all(&blob.header.compressed_size.to_le_bytes())?;
                w.write_all(&blob.header.kind.mode().to_le_bytes())?;
                w.write_all(&blob.payload)?;
            }
        }

        Ok(())
    }

    /// Serializes the container to a byte vector.
    pub fn to_vec(&self) -> Vec<u8> {
        let mut out = Vec::new();
        // Writing to a Vec cannot fail.
        self.write_to(&mut out).expect("in-memory write");
        out
    }

    /// Serializes the container to a file at `path`.
    pub fn write_path(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = BufWriter::new(File::create(path)?);
        self.write_to(&mut file)?;
        file.flush()?;
        Ok(())
    }
}
