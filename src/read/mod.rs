//! Entry resolution: locating, sizing and decoding container entries.
//!
//! Every function takes a filesystem path and opens its own handle for the
//! duration of the call; there is no shared cursor or cache, so independent
//! reads may run concurrently without coordination. Callers that read many
//! entries can layer their own caching on top — correctness never depends
//! on it.
//!
//! # Example
//!
//! ```rust,no_run
//! fn main() -> hqr::Result<()> {
//!     let count = hqr::entry_count("ress.hqr")?;
//!     for index in 0..count {
//!         let data = hqr::read_entry_vec("ress.hqr", index)?;
//!         println!("entry {index}: {} bytes", data.len());
//!     }
//!     Ok(())
//! }
//! ```

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use crate::codec;
use crate::error::{Error, Result};
use crate::format::reader::{read_bytes, read_u32_le};
use crate::format::{CompressionKind, ENTRY_HEADER_SIZE, EntryHeader};

/// Returns the number of entries in the container at `path`.
pub fn entry_count(path: impl AsRef<Path>) -> Result<u32> {
    let mut file = File::open(path)?;
    read_entry_count(&mut file)
}

/// Returns the decompressed size of entry `index` without decoding it.
pub fn entry_size(path: impl AsRef<Path>, index: u32) -> Result<u32> {
    let mut file = File::open(path)?;
    let offset = locate_entry(&mut file, index)?;
    file.seek(SeekFrom::Start(offset))?;
    let header = EntryHeader::read_from(&mut file)?;
    Ok(header.real_size)
}

/// Decodes entry `index` into `buf` and returns the number of bytes
/// produced (the entry's real size).
///
/// `buf` must hold at least [`entry_size`] bytes; anything past the real
/// size is left untouched. Index validation happens before `buf` is
/// touched, so an [`Error::InvalidIndex`] writes no bytes.
pub fn read_entry(buf: &mut [u8], path: impl AsRef<Path>, index: u32) -> Result<usize> {
    let mut file = File::open(path)?;
    let offset = locate_entry(&mut file, index)?;
    file.seek(SeekFrom::Start(offset))?;
    let header = EntryHeader::read_from(&mut file)?;
    decode_payload(&mut file, &header, buf)
}

/// Decodes entry `index` into a freshly allocated buffer of exactly the
/// entry's real size.
pub fn read_entry_vec(path: impl AsRef<Path>, index: u32) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let size = entry_size(path, index)? as usize;
    let mut buf = alloc_entry_buffer(size)?;
    read_entry(&mut buf, path, index)?;
    Ok(buf)
}

/// Returns the decompressed size of hidden sub-entry `hidden_index` chained
/// after entry `index`.
///
/// `hidden_index == 0` is the base entry itself, equivalent to
/// [`entry_size`].
pub fn hidden_entry_size(path: impl AsRef<Path>, index: u32, hidden_index: u32) -> Result<u32> {
    let mut file = File::open(path)?;
    let header = locate_hidden_entry(&mut file, index, hidden_index)?;
    Ok(header.real_size)
}

/// Decodes hidden sub-entry `hidden_index` chained after entry `index`
/// into `buf`, returning the number of bytes produced.
///
/// `hidden_index == 0` is equivalent to [`read_entry`].
pub fn read_hidden_entry(
    buf: &mut [u8],
    path: impl AsRef<Path>,
    index: u32,
    hidden_index: u32,
) -> Result<usize> {
    let mut file = File::open(path)?;
    let header = locate_hidden_entry(&mut file, index, hidden_index)?;
    decode_payload(&mut file, &header, buf)
}

/// Decodes hidden sub-entry `hidden_index` chained after entry `index`
/// into a freshly allocated buffer of exactly its real size.
pub fn read_hidden_entry_vec(
    path: impl AsRef<Path>,
    index: u32,
    hidden_index: u32,
) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let size = hidden_entry_size(path, index, hidden_index)? as usize;
    let mut buf = alloc_entry_buffer(size)?;
    read_hidden_entry(&mut buf, path, index, hidden_index)?;
    Ok(buf)
}

/// Reads the leading directory word and derives the entry count.
fn read_entry_count(file: &mut File) -> Result<u32> {
    let directory_size = read_u32_le(file)?;
    (directory_size / 4)
        .checked_sub(1)
        .ok_or(Error::CorruptData {
            offset: 0,
            reason: "directory smaller than one slot",
        })
}

/// Validates `index` and returns the absolute offset of its entry header.
///
/// Leaves the file cursor just past the directory slot. Note that slot 0
/// is the directory-size word itself: the directory ends where entry 0
/// begins, so the first word serves both purposes.
fn locate_entry(file: &mut File, index: u32) -> Result<u64> {
    let count = read_entry_count(file)?;
    if index >= count {
        log::warn!("HQR: entry index {index} out of range (archive has {count} entries)");
        return Err(Error::InvalidIndex { index, count });
    }
    file.seek(SeekFrom::Start(u64::from(index) * 4))?;
    Ok(u64::from(read_u32_le(file)?))
}

/// Walks the hidden-entry chain `hidden_index` hops past the base entry.
///
/// Each hop skips the current payload plus the 10-byte header. The full
/// header, mode included, is re-read at every hop; the legacy size-only
/// query skipped the mode field, which never affected the walk and is not
/// worth reproducing.
///
/// Leaves the file cursor at the start of the target payload.
fn locate_hidden_entry(file: &mut File, index: u32, hidden_index: u32) -> Result<EntryHeader> {
    let mut offset = locate_entry(file, index)?;
    file.seek(SeekFrom::Start(offset))?;
    let mut header = EntryHeader::read_from(file)?;

    for _ in 0..hidden_index {
        offset += u64::from(header.compressed_size) + ENTRY_HEADER_SIZE;
        file.seek(SeekFrom::Start(offset))?;
        header = EntryHeader::read_from(file)?;
    }

    Ok(header)
}

/// Reads the payload following `header` from `file` and decodes it into
/// the front of `buf`.
fn decode_payload(file: &mut File, header: &EntryHeader, buf: &mut [u8]) -> Result<usize> {
    let real_size = header.real_size as usize;
    if buf.len() < real_size {
        return Err(Error::BufferTooSmall {
            needed: real_size,
            available: buf.len(),
        });
    }
    let dst = &mut buf[..real_size];

    match header.kind {
        CompressionKind::Stored => file.read_exact(dst)?,
        kind => {
            let staging = read_bytes(file, header.compressed_size as usize)?;
            codec::decompress(dst, &staging, kind)?;
        }
    }

    Ok(real_size)
}

/// Allocates a zeroed buffer of exactly `size` bytes, surfacing allocation
/// failure as an error instead of aborting.
fn alloc_entry_buffer(size: usize) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(size)
        .map_err(|_| Error::Allocation { bytes: size })?;
    buf.resize(size, 0);
    Ok(buf)
}
