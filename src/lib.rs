//! # hqr
//!
//! A pure-Rust reader (and writer) for the HQR resource container format
//! used by the Little Big Adventure games to store graphics, audio, video,
//! scripts and voice data.
//!
//! An HQR file is a flat container: a directory of 4-byte little-endian
//! offsets, followed by one 10-byte header per entry (decompressed size,
//! on-disk size, compression mode) and its payload. Payloads are either
//! stored verbatim or compressed with a byte-oriented back-reference
//! scheme in two variants. Voice archives additionally chain "hidden"
//! sub-entries after a base entry's payload, reached by walking the file
//! rather than the directory.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! fn main() -> hqr::Result<()> {
//!     let count = hqr::entry_count("ress.hqr")?;
//!     println!("{count} entries");
//!
//!     // Decode into an exactly-sized buffer.
//!     let palette = hqr::read_entry_vec("ress.hqr", 0)?;
//!
//!     // Or into a caller-managed buffer.
//!     let size = hqr::entry_size("ress.hqr", 1)? as usize;
//!     let mut buf = vec![0u8; size];
//!     let produced = hqr::read_entry(&mut buf, "ress.hqr", 1)?;
//!     assert_eq!(produced, size);
//!
//!     // Localized voice sample: third hidden variant of entry 42.
//!     let voice = hqr::read_hidden_entry_vec("voices.vox", 42, 2)?;
//!     # let _ = (palette, voice);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T>`]. An out-of-range index is the one
//! recoverable failure ([`Error::is_recoverable`]): legacy callers probe
//! for entries that legitimately do not exist and treat the miss as
//! "entry absent". Everything else — missing files, truncated containers,
//! unknown compression modes, malformed payloads — is reported through
//! the remaining [`Error`] variants and left to the caller to escalate.
//!
//! ## Minimum Supported Rust Version (MSRV)
//!
//! This crate requires **Rust 1.85** or later.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod error;
pub mod format;
pub mod read;
pub mod write;

pub use error::{Error, Result};
pub use format::{CompressionKind, ENTRY_HEADER_SIZE, EntryHeader};

// Re-export the entry-resolution API at the crate root for convenience.
pub use read::{
    entry_count, entry_size, hidden_entry_size, read_entry, read_entry_vec, read_hidden_entry,
    read_hidden_entry_vec,
};

pub use write::Writer;
