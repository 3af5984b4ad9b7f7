//! Error types for HQR archive operations.
//!
//! All fallible operations in this crate return [`Result<T>`], an alias for
//! `std::result::Result<T, Error>`.
//!
//! # Recoverable vs. fatal errors
//!
//! HQR archives are required game assets, so most callers treat an
//! [`Error::Io`] from a read as fatal. [`Error::InvalidIndex`] is different:
//! several legacy callers probe for entries that legitimately do not exist
//! (e.g. optional voice samples), so an out-of-range index is a recoverable
//! "entry absent" condition. Use [`Error::is_recoverable`] to distinguish
//! the two without matching every variant:
//!
//! ```rust,no_run
//! fn load_optional(path: &str, index: u32) -> hqr::Result<Option<Vec<u8>>> {
//!     match hqr::read_entry_vec(path, index) {
//!         Ok(data) => Ok(Some(data)),
//!         Err(e) if e.is_recoverable() => Ok(None),
//!         Err(e) => Err(e),
//!     }
//! }
//! ```

use std::io;

/// The error type for HQR archive operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An I/O error occurred while opening or reading the container file.
    ///
    /// This wraps [`std::io::Error`] and covers missing files, permission
    /// problems, and short reads (`UnexpectedEof`) caused by truncation.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The requested entry index is outside `0..entry_count`.
    ///
    /// This is the recoverable "entry absent" case; no bytes are written to
    /// the caller's buffer when it is returned.
    #[error("entry index {index} out of range (archive has {count} entries)")]
    InvalidIndex {
        /// The index that was requested.
        index: u32,
        /// The number of entries in the archive.
        count: u32,
    },

    /// The caller-supplied buffer is smaller than the entry's real size.
    #[error("output buffer too small: entry needs {needed} bytes, buffer holds {available}")]
    BufferTooSmall {
        /// The entry's decompressed size.
        needed: usize,
        /// The capacity the caller provided.
        available: usize,
    },

    /// An entry header declares a compression mode other than 0, 1 or 2.
    #[error("unsupported compression mode {mode}")]
    UnsupportedMode {
        /// The raw mode value found in the entry header.
        mode: u16,
    },

    /// The container or a compressed payload is malformed.
    ///
    /// Returned when the directory is impossibly small, a compressed stream
    /// is truncated mid-token, or a back-reference points before the start
    /// of the output.
    #[error("corrupt archive data at offset {offset}: {reason}")]
    CorruptData {
        /// Byte offset where decoding failed. For payload errors this is
        /// relative to the start of the compressed payload.
        offset: usize,
        /// What was wrong at that offset.
        reason: &'static str,
    },

    /// An allocating read variant failed to reserve memory for the entry.
    #[error("failed to allocate {bytes} bytes for entry data")]
    Allocation {
        /// The number of bytes that could not be allocated.
        bytes: usize,
    },
}

impl Error {
    /// Returns `true` for failures a caller may treat as "entry absent".
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::InvalidIndex { .. })
    }

    /// Returns `true` if the error indicates a damaged or invalid container.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            Error::CorruptData { .. } | Error::UnsupportedMode { .. }
        )
    }
}

/// A specialized `Result` type for HQR operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_index_is_recoverable() {
        let err = Error::InvalidIndex { index: 5, count: 3 };
        assert!(err.is_recoverable());
        assert!(!err.is_corruption());
    }

    #[test]
    fn io_is_not_recoverable() {
        let err = Error::Io(io::Error::new(io::ErrorKind::NotFound, "missing"));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn corruption_predicate() {
        assert!(Error::UnsupportedMode { mode: 7 }.is_corruption());
        assert!(
            Error::CorruptData {
                offset: 0,
                reason: "truncated"
            }
            .is_corruption()
        );
    }

    #[test]
    fn display_messages() {
        let err = Error::InvalidIndex { index: 9, count: 4 };
        assert_eq!(
            err.to_string(),
            "entry index 9 out of range (archive has 4 entries)"
        );
        let err = Error::UnsupportedMode { mode: 3 };
        assert_eq!(err.to_string(), "unsupported compression mode 3");
    }
}
