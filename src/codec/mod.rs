//! Compression codec for HQR entry payloads.
//!
//! HQR uses a single byte-oriented back-reference scheme in two variants
//! that differ only in their minimum match length (mode 1: 2 bytes,
//! mode 2: 3 bytes), plus verbatim storage (mode 0). The codec is pure:
//! it works on in-memory slices and performs no I/O.

mod lz;

pub use lz::{compress, decompress};
