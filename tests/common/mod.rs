//! Shared test utilities for integration tests.
//!
//! Note: `#![allow(dead_code)]` is required because each integration test
//! file compiles as a separate crate and may only use a subset of these
//! helpers.

#![allow(dead_code)]

use std::io::Write;

use hqr::{CompressionKind, Writer};
use tempfile::NamedTempFile;

/// Builds a container with one directory entry per `(data, kind)` pair.
pub fn build_container(entries: &[(&[u8], CompressionKind)]) -> Vec<u8> {
    let mut writer = Writer::new();
    for (data, kind) in entries {
        writer.add_entry(data, *kind);
    }
    writer.to_vec()
}

/// Writes container bytes to a temp file; the handle keeps the path alive.
pub fn write_temp(bytes: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(bytes).expect("write temp container");
    file.flush().expect("flush temp container");
    file
}

/// Builds a container and lands it in a temp file in one step.
pub fn temp_container(entries: &[(&[u8], CompressionKind)]) -> NamedTempFile {
    write_temp(&build_container(entries))
}
