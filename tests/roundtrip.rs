//! Codec and container round-trip tests, including property-based cases.

mod common;

use hqr::{CompressionKind, codec};
use proptest::prelude::*;

const LZ1: CompressionKind = CompressionKind::Lz1;
const LZ2: CompressionKind = CompressionKind::Lz2;

fn codec_roundtrip(data: &[u8], kind: CompressionKind) -> Vec<u8> {
    let packed = codec::compress(data, kind);
    let mut unpacked = vec![0u8; data.len()];
    codec::decompress(&mut unpacked, &packed, kind).expect("decompress");
    unpacked
}

#[test]
fn known_sequences_roundtrip() {
    let cases: &[&[u8]] = &[
        b"",
        b"a",
        b"aa",
        b"aaa",
        b"Hello, World! Hello, World! Hello, World!",
        &[0u8; 4096],
        &[0xFF; 33],
        b"no repeats here: qwertyuiopasdfghjklzxcvbnm1234567890",
    ];
    for &data in cases {
        for kind in [LZ1, LZ2] {
            assert_eq!(codec_roundtrip(data, kind), data);
        }
    }
}

#[test]
fn container_roundtrip_mixed_modes() {
    let blob: Vec<u8> = (0..10_000u32).map(|i| (i * 7 % 256) as u8).collect();
    let entries: &[(&[u8], CompressionKind)] = &[
        (&blob, CompressionKind::Stored),
        (&blob, LZ1),
        (&blob, LZ2),
    ];
    let file = common::temp_container(entries);

    for index in 0..3 {
        assert_eq!(hqr::read_entry_vec(file.path(), index).unwrap(), blob);
    }
}

#[test]
fn decoder_never_writes_past_requested_length() {
    // Stream encodes 16 literals, but only 5 are requested.
    let mut stream = vec![0xFF];
    stream.extend_from_slice(b"abcdefgh");
    stream.push(0xFF);
    stream.extend_from_slice(b"ijklmnop");

    let mut dst = vec![0x77u8; 12];
    codec::decompress(&mut dst[..5], &stream, LZ1).unwrap();
    assert_eq!(&dst[..5], b"abcde");
    assert!(dst[5..].iter().all(|&b| b == 0x77));
}

proptest! {
    /// Arbitrary data survives a compress/decompress round-trip.
    #[test]
    fn arbitrary_data_roundtrips(data in proptest::collection::vec(any::<u8>(), 0..2048)) {
        for kind in [LZ1, LZ2] {
            prop_assert_eq!(&codec_roundtrip(&data, kind), &data);
        }
    }

    /// Low-entropy data (few distinct bytes) exercises long matches.
    #[test]
    fn low_entropy_data_roundtrips(data in proptest::collection::vec(0u8..4, 0..2048)) {
        for kind in [LZ1, LZ2] {
            prop_assert_eq!(&codec_roundtrip(&data, kind), &data);
        }
    }

    /// A full container round-trip preserves every entry byte-for-byte.
    #[test]
    fn container_roundtrips(
        entries in proptest::collection::vec(
            (proptest::collection::vec(any::<u8>(), 0..256), 0u8..3),
            1..8,
        )
    ) {
        let packed: Vec<(&[u8], CompressionKind)> = entries
            .iter()
            .map(|(data, mode)| {
                let kind = CompressionKind::from_mode(u16::from(*mode)).unwrap();
                (data.as_slice(), kind)
            })
            .collect();
        let file = common::temp_container(&packed);

        prop_assert_eq!(hqr::entry_count(file.path()).unwrap(), entries.len() as u32);
        for (index, (data, _)) in entries.iter().enumerate() {
            let out = hqr::read_entry_vec(file.path(), index as u32).unwrap();
            prop_assert_eq!(&out, data);
        }
    }

    /// The decoder tolerates arbitrary garbage without panicking or
    /// writing past the requested length.
    #[test]
    fn decoder_is_total_on_garbage(
        stream in proptest::collection::vec(any::<u8>(), 0..512),
        len in 0usize..512,
    ) {
        let mut dst = vec![0u8; len + 8];
        for kind in [LZ1, LZ2] {
            let _ = codec::decompress(&mut dst[..len], &stream, kind);
        }
        // Guard bytes past the requested length are never touched.
        prop_assert!(dst[len..].iter().all(|&b| b == 0));
    }
}
