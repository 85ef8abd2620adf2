//! E2E Test Suite 01: One-Shot Decompression API
//!
//! Validates the in-memory ramdisk decompression path end to end:
//! - format detection from magic bytes
//! - gzip and LZMA round-trips through `decompress`
//! - true-length output (no padding, no capacity games)
//! - statelessness (repeat calls, concurrent calls)

use std::io::Write;

use ramdisk::{decompress, detect, Format};

// ── Fixture helpers ──────────────────────────────────────────────────────────

fn gzip_fixture(data: &[u8]) -> Vec<u8> {
    let mut enc = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    enc.write_all(data).unwrap();
    enc.finish().unwrap()
}

fn lzma_fixture(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    lzma_rs::lzma_compress(&mut &data[..], &mut out).unwrap();
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: gzip round-trip recovers the exact original bytes
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_gzip_roundtrip() {
    let original = b"HELLOWORLD";
    let payload = gzip_fixture(original);

    assert_eq!(detect(&payload), Format::Gzip, "fixture must detect as gzip");

    let out = decompress(payload).expect("gzip decompression should succeed");
    assert_eq!(out.len(), original.len(), "output length must be the true decompressed size");
    assert_eq!(&out[..], original);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: LZMA round-trip recovers the exact original bytes
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_lzma_roundtrip() {
    let original = b"recovery ramdisk contents, packed the old way".repeat(32);
    let payload = lzma_fixture(&original);

    assert_eq!(detect(&payload), Format::Lzma, "fixture must detect as LZMA");

    let out = decompress(payload).expect("LZMA decompression should succeed");
    assert_eq!(out, original);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: a larger payload (1 MiB) fits comfortably under the default ceiling
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_megabyte_roundtrip() {
    let original: Vec<u8> = (0..1_048_576u32).map(|i| (i % 251) as u8).collect();
    let payload = gzip_fixture(&original);

    let out = decompress(payload).expect("1 MiB image should decompress");
    assert_eq!(out.len(), original.len());
    assert_eq!(out, original);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: detection is pure — same bytes, same answer, any count of calls
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_detection_is_pure() {
    let gz = gzip_fixture(b"abc");
    let lz = lzma_fixture(b"abc");
    let junk = [0x7Fu8, b'E', b'L', b'F', 0, 0, 0, 0];

    for _ in 0..3 {
        assert_eq!(detect(&gz), Format::Gzip);
        assert_eq!(detect(&lz), Format::Lzma);
        assert_eq!(detect(&junk), Format::Unrecognized);
        assert_eq!(detect(&[]), Format::Unrecognized);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 5: the returned buffer is newly owned and independent per call
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_output_buffers_are_independent() {
    let original = b"shared source bytes for two calls";
    let payload = gzip_fixture(original);

    let mut first = decompress(payload.clone()).unwrap();
    let second = decompress(payload).unwrap();

    // Mutating one result must not affect the other.
    first[0] ^= 0xFF;
    assert_ne!(first[0], second[0]);
    assert_eq!(&second[..], original);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 6: repeated decompression of equal payloads is deterministic
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_repeat_calls_are_deterministic() {
    let payload = lzma_fixture(b"same in, same out");
    let a = decompress(payload.clone()).unwrap();
    let b = decompress(payload).unwrap();
    assert_eq!(a, b);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 7: no shared mutable state — concurrent calls all succeed
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_concurrent_decompression() {
    let handles: Vec<_> = (0..8u8)
        .map(|i| {
            std::thread::spawn(move || {
                let original = vec![i; 4096 + i as usize];
                let payload = if i % 2 == 0 {
                    gzip_fixture(&original)
                } else {
                    lzma_fixture(&original)
                };
                let out = decompress(payload).expect("decompression should succeed in a worker thread");
                assert_eq!(out, original);
            })
        })
        .collect();

    for h in handles {
        h.join().expect("worker thread should not panic");
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 8: gzip wins detection when gzip and LZMA inputs are both on offer
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_gzip_checked_before_lzma() {
    // A real gzip stream never starts with the LZMA signature, but the
    // detector's ordering is still observable: a gzip payload must decode via
    // the gzip path even when an equally valid LZMA payload exists alongside.
    let gz = gzip_fixture(b"gzip side");
    let lz = lzma_fixture(b"lzma side");
    assert_eq!(detect(&gz), Format::Gzip);
    assert_eq!(detect(&lz), Format::Lzma);
    assert_eq!(decompress(gz).unwrap(), b"gzip side");
    assert_eq!(decompress(lz).unwrap(), b"lzma side");
}
