//! E2E Test Suite 02: Error Handling & Boundaries
//!
//! Tests that malformed, oversized, and unrecognized ramdisk payloads are
//! rejected with the proper error variant, without panicking:
//! - the three-variant error taxonomy and its `error_name` tags
//! - fail-fast on short LZMA containers
//! - the 40 MiB default ceiling as a hard failure (never silent truncation)
//! - deterministic, repeatable failures

use std::io::Write;

use ramdisk::config::MAX_UNPACKED_SIZE_DEFAULT;
use ramdisk::{decompress, decompress_with_limit, Format, UnpackError};

// ── Fixture helpers ──────────────────────────────────────────────────────────

fn gzip_fixture(data: &[u8]) -> Vec<u8> {
    let mut enc = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::fast());
    enc.write_all(data).unwrap();
    enc.finish().unwrap()
}

fn lzma_fixture(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    lzma_rs::lzma_compress(&mut &data[..], &mut out).unwrap();
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: a run of zero bytes is unsupported, with a 16-byte header dump
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_zero_bytes_unsupported() {
    let err = decompress(vec![0u8; 20]).expect_err("zeros are not a ramdisk");
    match &err {
        UnpackError::UnsupportedFormat { header } => {
            assert_eq!(header.len(), 16, "dump keeps at most 16 leading bytes");
            assert!(header.iter().all(|&b| b == 0));
        }
        other => panic!("expected UnsupportedFormat, got {:?}", other),
    }
    let msg = err.to_string();
    assert!(msg.contains("unrecognized ramdisk compression"), "got: {msg}");
    assert!(msg.contains("00 00 00"), "hex dump missing from: {msg}");
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: the empty payload is unsupported and says so
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_empty_payload_unsupported() {
    let err = decompress(Vec::new()).expect_err("empty payload must fail");
    assert_eq!(
        err,
        UnpackError::UnsupportedFormat { header: Vec::new() }
    );
    assert!(err.to_string().contains("empty payload"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: a foreign container (ELF-style header) dumps its leading bytes
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_foreign_header_is_dumped() {
    let mut payload = vec![0x7F, b'E', b'L', b'F'];
    payload.extend_from_slice(&[0x02, 0x01, 0x01, 0x00]);
    let err = decompress(payload).expect_err("ELF is not a compressed ramdisk");
    let msg = err.to_string();
    assert!(msg.contains("7f 45 4c 46"), "got: {msg}");
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: truncated gzip fails as a gzip decompression error
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_truncated_gzip() {
    let full = gzip_fixture(&[0x42u8; 4096]);
    let cut = full[..full.len() / 2].to_vec();

    match decompress(cut).expect_err("truncated gzip must fail") {
        UnpackError::DecompressionFailed { format, .. } => assert_eq!(format, Format::Gzip),
        other => panic!("expected DecompressionFailed, got {:?}", other),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 5: corrupted gzip trailer fails rather than returning bad data
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_corrupt_gzip_trailer() {
    let mut payload = gzip_fixture(b"checksummed contents");
    let last = payload.len() - 1;
    payload[last] ^= 0xFF; // break the CRC32/ISIZE trailer

    assert!(matches!(
        decompress(payload).expect_err("corrupt trailer must fail"),
        UnpackError::DecompressionFailed { format: Format::Gzip, .. }
    ));
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 6: LZMA signature with fewer than 14 bytes fails fast
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_short_lzma_container_fails_fast() {
    // Signature (6 bytes) plus 5 more: too short to hold the 13-byte header
    // and one stream byte.
    let mut payload = vec![0x5D, 0x00, 0x00, 0x80, 0x00, 0xFF];
    payload.extend_from_slice(&[0xFF, 0xFF, 0xFF, 0x00, 0x00]);
    assert_eq!(payload.len(), 11);

    let err = decompress(payload).expect_err("short LZMA container must fail");
    match &err {
        UnpackError::UnsupportedFormat { header } => assert_eq!(header.len(), 11),
        other => panic!("expected UnsupportedFormat, got {:?}", other),
    }
    let msg = err.to_string();
    assert!(msg.contains("truncated LZMA container: 11 bytes"), "got: {msg}");
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 7: a truncated LZMA stream fails as an LZMA decompression error
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_truncated_lzma_stream() {
    let full = lzma_fixture(&b"stream cut off mid-flight".repeat(64));
    let cut = full[..full.len() - 6].to_vec();

    match decompress(cut).expect_err("truncated LZMA must fail") {
        UnpackError::DecompressionFailed { format, .. } => assert_eq!(format, Format::Lzma),
        other => panic!("expected DecompressionFailed, got {:?}", other),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 8: the default ceiling is exactly 40 MiB — at it succeeds, past it fails
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_default_ceiling_boundary() {
    // Exactly at the ceiling: succeeds with the true length.
    let at_limit = gzip_fixture(&vec![0u8; MAX_UNPACKED_SIZE_DEFAULT]);
    let out = decompress(at_limit).expect("40 MiB output is still within the ceiling");
    assert_eq!(out.len(), MAX_UNPACKED_SIZE_DEFAULT);
    assert!(out[..16].iter().all(|&b| b == 0));
    assert!(out[out.len() - 16..].iter().all(|&b| b == 0));
    drop(out);

    // One byte past: a hard failure, never a truncated buffer.
    let past_limit = gzip_fixture(&vec![0u8; MAX_UNPACKED_SIZE_DEFAULT + 1]);
    match decompress(past_limit).expect_err("40 MiB + 1 must fail, not truncate") {
        UnpackError::DecompressionFailed { format, detail } => {
            assert_eq!(format, Format::Gzip);
            assert!(detail.contains("ceiling"), "got: {detail}");
        }
        other => panic!("expected DecompressionFailed, got {:?}", other),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 9: the explicit limit parameter is honored to the byte
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_explicit_limit_boundary() {
    let original = vec![0xA5u8; 8192];
    let payload = gzip_fixture(&original);

    let out = decompress_with_limit(payload.clone(), 8192).expect("exactly at the limit");
    assert_eq!(out, original);

    assert!(matches!(
        decompress_with_limit(payload, 8191).expect_err("one under the limit"),
        UnpackError::DecompressionFailed { .. }
    ));
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 10: an absurd limit surfaces as an allocation failure
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_absurd_limit_is_allocation_failure() {
    let payload = gzip_fixture(b"tiny");
    let err = decompress_with_limit(payload, usize::MAX)
        .expect_err("usize::MAX reservation cannot succeed");
    assert_eq!(err, UnpackError::AllocationFailed { requested: usize::MAX });
    assert!(err.to_string().contains("cannot reserve"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 11: failures are deterministic — same bytes, same error, every time
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_failures_are_repeatable() {
    let malformed = vec![0xDEu8, 0xAD, 0xBE, 0xEF, 0xCA, 0xFE];
    let first = decompress(malformed.clone()).unwrap_err();
    let second = decompress(malformed).unwrap_err();
    assert_eq!(first, second);

    let cut = {
        let full = gzip_fixture(&[7u8; 2048]);
        full[..full.len() / 3].to_vec()
    };
    let first = decompress(cut.clone()).unwrap_err();
    let second = decompress(cut).unwrap_err();
    assert_eq!(first, second);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 12: error_name tags are stable identifiers for all three variants
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_error_name_taxonomy() {
    let unsupported = decompress(vec![0u8; 4]).unwrap_err();
    assert_eq!(unsupported.error_name(), "unsupported_format");

    let alloc = decompress_with_limit(gzip_fixture(b"x"), usize::MAX).unwrap_err();
    assert_eq!(alloc.error_name(), "allocation_failed");

    let truncated = {
        let full = gzip_fixture(&[1u8; 1024]);
        full[..10].to_vec()
    };
    let failed = decompress(truncated).unwrap_err();
    assert_eq!(failed.error_name(), "decompression_failed");
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 13: a stream that inflates to zero bytes is rejected
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_empty_member_is_rejected() {
    let payload = gzip_fixture(b"");
    match decompress(payload).expect_err("zero-byte ramdisk is useless") {
        UnpackError::DecompressionFailed { detail, .. } => {
            assert!(detail.contains("0 bytes"), "got: {detail}");
        }
        other => panic!("expected DecompressionFailed, got {:?}", other),
    }
}
