//! E2E Test Suite 03: File-Level Extraction
//!
//! Drives `extract_filename` through the public library surface with real
//! files on disk: both formats, the discard sentinel, test mode, overwrite
//! policy, and source-metadata propagation.

use std::fs;
use std::io::Write;

use tempfile::TempDir;

use ramdisk::io::NUL_MARK;
use ramdisk::{extract_filename, ExtractStats, Prefs};

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
// Test 1: gzip file extraction, with byte counts in the returned stats
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_extract_gzip_file() {
    let dir = TempDir::new().unwrap();
    let original = b"0707010000000A000081A4...".repeat(100); // cpio-ish filler
    let fixture = gzip_fixture(&original);

    let src = dir.path().join("ramdisk.cpio.gz");
    let dst = dir.path().join("ramdisk.cpio");
    fs::write(&src, &fixture).unwrap();

    let stats = extract_filename(
        src.to_str().unwrap(),
        dst.to_str().unwrap(),
        &Prefs::default(),
    )
    .expect("gzip extraction should succeed");

    assert_eq!(
        stats,
        ExtractStats {
            compressed_bytes: fixture.len() as u64,
            decompressed_bytes: original.len() as u64,
        }
    );
    assert_eq!(fs::read(&dst).unwrap(), original);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: LZMA file extraction
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_extract_lzma_file() {
    let dir = TempDir::new().unwrap();
    let original = b"legacy recovery image payload ".repeat(200);
    let src = dir.path().join("ramdisk.lzma");
    let dst = dir.path().join("ramdisk");
    fs::write(&src, lzma_fixture(&original)).unwrap();

    let stats = extract_filename(
        src.to_str().unwrap(),
        dst.to_str().unwrap(),
        &Prefs::default(),
    )
    .expect("LZMA extraction should succeed");

    assert_eq!(stats.decompressed_bytes, original.len() as u64);
    assert_eq!(fs::read(&dst).unwrap(), original);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: the discard sentinel validates without leaving a file behind
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_extract_to_discard() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("ramdisk.gz");
    fs::write(&src, gzip_fixture(b"goes nowhere")).unwrap();

    let stats = extract_filename(src.to_str().unwrap(), NUL_MARK, &Prefs::default())
        .expect("discard extraction should succeed");
    assert_eq!(stats.decompressed_bytes, 12);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: test mode overrides the destination and creates nothing
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_test_mode_creates_no_file() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("ramdisk.gz");
    let dst = dir.path().join("would-be-output");
    fs::write(&src, gzip_fixture(b"checked, then dropped")).unwrap();

    let mut prefs = Prefs::default();
    prefs.set_test_mode(true);
    extract_filename(src.to_str().unwrap(), dst.to_str().unwrap(), &prefs)
        .expect("test mode should validate the image");
    assert!(!dst.exists(), "test mode must not create the output file");
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 5: overwrite policy — refuse by default, replace with set_overwrite
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_overwrite_policy() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("ramdisk.gz");
    let dst = dir.path().join("ramdisk.cpio");
    fs::write(&src, gzip_fixture(b"replacement contents")).unwrap();
    fs::write(&dst, b"existing contents").unwrap();

    let err = extract_filename(
        src.to_str().unwrap(),
        dst.to_str().unwrap(),
        &Prefs::default(),
    )
    .expect_err("existing destination must be refused");
    assert_eq!(err.kind(), std::io::ErrorKind::AlreadyExists);
    assert_eq!(fs::read(&dst).unwrap(), b"existing contents");

    let mut prefs = Prefs::default();
    prefs.set_overwrite(true);
    extract_filename(src.to_str().unwrap(), dst.to_str().unwrap(), &prefs)
        .expect("overwrite should be allowed with the pref set");
    assert_eq!(fs::read(&dst).unwrap(), b"replacement contents");
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 6: source mtime lands on the extracted file
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_mtime_propagation() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("ramdisk.gz");
    let dst = dir.path().join("ramdisk.cpio");
    fs::write(&src, gzip_fixture(b"old image")).unwrap();

    let stamp = filetime::FileTime::from_unix_time(1_234_567_890, 0);
    filetime::set_file_mtime(&src, stamp).unwrap();

    extract_filename(
        src.to_str().unwrap(),
        dst.to_str().unwrap(),
        &Prefs::default(),
    )
    .unwrap();

    let dst_mtime =
        filetime::FileTime::from_last_modification_time(&fs::metadata(&dst).unwrap());
    assert_eq!(dst_mtime.unix_seconds(), stamp.unix_seconds());
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 7: an unrecognized file maps to InvalidData and writes nothing
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_unrecognized_file() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("random.bin");
    let dst = dir.path().join("out");
    fs::write(&src, [0x13u8, 0x37, 0x00, 0x00, 0x00, 0x00]).unwrap();

    let err = extract_filename(
        src.to_str().unwrap(),
        dst.to_str().unwrap(),
        &Prefs::default(),
    )
    .expect_err("random bytes must be rejected");
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    assert!(err.to_string().contains("13 37"), "hex dump expected: {err}");
    assert!(!dst.exists());
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 8: the prefs ceiling applies at the file level too
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_prefs_ceiling_applies() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("big.gz");
    let dst = dir.path().join("out");
    fs::write(&src, gzip_fixture(&vec![0u8; 256 * 1024])).unwrap();

    let mut prefs = Prefs::default();
    prefs.set_max_unpacked_size(64 * 1024);
    let err = extract_filename(src.to_str().unwrap(), dst.to_str().unwrap(), &prefs)
        .expect_err("image over the configured ceiling must fail");
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    assert!(err.to_string().contains("ceiling"), "got: {err}");
    assert!(!dst.exists(), "no partial output on failure");
}
