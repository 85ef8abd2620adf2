//! E2E Test Suite 04: CLI Integration
//!
//! Tests the `extract_ramdisk` binary as a black box using
//! `std::process::Command`.  Covers filename resolution, test mode, overwrite
//! handling, pipe mode, the size ceiling, and the exit-code contract:
//! 0 = success, 1 = usage error, 66 = failed extraction.

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use tempfile::TempDir;

/// Locate the `extract_ramdisk` binary produced by Cargo.
fn ramdisk_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_extract_ramdisk"))
}

fn gzip_fixture(data: &[u8]) -> Vec<u8> {
    let mut enc = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    enc.write_all(data).unwrap();
    enc.finish().unwrap()
}

/// Create a TempDir containing `ramdisk.gz` wrapping ~4 KB of content.
fn make_gzip_input() -> (TempDir, PathBuf, Vec<u8>) {
    let dir = TempDir::new().unwrap();
    let original = b"cpio archive filler line\n".repeat(164); // ~4 KB
    let path = dir.path().join("ramdisk.gz");
    fs::write(&path, gzip_fixture(&original)).unwrap();
    (dir, path, original)
}

// ── 1. Extraction roundtrip with explicit output ─────────────────────────────

#[test]
fn test_cli_extract_roundtrip() {
    let (dir, input, original) = make_gzip_input();
    let output = dir.path().join("ramdisk.cpio");

    let status = Command::new(ramdisk_bin())
        .args([input.to_str().unwrap(), output.to_str().unwrap()])
        .current_dir(dir.path())
        .status()
        .expect("failed to run extract_ramdisk");

    assert!(status.success(), "extraction should exit 0");
    assert_eq!(fs::read(&output).unwrap(), original);
}

// ── 2. Output filename derived by stripping the extension ────────────────────

#[test]
fn test_cli_auto_output_name() {
    let (dir, _input, original) = make_gzip_input();

    let status = Command::new(ramdisk_bin())
        .arg("ramdisk.gz")
        .current_dir(dir.path())
        .status()
        .expect("failed to run extract_ramdisk");

    assert!(status.success(), "auto-named extraction should exit 0");
    let derived = dir.path().join("ramdisk");
    assert!(derived.exists(), "output 'ramdisk' should be derived from 'ramdisk.gz'");
    assert_eq!(fs::read(&derived).unwrap(), original);
}

// ── 3. Underivable output filename is a usage error ──────────────────────────

#[test]
fn test_cli_underivable_output_name() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("image.bin");
    fs::write(&input, gzip_fixture(b"named wrong")).unwrap();

    let output = Command::new(ramdisk_bin())
        .arg("image.bin")
        .current_dir(dir.path())
        .output()
        .expect("failed to run extract_ramdisk");

    assert_eq!(output.status.code(), Some(1), "usage errors exit 1");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Cannot determine an output filename"),
        "got stderr: {stderr}"
    );
}

// ── 4. -t test mode: validates, creates nothing ──────────────────────────────

#[test]
fn test_cli_test_mode_valid() {
    let (dir, input, _original) = make_gzip_input();

    let status = Command::new(ramdisk_bin())
        .args(["-t", input.to_str().unwrap()])
        .current_dir(dir.path())
        .status()
        .expect("failed to run extract_ramdisk -t");

    assert!(status.success(), "-t on a valid image should exit 0");
    assert!(
        !dir.path().join("ramdisk").exists(),
        "-t must not create an output file"
    );
}

// ── 5. -t on a corrupt image fails with the extraction exit code ─────────────

#[test]
fn test_cli_test_mode_corrupt() {
    let dir = TempDir::new().unwrap();
    let corrupt = dir.path().join("corrupt.gz");

    // gzip magic followed by garbage.
    let mut data = vec![0x1Fu8, 0x8B];
    data.extend_from_slice(&[0xFF; 64]);
    fs::write(&corrupt, data).unwrap();

    let status = Command::new(ramdisk_bin())
        .args(["-t", corrupt.to_str().unwrap()])
        .current_dir(dir.path())
        .status()
        .expect("failed to run extract_ramdisk -t on corrupt file");

    assert_eq!(status.code(), Some(66), "failed extraction should exit 66");
}

// ── 6. Unrecognized input reports the leading bytes and exits 66 ─────────────

#[test]
fn test_cli_unrecognized_input() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("zeros.gz");
    fs::write(&input, [0u8; 32]).unwrap();

    let output = Command::new(ramdisk_bin())
        .args([input.to_str().unwrap(), dir.path().join("out").to_str().unwrap()])
        .output()
        .expect("failed to run extract_ramdisk");

    assert_eq!(output.status.code(), Some(66));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("unrecognized ramdisk compression"),
        "got stderr: {stderr}"
    );
}

// ── 7. Nonexistent input exits 66 ────────────────────────────────────────────

#[test]
fn test_cli_nonexistent_input() {
    let dir = TempDir::new().unwrap();
    let status = Command::new(ramdisk_bin())
        .args(["no-such-ramdisk.gz", "out.cpio"])
        .current_dir(dir.path())
        .status()
        .expect("failed to run extract_ramdisk");

    assert_eq!(status.code(), Some(66));
}

// ── 8. Existing output: refused without -f, replaced with it ─────────────────

#[test]
fn test_cli_overwrite_flag() {
    let (dir, input, original) = make_gzip_input();
    let output_path = dir.path().join("ramdisk.cpio");
    fs::write(&output_path, b"precious bytes").unwrap();

    let status = Command::new(ramdisk_bin())
        .args([input.to_str().unwrap(), output_path.to_str().unwrap()])
        .status()
        .expect("failed to run extract_ramdisk");
    assert_eq!(status.code(), Some(66), "clobbering without -f must fail");
    assert_eq!(fs::read(&output_path).unwrap(), b"precious bytes");

    let status = Command::new(ramdisk_bin())
        .args(["-f", input.to_str().unwrap(), output_path.to_str().unwrap()])
        .status()
        .expect("failed to run extract_ramdisk -f");
    assert!(status.success(), "-f should allow the overwrite");
    assert_eq!(fs::read(&output_path).unwrap(), original);
}

// ── 9. Pure pipe mode: stdin in, stdout out ──────────────────────────────────

#[test]
fn test_cli_pipe_mode() {
    let original = b"piped ramdisk image".repeat(64);
    let fixture = gzip_fixture(&original);

    let mut child = Command::new(ramdisk_bin())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn extract_ramdisk");

    child
        .stdin
        .take()
        .expect("child stdin should be piped")
        .write_all(&fixture)
        .unwrap();

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success(), "pipe mode should exit 0");
    assert_eq!(output.stdout, original, "stdout must carry the raw image");
}

// ── 10. Explicit `-` output writes the image to stdout ───────────────────────

#[test]
fn test_cli_dash_output() {
    let (_dir, input, original) = make_gzip_input();

    let output = Command::new(ramdisk_bin())
        .args([input.to_str().unwrap(), "-"])
        .output()
        .expect("failed to run extract_ramdisk");

    assert!(output.status.success());
    assert_eq!(output.stdout, original);
}

// ── 11. `null` output discards the image ─────────────────────────────────────

#[test]
fn test_cli_null_output() {
    let (dir, input, _original) = make_gzip_input();

    let status = Command::new(ramdisk_bin())
        .args([input.to_str().unwrap(), "null"])
        .current_dir(dir.path())
        .status()
        .expect("failed to run extract_ramdisk");

    assert!(status.success());
    assert!(
        !dir.path().join("null").exists(),
        "'null' is a discard sentinel, not a filename"
    );
}

// ── 12. -m ceiling: too small fails with 66, exact size passes ───────────────

#[test]
fn test_cli_max_size_ceiling() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("big.gz");
    fs::write(&input, gzip_fixture(&vec![0u8; 8192])).unwrap();

    let output = Command::new(ramdisk_bin())
        .args(["-m4K", input.to_str().unwrap(), dir.path().join("a").to_str().unwrap()])
        .output()
        .expect("failed to run extract_ramdisk -m4K");
    assert_eq!(output.status.code(), Some(66));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ceiling"), "got stderr: {stderr}");

    let status = Command::new(ramdisk_bin())
        .args(["-m8192", input.to_str().unwrap(), dir.path().join("b").to_str().unwrap()])
        .status()
        .expect("failed to run extract_ramdisk -m8192");
    assert!(status.success(), "an image exactly at the ceiling passes");
}

// ── 13. Bad options are usage errors (exit 1) ────────────────────────────────

#[test]
fn test_cli_bad_option() {
    let output = Command::new(ramdisk_bin())
        .arg("--no-such-option")
        .output()
        .expect("failed to run extract_ramdisk");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("bad usage"), "got stderr: {stderr}");
}

// ── 14. --version ────────────────────────────────────────────────────────────

#[test]
fn test_cli_version() {
    let output = Command::new(ramdisk_bin())
        .arg("--version")
        .output()
        .expect("failed to run extract_ramdisk --version");

    assert!(output.status.success(), "--version should exit 0");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains(env!("CARGO_PKG_VERSION")),
        "--version stdout should contain the crate version; got: {stdout}"
    );
}

// ── 15. --help ───────────────────────────────────────────────────────────────

#[test]
fn test_cli_help() {
    let output = Command::new(ramdisk_bin())
        .arg("--help")
        .output()
        .expect("failed to run extract_ramdisk --help");

    assert!(output.status.success(), "--help should exit 0");
    let combined = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(
        combined.to_lowercase().contains("usage"),
        "--help output should contain 'usage'; got: {combined}"
    );
}

// ── 16. -q silences the failure report but keeps the exit code ───────────────

#[test]
fn test_cli_quiet_failure() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("zeros.gz");
    fs::write(&input, [0u8; 32]).unwrap();

    let output = Command::new(ramdisk_bin())
        .args(["-qq", input.to_str().unwrap(), dir.path().join("out").to_str().unwrap()])
        .output()
        .expect("failed to run extract_ramdisk -qq");

    assert_eq!(output.status.code(), Some(66), "exit code survives -qq");
    assert!(
        output.stderr.is_empty(),
        "stderr should be silent under -qq; got: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}
