//! File I/O primitives for the extraction pipeline.
//!
//! Two entry points are used by the higher-level extraction layer:
//!
//! - [`open_src_file`] — resolves a path string to a `Box<dyn Read>`,
//!   handling the `"stdin"` sentinel and rejecting directories.
//! - [`open_dst_file`] — resolves a path string to a [`DstFile`],
//!   handling the `"stdout"` and discard sentinels and enforcing the
//!   overwrite policy from [`Prefs`].
//!
//! Sentinel string constants ([`STDIN_MARK`], [`STDOUT_MARK`], [`NUL_MARK`],
//! [`NULL_OUTPUT`]) are re-exported so callers can compare against them
//! without embedding magic strings.
//!
//! Verbosity-gated diagnostics are emitted via stderr using the global
//! [`DISPLAY_LEVEL`] atomic.

use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, Read, Write};
use std::path::Path;
use std::sync::atomic::Ordering;

use crate::unpack::prefs::{Prefs, DISPLAY_LEVEL};

// ---------------------------------------------------------------------------
// Sentinel strings
// ---------------------------------------------------------------------------

/// Sentinel: read from standard input.
pub const STDIN_MARK: &str = "stdin";

/// Sentinel: write to standard output.
pub const STDOUT_MARK: &str = "stdout";

/// Sentinel: discard output (write to /dev/null or equivalent).
#[cfg(windows)]
pub const NUL_MARK: &str = "nul";
#[cfg(not(windows))]
pub const NUL_MARK: &str = "/dev/null";

/// Alternate sentinel accepted for discard output.
pub const NULL_OUTPUT: &str = "null";

// ---------------------------------------------------------------------------
// Private sentinel checks
// ---------------------------------------------------------------------------

#[inline]
fn is_dev_null(s: &str) -> bool {
    s == NUL_MARK
}

#[inline]
fn is_stdin(s: &str) -> bool {
    s == STDIN_MARK
}

#[inline]
fn is_stdout(s: &str) -> bool {
    s == STDOUT_MARK
}

// ---------------------------------------------------------------------------
// Source file
// ---------------------------------------------------------------------------

/// Opens a source file for reading, returning a boxed [`Read`].
///
/// - If `path` is the sentinel `"stdin"`, returns standard input.
/// - If `path` is a directory, returns an [`io::ErrorKind::InvalidInput`] error.
/// - Otherwise opens the file and wraps it in a [`BufReader`] for efficient
///   sequential reads.
///
/// Diagnostics are printed to stderr when [`DISPLAY_LEVEL`] permits.
pub fn open_src_file(path: &str) -> io::Result<Box<dyn Read>> {
    if is_stdin(path) {
        if DISPLAY_LEVEL.load(Ordering::Relaxed) >= 4 {
            eprintln!("Using stdin for input");
        }
        return Ok(Box::new(io::stdin()));
    }

    if Path::new(path).is_dir() {
        if DISPLAY_LEVEL.load(Ordering::Relaxed) >= 1 {
            eprintln!("extract_ramdisk: {} is a directory -- ignored", path);
        }
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{}: is a directory", path),
        ));
    }

    let f = File::open(path).map_err(|e| {
        if DISPLAY_LEVEL.load(Ordering::Relaxed) >= 1 {
            eprintln!("{}: {}", path, e);
        }
        e
    })?;
    Ok(Box::new(BufReader::new(f)))
}

// ---------------------------------------------------------------------------
// Destination file
// ---------------------------------------------------------------------------

/// A write-capable destination produced by [`open_dst_file`].
///
/// Wraps either a regular [`File`], stdout, or a discard sink
/// ([`io::sink`]).  Callers inspect `is_stdout` to suppress
/// terminal-unfriendly output.
pub struct DstFile {
    inner: Box<dyn Write>,
    pub is_stdout: bool,
}

impl Write for DstFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }
    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Opens a destination for writing, returning a [`DstFile`].
///
/// Resolves special sentinels before touching the filesystem:
/// - `"stdout"` → stdout (`is_stdout = true`).
/// - [`NUL_MARK`] → [`io::sink`] (all bytes discarded, no file created).
///
/// For regular paths, enforces the overwrite policy from `prefs`: when
/// `prefs.overwrite == false` and the file already exists, the call fails
/// with [`io::ErrorKind::AlreadyExists`].  There is no interactive prompt.
pub fn open_dst_file(path: &str, prefs: &Prefs) -> io::Result<DstFile> {
    if is_stdout(path) {
        if DISPLAY_LEVEL.load(Ordering::Relaxed) >= 4 {
            eprintln!("Using stdout for output");
        }
        return Ok(DstFile {
            inner: Box::new(io::stdout()),
            is_stdout: true,
        });
    }

    if is_dev_null(path) {
        return Ok(DstFile {
            inner: Box::new(io::sink()),
            is_stdout: false,
        });
    }

    // Overwrite guard: refuse to clobber an existing file unless allowed.
    if !prefs.overwrite && Path::new(path).exists() {
        if DISPLAY_LEVEL.load(Ordering::Relaxed) >= 1 {
            eprintln!("{} already exists; not overwritten  ", path);
        }
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{}: already exists; not overwritten", path),
        ));
    }

    let f = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|e| {
            if DISPLAY_LEVEL.load(Ordering::Relaxed) >= 1 {
                eprintln!("{}: {}", path, e);
            }
            e
        })?;

    Ok(DstFile {
        inner: Box::new(f),
        is_stdout: false,
    })
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_src_file_nonexistent_returns_err() {
        let result = open_src_file("/nonexistent/path/that/cannot/exist.gz");
        assert!(result.is_err());
    }

    #[test]
    fn open_src_file_rejects_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = open_src_file(dir.path().to_str().unwrap()).err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn open_dst_file_stdout_sentinel() {
        let prefs = Prefs::default();
        let dst = open_dst_file(STDOUT_MARK, &prefs).unwrap();
        assert!(dst.is_stdout);
    }

    #[test]
    fn open_dst_file_devnull_sentinel() {
        let prefs = Prefs::default();
        let dst = open_dst_file(NUL_MARK, &prefs).unwrap();
        assert!(!dst.is_stdout);
    }

    #[test]
    fn open_dst_file_new_file_ok() {
        let prefs = Prefs::default();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ramdisk.cpio");
        let mut dst = open_dst_file(path.to_str().unwrap(), &prefs).unwrap();
        assert!(!dst.is_stdout);
        dst.write_all(b"data").unwrap();
        dst.flush().unwrap();
        drop(dst);
        assert_eq!(std::fs::read(&path).unwrap(), b"data");
    }

    #[test]
    fn open_dst_file_existing_refused_without_overwrite() {
        let prefs = Prefs::default();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.cpio");
        std::fs::write(&path, b"existing").unwrap();
        let err = open_dst_file(path.to_str().unwrap(), &prefs).err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        // Contents untouched.
        assert_eq!(std::fs::read(&path).unwrap(), b"existing");
    }

    #[test]
    fn open_dst_file_existing_truncated_with_overwrite() {
        let mut prefs = Prefs::default();
        prefs.set_overwrite(true);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.cpio");
        std::fs::write(&path, b"old contents").unwrap();
        let dst = open_dst_file(path.to_str().unwrap(), &prefs).unwrap();
        drop(dst);
        assert_eq!(std::fs::read(&path).unwrap(), b"");
    }

    #[test]
    fn sentinel_constants() {
        assert_eq!(STDIN_MARK, "stdin");
        assert_eq!(STDOUT_MARK, "stdout");
        assert_eq!(NULL_OUTPUT, "null");
        #[cfg(not(windows))]
        assert_eq!(NUL_MARK, "/dev/null");
        #[cfg(windows)]
        assert_eq!(NUL_MARK, "nul");
    }
}
