//! File-level extraction: read a compressed ramdisk image, run the
//! decompression core, write the result.
//!
//! This is the concrete collaborator on both sides of the in-memory core:
//! it owns all file handling (sentinels, overwrite policy, metadata
//! propagation) and never inspects payload bytes itself.  Core failures
//! are wrapped into [`io::Error`] so callers deal with a single error
//! type at this layer.

use std::fs;
use std::io::{self, Read, Write};

use crate::unpack::prefs::{display_level, Prefs};
use crate::unpack::{decompress_with_limit, UnpackError};

use super::file_io::{open_dst_file, open_src_file, NUL_MARK, STDIN_MARK, STDOUT_MARK};

// ---------------------------------------------------------------------------
// Public stats
// ---------------------------------------------------------------------------

/// Byte counts for one completed extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractStats {
    /// Size of the compressed payload as read from the source.
    pub compressed_bytes: u64,
    /// True decompressed length written to the destination.
    pub decompressed_bytes: u64,
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Extracts the compressed ramdisk at `src` into `dst`.
///
/// `src`/`dst` accept the usual sentinels (`"stdin"`, `"stdout"`,
/// [`NUL_MARK`]).  When `prefs.test_mode` is set the destination argument
/// is ignored and output is discarded.  For regular-file destinations the
/// source's mtime and permissions are propagated onto the output, best
/// effort.
///
/// # Errors
///
/// Returns an error on I/O failure, on an unrecognized or corrupt
/// payload ([`io::ErrorKind::InvalidData`]), when the decompressed size
/// exceeds `prefs.max_unpacked_size`, or when the destination exists and
/// `prefs.overwrite` is not set.
pub fn extract_filename(src: &str, dst: &str, prefs: &Prefs) -> io::Result<ExtractStats> {
    // Source metadata first, for stat propagation onto the output.
    let src_stat = if src != STDIN_MARK {
        fs::metadata(src).ok()
    } else {
        None
    };

    let mut reader = open_src_file(src)?;
    let mut payload = Vec::new();
    reader.read_to_end(&mut payload)?;
    let compressed_bytes = payload.len() as u64;

    // Test mode decodes and validates, then discards.
    let dst: &str = if prefs.test_mode { NUL_MARK } else { dst };

    let unpacked =
        decompress_with_limit(payload, prefs.max_unpacked_size).map_err(|e| {
            let kind = match e {
                UnpackError::AllocationFailed { .. } => io::ErrorKind::OutOfMemory,
                _ => io::ErrorKind::InvalidData,
            };
            io::Error::new(kind, e.to_string())
        })?;
    let decompressed_bytes = unpacked.len() as u64;

    // Scoped so the destination is closed before metadata propagation.
    {
        let mut out = open_dst_file(dst, prefs)?;
        out.write_all(&unpacked)?;
        out.flush()?;
    }

    // Propagate source metadata onto regular-file outputs, best effort.
    if dst != STDOUT_MARK && dst != NUL_MARK {
        if let Some(meta) = &src_stat {
            if let Ok(mtime) = meta.modified() {
                let ft = filetime::FileTime::from_system_time(mtime);
                let _ = filetime::set_file_mtime(dst, ft);
            }
            let _ = fs::set_permissions(dst, meta.permissions());
        }
    }

    display_level(
        2,
        &format!(
            "{:<30.30} : {} -> {} bytes \n",
            src, compressed_bytes, decompressed_bytes
        ),
    );

    Ok(ExtractStats {
        compressed_bytes,
        decompressed_bytes,
    })
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unpack::prefs::KB;

    fn gzip_fixture(data: &[u8]) -> Vec<u8> {
        let mut enc =
            flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
        enc.write_all(data).unwrap();
        enc.finish().unwrap()
    }

    #[test]
    fn extract_gzip_file_roundtrip() {
        let data = b"drwxr-xr-x root root init.rc and friends";
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("ramdisk.gz");
        let dst = dir.path().join("ramdisk.cpio");
        let fixture = gzip_fixture(data);
        fs::write(&src, &fixture).unwrap();

        let stats = extract_filename(
            src.to_str().unwrap(),
            dst.to_str().unwrap(),
            &Prefs::default(),
        )
        .unwrap();

        assert_eq!(stats.compressed_bytes, fixture.len() as u64);
        assert_eq!(stats.decompressed_bytes, data.len() as u64);
        assert_eq!(fs::read(&dst).unwrap(), data);
    }

    #[test]
    fn extract_to_discard_sentinel() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("ramdisk.gz");
        fs::write(&src, gzip_fixture(b"discarded")).unwrap();

        let stats =
            extract_filename(src.to_str().unwrap(), NUL_MARK, &Prefs::default()).unwrap();
        assert_eq!(stats.decompressed_bytes, 9);
    }

    #[test]
    fn test_mode_discards_output() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("ramdisk.gz");
        let dst = dir.path().join("never-created.cpio");
        fs::write(&src, gzip_fixture(b"validated, not kept")).unwrap();

        let mut prefs = Prefs::default();
        prefs.set_test_mode(true);
        let stats = extract_filename(
            src.to_str().unwrap(),
            dst.to_str().unwrap(),
            &prefs,
        )
        .unwrap();

        assert!(stats.decompressed_bytes > 0);
        assert!(!dst.exists());
    }

    #[test]
    fn unrecognized_input_is_invalid_data() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("ramdisk.bin");
        let dst = dir.path().join("out.cpio");
        fs::write(&src, [0u8; 20]).unwrap();

        let err = extract_filename(
            src.to_str().unwrap(),
            dst.to_str().unwrap(),
            &Prefs::default(),
        )
        .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(err.to_string().contains("unrecognized ramdisk compression"));
        assert!(!dst.exists());
    }

    #[test]
    fn missing_source_errors() {
        let dir = tempfile::tempdir().unwrap();
        let dst = dir.path().join("out.cpio");
        let err = extract_filename(
            dir.path().join("no-such.gz").to_str().unwrap(),
            dst.to_str().unwrap(),
            &Prefs::default(),
        )
        .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn existing_destination_refused_without_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("ramdisk.gz");
        let dst = dir.path().join("out.cpio");
        fs::write(&src, gzip_fixture(b"fresh contents")).unwrap();
        fs::write(&dst, b"precious").unwrap();

        let err = extract_filename(
            src.to_str().unwrap(),
            dst.to_str().unwrap(),
            &Prefs::default(),
        )
        .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        assert_eq!(fs::read(&dst).unwrap(), b"precious");

        let mut prefs = Prefs::default();
        prefs.set_overwrite(true);
        extract_filename(src.to_str().unwrap(), dst.to_str().unwrap(), &prefs).unwrap();
        assert_eq!(fs::read(&dst).unwrap(), b"fresh contents");
    }

    #[test]
    fn source_mtime_propagated_to_destination() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("ramdisk.gz");
        let dst = dir.path().join("out.cpio");
        fs::write(&src, gzip_fixture(b"timestamped")).unwrap();

        let past = filetime::FileTime::from_unix_time(1_600_000_000, 0);
        filetime::set_file_mtime(&src, past).unwrap();

        extract_filename(
            src.to_str().unwrap(),
            dst.to_str().unwrap(),
            &Prefs::default(),
        )
        .unwrap();

        let dst_mtime = filetime::FileTime::from_last_modification_time(
            &fs::metadata(&dst).unwrap(),
        );
        assert_eq!(dst_mtime.unix_seconds(), past.unix_seconds());
    }

    #[test]
    fn ceiling_from_prefs_is_enforced() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("big.gz");
        let dst = dir.path().join("out.cpio");
        fs::write(&src, gzip_fixture(&vec![0u8; 64 * KB])).unwrap();

        let mut prefs = Prefs::default();
        prefs.set_max_unpacked_size(16 * KB);
        let err = extract_filename(
            src.to_str().unwrap(),
            dst.to_str().unwrap(),
            &prefs,
        )
        .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(err.to_string().contains("ceiling"));
        assert!(!dst.exists());
    }
}
