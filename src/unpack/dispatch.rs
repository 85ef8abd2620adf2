//! Detection and decompression dispatch for ramdisk payloads.
//!
//! The orchestrator owns the whole lifecycle of one decompression call:
//!
//! 1. Reserve the destination at the full ceiling before any
//!    format-specific work, so reservation failure is reported on its own
//!    (`AllocationFailed`) rather than surfacing mid-decode.
//! 2. Classify the payload from its magic bytes.
//! 3. Run the matching codec adapter through a [`BoundedSink`].
//! 4. Validate that the result is non-empty and hand the buffer to the
//!    caller.
//!
//! The payload is taken by value: it is consumed on every path, success or
//! failure, and the caller cannot reuse it afterward.  No state survives
//! between calls.

use super::detect::{detect, header_dump};
use super::gzip::decode_gzip;
use super::lzma::decode_lzma;
use super::prefs::display_level;
use super::sink::BoundedSink;
use super::types::{Format, UnpackError, HEADER_DUMP_LEN, LZMA_MIN_LEN};
use crate::config::MAX_UNPACKED_SIZE_DEFAULT;

/// Decompresses a ramdisk payload with the process-default ceiling
/// ([`MAX_UNPACKED_SIZE_DEFAULT`], 40 MiB).
///
/// See [`decompress_with_limit`] for the full contract.
pub fn decompress(payload: Vec<u8>) -> Result<Vec<u8>, UnpackError> {
    decompress_with_limit(payload, MAX_UNPACKED_SIZE_DEFAULT)
}

/// Decompresses a ramdisk payload into a newly owned buffer of at most
/// `max_unpacked_size` bytes.
///
/// On success the returned vector holds exactly the decompressed bytes;
/// its spare capacity (up to the ceiling) is unused.  Output larger than
/// the ceiling is a failure, never a truncation.  An empty decode result
/// is rejected: a zero-byte ramdisk is not a usable ramdisk.
///
/// # Errors
///
/// - [`UnpackError::AllocationFailed`] — the ceiling-sized destination
///   could not be reserved.
/// - [`UnpackError::UnsupportedFormat`] — unrecognized magic bytes, or an
///   LZMA payload shorter than its fixed container header.
/// - [`UnpackError::DecompressionFailed`] — the matched codec failed, or
///   produced zero bytes, or overflowed the ceiling.
pub fn decompress_with_limit(
    payload: Vec<u8>,
    max_unpacked_size: usize,
) -> Result<Vec<u8>, UnpackError> {
    // Reserve the full ceiling up front so an over-committed system fails
    // here, not midway through a decode.
    let mut dest = Vec::new();
    if dest.try_reserve_exact(max_unpacked_size).is_err() {
        return Err(UnpackError::AllocationFailed {
            requested: max_unpacked_size,
        });
    }
    let mut sink = BoundedSink::new(dest, max_unpacked_size);

    let format = detect(&payload);
    match format {
        Format::Gzip => {
            display_level(4, "detected gzip ramdisk \n");
            decode_gzip(&payload, &mut sink).map_err(|e| UnpackError::DecompressionFailed {
                format: Format::Gzip,
                detail: e.to_string(),
            })?;
        }
        Format::Lzma => {
            if payload.len() < LZMA_MIN_LEN {
                display_level(
                    1,
                    &format!("truncated LZMA container: {} bytes \n", payload.len()),
                );
                return Err(UnpackError::UnsupportedFormat { header: payload });
            }
            display_level(4, "detected LZMA ramdisk \n");
            decode_lzma(&payload, &mut sink).map_err(|e| UnpackError::DecompressionFailed {
                format: Format::Lzma,
                detail: e.to_string(),
            })?;
        }
        Format::Unrecognized => {
            let header: Vec<u8> = payload.iter().take(HEADER_DUMP_LEN).copied().collect();
            display_level(
                1,
                &format!(
                    "unrecognized ramdisk compression, leading bytes: {} \n",
                    header_dump(&payload)
                ),
            );
            return Err(UnpackError::UnsupportedFormat { header });
        }
    }

    let out = sink.into_inner();
    if out.is_empty() {
        return Err(UnpackError::DecompressionFailed {
            format,
            detail: "decompressed to 0 bytes".to_owned(),
        });
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
