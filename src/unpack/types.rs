//! Core types for ramdisk decompression: the format classification, the
//! error taxonomy, and the byte-level constants that form the container
//! contract.
//!
//! The two signatures below are deliberately narrow.  The gzip signature is
//! the standard two-byte member header.  The LZMA signature is *not* a
//! general LZMA magic — it pins the exact LZMA-alone header prefix the
//! supported ramdisk packers emit: properties byte `0x5D` (lc=3, lp=0,
//! pb=2), an 8 MiB dictionary encoded little-endian, and the first byte of
//! an unknown-size field (`0xFF`).  Streams produced with other settings
//! are treated as unrecognized.

use std::fmt;

// ---------------------------------------------------------------------------
// Container constants
// ---------------------------------------------------------------------------

/// Leading bytes of a gzip member.
pub const GZIP_SIGNATURE: [u8; 2] = [0x1F, 0x8B];

/// Leading bytes of a supported LZMA-alone container (see module docs).
pub const LZMA_SIGNATURE: [u8; 6] = [0x5D, 0x00, 0x00, 0x80, 0x00, 0xFF];

/// Length of the LZMA properties field (lc/lp/pb byte + dictionary size).
pub const LZMA_PROPS_LEN: usize = 5;

/// Offset of the compressed bitstream inside an LZMA-alone container:
/// 5 properties bytes followed by an 8-byte uncompressed-size field.
pub const LZMA_STREAM_OFFSET: usize = 13;

/// Smallest LZMA-alone container this tool will hand to the decoder:
/// the full 13-byte header plus at least one byte of stream data.
pub const LZMA_MIN_LEN: usize = LZMA_STREAM_OFFSET + 1;

/// Number of leading payload bytes captured for the unrecognized-format
/// diagnostic dump.
pub const HEADER_DUMP_LEN: usize = 16;

// ---------------------------------------------------------------------------
// Format classification
// ---------------------------------------------------------------------------

/// Compression scheme of a ramdisk payload, as classified by
/// [`detect`](crate::unpack::detect::detect) from its leading bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Payload starts with [`GZIP_SIGNATURE`].
    Gzip,
    /// Payload starts with [`LZMA_SIGNATURE`].
    Lzma,
    /// Payload matches neither signature.
    Unrecognized,
}

impl Format {
    /// Short lowercase name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Format::Gzip => "gzip",
            Format::Lzma => "LZMA",
            Format::Unrecognized => "unrecognized",
        }
    }
}

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Failure of one decompression call.
///
/// All failures are terminal for the call: nothing is retried internally,
/// and every buffer the call owned has been released by the time the error
/// reaches the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnpackError {
    /// The payload matches neither recognized signature, or claims a format
    /// but is too short to contain its fixed container header.  Carries the
    /// leading payload bytes (at most [`HEADER_DUMP_LEN`]) for diagnosis.
    UnsupportedFormat { header: Vec<u8> },
    /// The destination buffer could not be reserved at the requested
    /// ceiling.
    AllocationFailed { requested: usize },
    /// The matched codec ran but produced no valid positive-length result:
    /// corrupt stream, truncated stream, output over the ceiling, or an
    /// empty stream.  `detail` carries the underlying decoder's message.
    DecompressionFailed { format: Format, detail: String },
}

impl UnpackError {
    /// Stable identifier for each variant, independent of the
    /// display message.
    pub fn error_name(&self) -> &'static str {
        match self {
            UnpackError::UnsupportedFormat { .. } => "unsupported_format",
            UnpackError::AllocationFailed { .. } => "allocation_failed",
            UnpackError::DecompressionFailed { .. } => "decompression_failed",
        }
    }
}

impl fmt::Display for UnpackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnpackError::UnsupportedFormat { header } => {
                // A payload that passed LZMA detection only lands here when
                // it is shorter than the fixed container header.
                if header.starts_with(&LZMA_SIGNATURE) {
                    write!(
                        f,
                        "truncated LZMA container: {} bytes, need at least {}",
                        header.len(),
                        LZMA_MIN_LEN
                    )
                } else if header.is_empty() {
                    write!(f, "unrecognized ramdisk compression: empty payload")
                } else {
                    write!(
                        f,
                        "unrecognized ramdisk compression, leading bytes: {}",
                        super::detect::header_dump(header)
                    )
                }
            }
            UnpackError::AllocationFailed { requested } => {
                write!(f, "cannot reserve {} bytes for the ramdisk buffer", requested)
            }
            UnpackError::DecompressionFailed { format, detail } => {
                write!(f, "{} decompression failed: {}", format.name(), detail)
            }
        }
    }
}

impl std::error::Error for UnpackError {}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signatures_are_disjoint_in_first_byte() {
        assert_ne!(GZIP_SIGNATURE[0], LZMA_SIGNATURE[0]);
    }

    #[test]
    fn lzma_layout_constants() {
        assert_eq!(LZMA_PROPS_LEN, 5);
        assert_eq!(LZMA_STREAM_OFFSET, 13);
        assert_eq!(LZMA_MIN_LEN, 14);
    }

    #[test]
    fn format_names() {
        assert_eq!(Format::Gzip.name(), "gzip");
        assert_eq!(Format::Lzma.name(), "LZMA");
        assert_eq!(Format::Unrecognized.name(), "unrecognized");
    }

    #[test]
    fn error_names_are_stable() {
        let e = UnpackError::UnsupportedFormat { header: vec![] };
        assert_eq!(e.error_name(), "unsupported_format");
        let e = UnpackError::AllocationFailed { requested: 1 };
        assert_eq!(e.error_name(), "allocation_failed");
        let e = UnpackError::DecompressionFailed {
            format: Format::Gzip,
            detail: String::new(),
        };
        assert_eq!(e.error_name(), "decompression_failed");
    }

    #[test]
    fn unsupported_format_display_dumps_header() {
        let e = UnpackError::UnsupportedFormat {
            header: vec![0u8; HEADER_DUMP_LEN],
        };
        let msg = e.to_string();
        assert!(msg.contains("unrecognized ramdisk compression"));
        // 16 zero bytes rendered as 16 space-separated "00" pairs.
        assert_eq!(msg.matches("00").count(), HEADER_DUMP_LEN);
    }

    #[test]
    fn unsupported_format_display_empty_payload() {
        let e = UnpackError::UnsupportedFormat { header: vec![] };
        assert!(e.to_string().contains("empty payload"));
    }

    #[test]
    fn truncated_lzma_display() {
        let mut header = LZMA_SIGNATURE.to_vec();
        header.extend_from_slice(&[0, 0, 0]);
        let e = UnpackError::UnsupportedFormat { header };
        let msg = e.to_string();
        assert!(msg.contains("truncated LZMA container"));
        assert!(msg.contains("need at least 14"));
    }

    #[test]
    fn decompression_failed_display_names_format() {
        let e = UnpackError::DecompressionFailed {
            format: Format::Lzma,
            detail: "early end of stream".to_owned(),
        };
        let msg = e.to_string();
        assert!(msg.starts_with("LZMA decompression failed"));
        assert!(msg.contains("early end of stream"));
    }

    #[test]
    fn allocation_failed_display_reports_size() {
        let e = UnpackError::AllocationFailed { requested: 40 << 20 };
        assert!(e.to_string().contains(&(40usize << 20).to_string()));
    }
}
