//! Format detection from magic-byte signatures.
//!
//! Classification is a pure byte-prefix comparison; no container structure
//! is parsed here.  Gzip is checked first — the two signatures are disjoint
//! in their first byte (`0x1F` vs `0x5D`), so the ordering is not
//! observable, but it is fixed for determinism.

use super::types::{Format, GZIP_SIGNATURE, HEADER_DUMP_LEN, LZMA_SIGNATURE};

/// Classifies `payload` by its leading bytes.
///
/// Payloads shorter than a signature simply fail that comparison; an empty
/// payload is `Unrecognized`.  No minimum length is required.
pub fn detect(payload: &[u8]) -> Format {
    if payload.starts_with(&GZIP_SIGNATURE) {
        Format::Gzip
    } else if payload.starts_with(&LZMA_SIGNATURE) {
        Format::Lzma
    } else {
        Format::Unrecognized
    }
}

/// Renders the first [`HEADER_DUMP_LEN`] bytes of `payload` as
/// space-separated hex pairs, for the unrecognized-format diagnostic.
///
/// Payloads shorter than the dump window are rendered in full.
pub fn header_dump(payload: &[u8]) -> String {
    let mut out = String::with_capacity(3 * HEADER_DUMP_LEN);
    for (i, byte) in payload.iter().take(HEADER_DUMP_LEN).enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&format!("{:02x}", byte));
    }
    out
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_gzip_from_two_byte_prefix() {
        assert_eq!(detect(&[0x1F, 0x8B]), Format::Gzip);
        assert_eq!(detect(&[0x1F, 0x8B, 0x08, 0x00]), Format::Gzip);
    }

    #[test]
    fn detects_lzma_from_six_byte_prefix() {
        assert_eq!(detect(&LZMA_SIGNATURE), Format::Lzma);
        let mut long = LZMA_SIGNATURE.to_vec();
        long.extend_from_slice(&[0xFF; 20]);
        assert_eq!(detect(&long), Format::Lzma);
    }

    #[test]
    fn partial_signatures_are_unrecognized() {
        // One byte of the gzip signature is not enough.
        assert_eq!(detect(&[0x1F]), Format::Unrecognized);
        // Five of the six LZMA signature bytes are not enough.
        assert_eq!(detect(&LZMA_SIGNATURE[..5]), Format::Unrecognized);
    }

    #[test]
    fn empty_payload_is_unrecognized() {
        assert_eq!(detect(&[]), Format::Unrecognized);
    }

    #[test]
    fn zeros_are_unrecognized() {
        assert_eq!(detect(&[0u8; 20]), Format::Unrecognized);
    }

    #[test]
    fn lzma_like_prefix_with_wrong_dict_size_is_unrecognized() {
        // Same properties byte, different dictionary-size encoding.
        assert_eq!(
            detect(&[0x5D, 0x00, 0x00, 0x01, 0x00, 0xFF, 0x00, 0x00]),
            Format::Unrecognized
        );
    }

    #[test]
    fn header_dump_caps_at_sixteen_bytes() {
        let dump = header_dump(&[0u8; 20]);
        assert_eq!(dump, "00 ".repeat(15) + "00");
    }

    #[test]
    fn header_dump_short_payload() {
        assert_eq!(header_dump(&[0xDE, 0xAD, 0xBE, 0xEF]), "de ad be ef");
    }

    #[test]
    fn header_dump_empty() {
        assert_eq!(header_dump(&[]), "");
    }
}
