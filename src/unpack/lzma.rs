//! LZMA codec adapter.
//!
//! Decodes the LZMA-alone containers emitted by the supported ramdisk
//! packers: 5 properties bytes, an 8-byte uncompressed-size field, then
//! the compressed bitstream at offset [`LZMA_STREAM_OFFSET`].  The size
//! field is read but not interpreted — the packers fill it with `0xFF`
//! (size unknown) and terminate the stream with an end-of-stream marker,
//! so decoding runs to that marker.  The decoder's memory limit is tied to
//! the sink's ceiling, making oversized output an error during decode
//! rather than an unbounded allocation.
//!
//! [`LZMA_STREAM_OFFSET`]: super::types::LZMA_STREAM_OFFSET

use lzma_rs::decompress::{Options, UnpackedSize};
use lzma_rs::error::Error;

use super::sink::BoundedSink;

/// Decodes the LZMA-alone container in `compressed` into `dest`.
///
/// Returns the number of decompressed bytes written.  Containers shorter
/// than the fixed header, corrupt bitstreams, and output past the ceiling
/// all surface as errors.
pub fn decode_lzma(compressed: &[u8], dest: &mut BoundedSink) -> Result<u64, Error> {
    let options = Options {
        unpacked_size: UnpackedSize::ReadHeaderButUseProvided(None),
        memlimit: Some(dest.limit()),
        allow_incomplete: false,
    };
    let already = dest.written();
    let mut input = compressed;
    lzma_rs::lzma_decompress_with_options(&mut input, dest, &options)?;
    Ok((dest.written() - already) as u64)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unpack::prefs::KB;
    use crate::unpack::types::LZMA_SIGNATURE;

    fn lzma_fixture(data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        let mut input = data;
        lzma_rs::lzma_compress(&mut input, &mut out).unwrap();
        out
    }

    #[test]
    fn fixture_matches_packer_convention() {
        // The encoder's defaults are the exact container this tool detects:
        // props 0x5D, 8 MiB dictionary, unknown-size field.
        let compressed = lzma_fixture(b"ramdisk");
        assert!(
            compressed.starts_with(&LZMA_SIGNATURE),
            "unexpected LZMA-alone header: {:02x?}",
            &compressed[..6.min(compressed.len())]
        );
    }

    #[test]
    fn roundtrip_reports_written_length() {
        let data = b"newc archive bytes would go here, cpio and all";
        let compressed = lzma_fixture(data);
        let mut sink = BoundedSink::new(Vec::new(), KB);
        let n = decode_lzma(&compressed, &mut sink).unwrap();
        assert_eq!(n, data.len() as u64);
        assert_eq!(sink.into_inner(), data);
    }

    #[test]
    fn truncated_stream_errors() {
        let compressed = lzma_fixture(&[0x42u8; 2 * KB]);
        let cut = &compressed[..compressed.len() - 4];
        let mut sink = BoundedSink::new(Vec::new(), 8 * KB);
        assert!(decode_lzma(cut, &mut sink).is_err());
    }

    #[test]
    fn invalid_properties_byte_errors() {
        // 0xFF cannot encode valid lc/lp/pb values.
        let mut compressed = lzma_fixture(b"props check");
        compressed[0] = 0xFF;
        let mut sink = BoundedSink::new(Vec::new(), KB);
        assert!(decode_lzma(&compressed, &mut sink).is_err());
    }

    #[test]
    fn output_over_ceiling_errors() {
        let compressed = lzma_fixture(&vec![b'A'; 64 * KB]);
        let mut sink = BoundedSink::new(Vec::new(), 16 * KB);
        assert!(decode_lzma(&compressed, &mut sink).is_err());
    }

    #[test]
    fn too_short_for_container_header_errors() {
        // 10 bytes cannot hold the 13-byte header.  The orchestrator
        // rejects these before dispatch; the decoder also refuses them.
        let mut short = LZMA_SIGNATURE.to_vec();
        short.extend_from_slice(&[0xFF; 4]);
        let mut sink = BoundedSink::new(Vec::new(), KB);
        assert!(decode_lzma(&short, &mut sink).is_err());
    }
}
