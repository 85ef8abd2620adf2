//! Gzip codec adapter.
//!
//! One-shot decode of a gzip member resident in memory, streamed through a
//! [`BoundedSink`] so the output ceiling is enforced by the sink rather
//! than checked after the fact.  Decoding stops at the member's end; bytes
//! trailing the first member are ignored, which matches the single-pass
//! semantics of the ramdisk packers this tool supports.

use std::io;

use flate2::bufread::GzDecoder;

use super::sink::BoundedSink;

/// Inflates the gzip member at the start of `compressed` into `dest`.
///
/// Returns the number of decompressed bytes written.  Truncated or corrupt
/// streams, header fields the decoder rejects, and output past the sink's
/// ceiling all surface as errors; none of them are distinguished here.
pub fn decode_gzip(compressed: &[u8], dest: &mut BoundedSink) -> io::Result<u64> {
    let mut decoder = GzDecoder::new(compressed);
    io::copy(&mut decoder, dest)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
