//! Capacity-enforcing in-memory output sink.
//!
//! [`BoundedSink`] wraps the destination vector and refuses any write that
//! would push the total past the configured ceiling.  Both codec adapters
//! stream through it, so "output too large" surfaces as a write error
//! inside the decoder rather than as a truncated buffer: the ceiling is a
//! hard failure, never a silent cut.

use std::io::{self, Write};

/// In-memory `Write` target with a hard byte ceiling.
///
/// Any bytes already in the wrapped vector count toward the ceiling.  A
/// write that would cross it is rejected whole; the sink never partially
/// applies a write.
pub struct BoundedSink {
    buf: Vec<u8>,
    limit: usize,
}

impl BoundedSink {
    /// Wraps `buf`, enforcing `limit` total bytes.
    pub fn new(buf: Vec<u8>, limit: usize) -> Self {
        BoundedSink { buf, limit }
    }

    /// The configured ceiling in bytes.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Total bytes held so far.
    pub fn written(&self) -> usize {
        self.buf.len()
    }

    /// Consumes the sink and returns the destination vector.
    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }
}

impl Write for BoundedSink {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        if self.buf.len() + data.len() > self.limit {
            return Err(io::Error::new(
                io::ErrorKind::WriteZero,
                format!("decompressed output exceeds the {}-byte ceiling", self.limit),
            ));
        }
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_writes_under_limit() {
        let mut sink = BoundedSink::new(Vec::new(), 16);
        sink.write_all(b"hello ").unwrap();
        sink.write_all(b"world").unwrap();
        assert_eq!(sink.written(), 11);
        assert_eq!(sink.into_inner(), b"hello world");
    }

    #[test]
    fn exactly_at_limit_succeeds() {
        let mut sink = BoundedSink::new(Vec::new(), 5);
        sink.write_all(b"12345").unwrap();
        assert_eq!(sink.written(), 5);
    }

    #[test]
    fn one_byte_past_limit_is_rejected() {
        let mut sink = BoundedSink::new(Vec::new(), 5);
        sink.write_all(b"12345").unwrap();
        let err = sink.write(b"6").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::WriteZero);
        assert!(err.to_string().contains("ceiling"));
    }

    #[test]
    fn crossing_write_is_rejected_whole() {
        let mut sink = BoundedSink::new(Vec::new(), 8);
        sink.write_all(b"123456").unwrap();
        // 6 + 4 > 8: nothing from this write is applied.
        assert!(sink.write(b"abcd").is_err());
        assert_eq!(sink.written(), 6);
    }

    #[test]
    fn preexisting_bytes_count_toward_limit() {
        let mut sink = BoundedSink::new(vec![0u8; 4], 6);
        sink.write_all(b"ab").unwrap();
        assert!(sink.write(b"c").is_err());
    }

    #[test]
    fn zero_limit_rejects_everything_but_empty_writes() {
        let mut sink = BoundedSink::new(Vec::new(), 0);
        assert_eq!(sink.write(b"").unwrap(), 0);
        assert!(sink.write(b"x").is_err());
    }

    #[test]
    fn flush_is_a_no_op() {
        let mut sink = BoundedSink::new(Vec::new(), 4);
        sink.write_all(b"ok").unwrap();
        sink.flush().unwrap();
        assert_eq!(sink.written(), 2);
    }
}
