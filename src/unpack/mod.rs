//! Ramdisk decompression core.
//!
//! This module assembles the detection/dispatch pipeline and re-exports the
//! symbols consumed by the I/O layer, the CLI, and library users.  The core
//! performs no file I/O: payloads come in as owned byte vectors and leave
//! as owned byte vectors.

pub mod detect;
pub mod dispatch;
pub mod gzip;
pub mod lzma;
pub mod prefs;
pub mod sink;
pub mod types;

// ── Core type re-exports ─────────────────────────────────────────────────────
pub use types::{Format, UnpackError};

// ── Container contract constants ─────────────────────────────────────────────
pub use types::{
    GZIP_SIGNATURE, HEADER_DUMP_LEN, LZMA_MIN_LEN, LZMA_PROPS_LEN, LZMA_SIGNATURE,
    LZMA_STREAM_OFFSET,
};

// ── Detection ────────────────────────────────────────────────────────────────
/// Classify a payload from its magic bytes.
pub use detect::detect;

// ── Decompression entry points ───────────────────────────────────────────────
/// Decompress with the process-default 40 MiB ceiling.
pub use dispatch::decompress;

/// Decompress with an explicit output ceiling.
pub use dispatch::decompress_with_limit;

// ── Output sink ──────────────────────────────────────────────────────────────
pub use sink::BoundedSink;

// ── Preferences and notification level ───────────────────────────────────────
pub use prefs::{display_level, notification_level, set_notification_level, Prefs, DISPLAY_LEVEL};
pub use prefs::{GB, KB, MB};
