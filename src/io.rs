//! Public API surface for ramdisk file I/O operations.
//!
//! This module assembles the file-level sub-modules and re-exports the
//! symbols consumed by the CLI and library users.  The in-memory
//! decompression core lives in [`crate::unpack`]; everything here deals
//! with named files and the stdio sentinels.

pub mod extract;
pub mod file_io;

// ── Special I/O sentinels ─────────────────────────────────────────────────────
pub use file_io::{NULL_OUTPUT, NUL_MARK, STDIN_MARK, STDOUT_MARK};

// ── Low-level open helpers ────────────────────────────────────────────────────
pub use file_io::{open_dst_file, open_src_file, DstFile};

// ── Extraction public API ─────────────────────────────────────────────────────
/// Decompress a single ramdisk file.
pub use extract::extract_filename;

/// Byte counts reported by a completed extraction.
pub use extract::ExtractStats;
