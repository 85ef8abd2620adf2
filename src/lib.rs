// ramdiskr — boot/recovery ramdisk decompression library and tool.

pub mod config;
pub mod unpack;
pub mod io;
pub mod cli;

// ── Version constants ─────────────────────────────────────────────────────────
pub const VERSION_STRING: &str = env!("CARGO_PKG_VERSION");

// ── Top-level re-exports ──────────────────────────────────────────────────────
pub use unpack::{decompress, decompress_with_limit, detect, Format, Prefs, UnpackError};
pub use unpack::set_notification_level;
pub use io::{extract_filename, ExtractStats};
