// prefs.rs — tunable preferences and the global notification level.
//
// The notification level is process-wide and intentionally not part of
// `Prefs`: library callers default to silence (level 0), and only the CLI
// raises it.  `Prefs` itself is a plain value type owned by the caller.

use std::sync::atomic::{AtomicI32, Ordering};

// ---------------------------------------------------------------------------
// Numeric constants
// ---------------------------------------------------------------------------
pub const KB: usize = 1 << 10;
pub const MB: usize = 1 << 20;
pub const GB: usize = 1 << 30;

// ---------------------------------------------------------------------------
// Display / notification globals
// ---------------------------------------------------------------------------

/// Global notification level. 0 = silent, 1 = errors only, 2 = results +
/// warnings, 3 = progress, 4+ = verbose.
pub static DISPLAY_LEVEL: AtomicI32 = AtomicI32::new(0);

/// Write `msg` to stderr if the current notification level is ≥ `level`.
/// Flushes stderr when level ≥ 4.
#[inline]
pub fn display_level(level: i32, msg: &str) {
    if DISPLAY_LEVEL.load(Ordering::Relaxed) >= level {
        eprint!("{}", msg);
        if DISPLAY_LEVEL.load(Ordering::Relaxed) >= 4 {
            // flush — best-effort; ignore errors
            use std::io::Write;
            let _ = std::io::stderr().flush();
        }
    }
}

/// Sets the global notification level. Returns the value stored.
pub fn set_notification_level(level: i32) -> i32 {
    DISPLAY_LEVEL.store(level, Ordering::Relaxed);
    level
}

/// Returns the current global notification level.
#[inline]
pub fn notification_level() -> i32 {
    DISPLAY_LEVEL.load(Ordering::Relaxed)
}

// ---------------------------------------------------------------------------
// Preferences struct
// ---------------------------------------------------------------------------

/// All tunable parameters for ramdisk extraction.
///
/// A plain value type; the caller owns it directly and passes it by
/// reference into the I/O layer.
#[derive(Clone, Debug)]
pub struct Prefs {
    /// Overwrite an existing destination file. Default: false (the open
    /// fails rather than clobbering; there is no interactive prompt).
    pub overwrite: bool,
    /// Test mode — decompress and validate, discard output. Default: false.
    pub test_mode: bool,
    /// Ceiling for the decompressed ramdisk, in bytes. Output larger than
    /// this fails the extraction rather than being truncated.
    /// Default: [`crate::config::MAX_UNPACKED_SIZE_DEFAULT`].
    pub max_unpacked_size: usize,
}

impl Default for Prefs {
    fn default() -> Self {
        Prefs {
            overwrite: false,
            test_mode: false,
            max_unpacked_size: crate::config::MAX_UNPACKED_SIZE_DEFAULT,
        }
    }
}

impl Prefs {
    /// Creates a new `Prefs` with all defaults applied.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables destination-file overwrite. Returns the new value.
    pub fn set_overwrite(&mut self, yes: bool) -> bool {
        self.overwrite = yes;
        yes
    }

    /// Enables or disables test mode (decompress, discard). Returns the new value.
    pub fn set_test_mode(&mut self, yes: bool) -> bool {
        self.test_mode = yes;
        yes
    }

    /// Sets the decompressed-size ceiling in bytes, clamped to at least 1.
    /// Returns the value stored.
    pub fn set_max_unpacked_size(&mut self, bytes: usize) -> usize {
        let clamped = bytes.max(1);
        self.max_unpacked_size = clamped;
        clamped
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_prefs_fields() {
        let p = Prefs::default();
        assert!(!p.overwrite);
        assert!(!p.test_mode);
        assert_eq!(p.max_unpacked_size, crate::config::MAX_UNPACKED_SIZE_DEFAULT);
        assert_eq!(p.max_unpacked_size, 40 * MB);
    }

    #[test]
    fn setters_return_stored_value() {
        let mut p = Prefs::default();
        assert!(p.set_overwrite(true));
        assert!(p.overwrite);
        assert!(p.set_test_mode(true));
        assert!(p.test_mode);
        assert_eq!(p.set_max_unpacked_size(512 * KB), 512 * KB);
        assert_eq!(p.max_unpacked_size, 512 * KB);
    }

    #[test]
    fn set_max_unpacked_size_clamps_to_one() {
        let mut p = Prefs::default();
        assert_eq!(p.set_max_unpacked_size(0), 1);
    }

    // The notification level is process-global and tests run in parallel;
    // the CLI parser tests own it (they are the only writer in this binary).
}
