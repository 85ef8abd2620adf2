//! Usage text and exit helpers for the `extract_ramdisk` binary.

use crate::config::{GZ_EXTENSION, LZMA_EXTENSION, MAX_UNPACKED_SIZE_DEFAULT};
use crate::io::file_io::{NULL_OUTPUT, STDIN_MARK, STDOUT_MARK};
use crate::unpack::prefs::notification_level;
use crate::unpack::MB;

/// Program identity string used by banners and help text.
pub const TOOL_NAME: &str = "extract_ramdisk";

// ── error_out ─────────────────────────────────────────────────────────────────
/// Print `msg` to stderr (at notification level ≥ 1) then exit with code 1.
pub fn error_out(msg: &str) -> ! {
    if notification_level() >= 1 {
        eprintln!("{} ", msg);
    }
    std::process::exit(1);
}

// ── usage ─────────────────────────────────────────────────────────────────────
/// Print brief usage to stderr.
pub fn print_usage(program: &str) {
    eprintln!("Usage : ");
    eprintln!("      {} [arg] [input] [output] ", program);
    eprintln!();
    eprintln!("input   : a gzip or LZMA compressed ramdisk image ");
    eprintln!(
        "          with no FILE, or when FILE is - or {}, read standard input",
        STDIN_MARK
    );
    eprintln!("Arguments : ");
    eprintln!(" -t     : test the compressed image; decode without writing output ");
    eprintln!(" -f     : overwrite output without prompting ");
    eprintln!(
        " -m#    : cap the decompressed size at # bytes (default: {} MiB) ",
        MAX_UNPACKED_SIZE_DEFAULT / MB
    );
    eprintln!(" -h     : display help and exit ");
}

// ── usage_advanced ────────────────────────────────────────────────────────────
/// Print the version banner followed by brief usage and advanced options to stderr.
pub fn print_usage_advanced(program: &str) {
    let bits = (std::mem::size_of::<*const ()>() * 8) as u32;
    eprintln!(
        "*** {} v{} {}-bit ***",
        TOOL_NAME,
        crate::VERSION_STRING,
        bits
    );

    print_usage(program);

    eprintln!();
    eprintln!("Advanced arguments :");
    eprintln!(" -V     : display Version number and exit ");
    eprintln!(" -v     : verbose mode ");
    eprintln!(" -q     : suppress warnings; specify twice to suppress errors too");
    eprintln!(" -c     : force write to standard output, even if it is the console");
    eprintln!("--max-size=# : same as -m#; # accepts K / M / G suffixes ");
    eprintln!();
    eprintln!("[output] : a filename ");
    eprintln!(
        "          '{}', or '-' for standard output (pipe mode)",
        STDOUT_MARK
    );
    eprintln!(
        "          '{}' to discard output (test mode) ",
        NULL_OUTPUT
    );
    eprintln!("[output] can be left empty; it is then derived from [input] by");
    eprintln!(
        "removing its '{}' or '{}' extension ",
        GZ_EXTENSION, LZMA_EXTENSION
    );
}
