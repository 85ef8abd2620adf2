//! Binary entry point for the `extract_ramdisk` command-line tool.
//!
//! Handles post-parse validation, automatic output filename resolution, and
//! dispatch into the extraction I/O layer.
//!
//! # Control flow
//!
//! 1. [`parse_args`] processes all flags and builds a [`ParsedArgs`] value.
//! 2. [`run`] resolves missing filenames, applies the console-safety rules,
//!    and performs the extraction, returning an exit code.

use std::io::IsTerminal;

use ramdisk::cli::args::{parse_args, ParsedArgs};
use ramdisk::cli::help::{error_out, print_usage};
use ramdisk::config::{DISPLAY_LEVEL_DEFAULT, GZ_EXTENSION, LZMA_EXTENSION};
use ramdisk::io::{extract_filename, NUL_MARK, STDIN_MARK, STDOUT_MARK};
use ramdisk::unpack::prefs::{display_level, notification_level, set_notification_level};

/// Exit code for a failed extraction (I/O error, unrecognized or corrupt
/// payload, ceiling exceeded).  Usage errors and console refusals exit 1.
const EXIT_OPERATION_FAILED: i32 = 66;

// ── Post-parse dispatch ───────────────────────────────────────────────────────

/// Execute the extraction selected by argument parsing.
///
/// Returns the process exit code (0 = success, non-zero = error).
fn run(args: ParsedArgs) -> i32 {
    let prefs = args.prefs;
    let force_stdout = args.force_stdout;
    let mut output_filename = args.output_filename;
    let exe_name = args.exe_name;

    // Test mode decodes and validates, then discards.
    if prefs.test_mode {
        output_filename = Some(NUL_MARK.to_owned());
    }

    // Default input filename to stdin.
    let input_filename: String = args.input_filename.unwrap_or_else(|| STDIN_MARK.to_owned());

    // Refuse to read binary data from a console.
    if input_filename == STDIN_MARK && std::io::stdin().is_terminal() {
        display_level(1, "refusing to read from a console\n");
        return 1;
    }

    // Reading from stdin defaults the output to stdout.
    if input_filename == STDIN_MARK && output_filename.is_none() {
        output_filename = Some(STDOUT_MARK.to_owned());
    }

    // Auto output filename determination: strip the compression extension.
    let output_filename: String = match output_filename {
        Some(name) => name,
        None => {
            let base = input_filename
                .strip_suffix(GZ_EXTENSION)
                .or_else(|| input_filename.strip_suffix(LZMA_EXTENSION));
            match base {
                Some(base) => {
                    display_level(2, &format!("Decoding file {} \n", base));
                    base.to_owned()
                }
                None => {
                    display_level(1, "Cannot determine an output filename \n");
                    print_usage(&exe_name);
                    return 1;
                }
            }
        }
    };

    // Refuse to splash binary data on a console unless forced.
    if output_filename == STDOUT_MARK && std::io::stdout().is_terminal() && !force_stdout {
        display_level(1, "refusing to write to console without -c \n");
        return 1;
    }

    // Piping to stdout downgrades result chatter to errors only.
    if output_filename == STDOUT_MARK && notification_level() == 2 {
        set_notification_level(1);
    }

    match extract_filename(&input_filename, &output_filename, &prefs) {
        Ok(_) => 0,
        Err(e) => {
            display_level(1, &format!("{}: {} \n", exe_name, e));
            EXIT_OPERATION_FAILED
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    set_notification_level(DISPLAY_LEVEL_DEFAULT);

    // Argument parsing loop.
    let args = match parse_args() {
        Ok(a) => a,
        Err(e) => error_out(&format!("extract_ramdisk: {}", e)),
    };

    // Help / version flags set exit_early; exit 0 without any I/O.
    if args.exit_early {
        std::process::exit(0);
    }

    let exit_code = run(args);
    std::process::exit(exit_code);
}
