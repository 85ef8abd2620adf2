//! Command-line argument parsing for the `extract_ramdisk` binary.
//!
//! The entry points are [`parse_args`] (reads `std::env::args()`) and
//! [`parse_args_from`] (takes an explicit slice, suitable for unit-testing).
//! Both return a [`ParsedArgs`] value that captures every option and filename
//! discovered during the parse.
//!
//! Short options may be aggregated (e.g. `-tfv`).  Long options use either
//! `--option=VALUE` or `--option VALUE` syntax.  A bare `--` marks the end of
//! options; all subsequent arguments are treated as file paths regardless of
//! whether they start with `-`.
//!
//! Bad or unrecognised options return an `Err` with a human-readable message
//! that begins with `"bad usage: "`.

use anyhow::anyhow;

use crate::cli::arg_utils::{last_name_from_path, long_command_w_arg, read_size_from_str};
use crate::cli::help::{print_usage_advanced, TOOL_NAME};
use crate::io::file_io::{NULL_OUTPUT, NUL_MARK, STDIN_MARK, STDOUT_MARK};
use crate::unpack::prefs::{notification_level, set_notification_level, Prefs};

// ── Public output type ─────────────────────────────────────────────────────────

/// Complete set of options and filenames produced by the argument parsing loop.
///
/// Fields are populated by [`parse_args_from`] and consumed by the dispatch
/// phase in `main`, which resolves missing filenames and runs the extraction.
#[derive(Debug)]
pub struct ParsedArgs {
    /// Extraction preferences (overwrite, test mode, size ceiling).
    pub prefs: Prefs,
    /// Force output to stdout even if it is a terminal.
    pub force_stdout: bool,
    /// Input filename.
    pub input_filename: Option<String>,
    /// Output filename.
    pub output_filename: Option<String>,
    /// When `true`, a --version / --help flag was processed; the caller should
    /// exit 0 without performing any I/O operation.
    pub exit_early: bool,
    /// Program name (argv[0] basename), used by help functions.
    pub exe_name: String,
}

// ── Public API ─────────────────────────────────────────────────────────────────

/// Parse `std::env::args()` (skipping argv[0]).
///
/// Delegates to [`parse_args_from`] after collecting `argv` into a `Vec<String>`.
pub fn parse_args() -> anyhow::Result<ParsedArgs> {
    let argv0 = std::env::args().next().unwrap_or_default();
    let exe_name = last_name_from_path(&argv0).to_owned();
    let argv: Vec<String> = std::env::args().skip(1).collect();
    parse_args_from(&exe_name, &argv)
}

/// Parse an explicit argument list.
///
/// `exe_name` is argv[0] (used for help text). `argv` is argv[1..].
/// This variant is callable from tests without touching `std::env`.
pub fn parse_args_from(exe_name: &str, argv: &[String]) -> anyhow::Result<ParsedArgs> {
    // --- Mutable parsing state ---
    let mut prefs = Prefs::default();
    let mut force_stdout = false;
    let mut all_arguments_are_files = false;
    let mut input_filename: Option<String> = None;
    let mut output_filename: Option<String> = None;
    let mut exit_early = false;

    // ── Main argument loop ──────────────────────────────────────────────────

    let mut arg_idx = 0usize;
    while arg_idx < argv.len() {
        let argument = &argv[arg_idx];

        if argument.is_empty() {
            arg_idx += 1;
            continue;
        }

        let bytes = argument.as_bytes();

        // ── Non-option path (or end-of-options forced by `--`) ────────────────
        if all_arguments_are_files || bytes[0] != b'-' {
            if input_filename.is_none() {
                input_filename = Some(argument.clone());
            } else if output_filename.is_none() {
                // The special filename "null" is normalised to a sentinel so
                // downstream code recognises it as the discard output.
                let s = if argument == NULL_OUTPUT {
                    NUL_MARK.to_owned()
                } else {
                    argument.clone()
                };
                output_filename = Some(s);
            } else {
                return Err(anyhow!(
                    "bad usage: {} won't be used; expected at most one input and one output",
                    argument
                ));
            }
            arg_idx += 1;
            continue;
        }

        // ── Single `-` means stdin (as input) or stdout (as output) ──────────
        if bytes.len() == 1 {
            // `-` alone
            if input_filename.is_none() {
                input_filename = Some(STDIN_MARK.to_owned());
            } else {
                output_filename = Some(STDOUT_MARK.to_owned());
            }
            arg_idx += 1;
            continue;
        }

        // ── Long options (`--...`) ────────────────────────────────────────────
        if bytes[1] == b'-' {
            // `--` end-of-options sentinel
            if argument == "--" {
                all_arguments_are_files = true;
                arg_idx += 1;
                continue;
            }

            // Dispatch on the long option name.

            if argument == "--test" {
                prefs.set_test_mode(true);
            } else if argument == "--force" {
                prefs.set_overwrite(true);
            } else if argument == "--no-force" {
                prefs.set_overwrite(false);
            } else if argument == "--stdout" || argument == "--to-stdout" {
                force_stdout = true;
                output_filename = Some(STDOUT_MARK.to_owned());
            } else if argument == "--verbose" {
                set_notification_level(notification_level().saturating_add(1));
            } else if argument == "--quiet" {
                let lvl = notification_level();
                if lvl > 0 {
                    set_notification_level(lvl - 1);
                }
            } else if argument == "--version" {
                print_welcome_message();
                exit_early = true;
                break;
            } else if argument == "--help" {
                print_usage_advanced(exe_name);
                exit_early = true;
                break;
            } else if let Some(rest) = long_command_w_arg(argument, "--max-size") {
                // Accepts `--max-size=SIZE` or `--max-size SIZE` syntax.
                let value: &str = if let Some(v) = rest.strip_prefix('=') {
                    v
                } else if rest.is_empty() {
                    // `--max-size SIZE` — value is next argument
                    arg_idx += 1;
                    match argv.get(arg_idx) {
                        Some(next) => next.as_str(),
                        None => {
                            return Err(anyhow!("bad usage: --max-size: missing size argument"))
                        }
                    }
                } else {
                    return Err(anyhow!("bad usage: unknown option: {}", argument));
                };
                let (size, remainder) = read_size_from_str(value)
                    .ok_or_else(|| anyhow!("bad usage: --max-size: expected a size value"))?;
                if !remainder.is_empty() {
                    return Err(anyhow!(
                        "bad usage: --max-size: malformed size value: {}",
                        value
                    ));
                }
                prefs.set_max_unpacked_size(size);
            } else {
                return Err(anyhow!("bad usage: unknown option: {}", argument));
            }

            arg_idx += 1;
            continue;
        }

        // ── Short options (possibly aggregated, e.g. `-tfv`) ─────────────────
        //
        // `char_pos` starts at 1 (the first flag character after `-`).
        // Each iteration handles one flag character and increments `char_pos`.

        let mut char_pos: usize = 1; // skip the leading '-'
        while char_pos < bytes.len() {
            match bytes[char_pos] {
                b'V' => {
                    // Print version and exit.
                    print_welcome_message();
                    exit_early = true;
                    break; // exit short-option loop
                }
                b'h' => {
                    // Print help and exit.
                    print_usage_advanced(exe_name);
                    exit_early = true;
                    break;
                }
                b'c' => {
                    // Force output to stdout, even if it is the console.
                    force_stdout = true;
                    output_filename = Some(STDOUT_MARK.to_owned());
                }
                b't' => {
                    // Verify integrity of the compressed image; no output is written.
                    prefs.set_test_mode(true);
                }
                b'f' => {
                    // Overwrite existing destination files without prompting.
                    prefs.set_overwrite(true);
                }
                b'v' => {
                    // Increase verbosity level.
                    set_notification_level(notification_level().saturating_add(1));
                }
                b'q' => {
                    // Decrease verbosity level.
                    let lvl = notification_level();
                    if lvl > 0 {
                        set_notification_level(lvl - 1);
                    }
                }
                b'm' => {
                    // Set the decompressed-size ceiling.
                    // Accepts `-mSIZE` (inline) or `-m SIZE` (next argument).
                    let next = char_pos + 1;
                    if next < bytes.len() && bytes[next].is_ascii_digit() {
                        let (size, remainder) = read_size_from_str(&argument[next..])
                            .expect("is_ascii_digit guarantees at least one digit");
                        prefs.set_max_unpacked_size(size);
                        let consumed = argument[next..].len() - remainder.len();
                        char_pos = next + consumed - 1;
                    } else if next >= bytes.len() {
                        // `-m SIZE` — value is next argument
                        arg_idx += 1;
                        if arg_idx >= argv.len() {
                            return Err(anyhow!("bad usage: -m requires a size argument"));
                        }
                        let (size, remainder) = read_size_from_str(&argv[arg_idx])
                            .ok_or_else(|| anyhow!("bad usage: -m: expected a size value"))?;
                        if !remainder.is_empty() {
                            return Err(anyhow!(
                                "bad usage: -m: malformed size value: {}",
                                &argv[arg_idx]
                            ));
                        }
                        prefs.set_max_unpacked_size(size);
                        char_pos = bytes.len() - 1; // skip to end of current arg
                    } else {
                        return Err(anyhow!("bad usage: -m requires a size argument"));
                    }
                }
                _ => {
                    // Unrecognised short option.
                    return Err(anyhow!(
                        "bad usage: unrecognised option: -{c}",
                        c = bytes[char_pos] as char
                    ));
                }
            }

            if exit_early {
                break; // propagate early exit out of short-option loop
            }
            char_pos += 1;
        }

        if exit_early {
            break; // propagate out of main argument loop
        }

        arg_idx += 1;
    }

    Ok(ParsedArgs {
        prefs,
        force_stdout,
        input_filename,
        output_filename,
        exit_early,
        exe_name: exe_name.to_owned(),
    })
}

// ── Private helpers ────────────────────────────────────────────────────────────

/// Prints the version banner to stdout.
fn print_welcome_message() {
    let bits = (std::mem::size_of::<usize>() * 8) as u32;
    println!(
        "*** {} v{} {}-bit ***",
        TOOL_NAME,
        crate::VERSION_STRING,
        bits
    );
}

// ── Tests ──────────────────────────────────────────────────────────────────────
