//! Command-line interface for the `extract_ramdisk` binary.
//!
//! This module organises the full CLI pipeline:
//!
//! | Submodule     | Responsibility |
//! |---------------|---------------|
//! | [`help`]      | Usage/help text printers and the `error_out` exit helper. |
//! | [`arg_utils`] | Low-level argument parsing utilities: path basename, byte-count parsing with K/M/G suffixes. |
//! | [`args`]      | `ParsedArgs` — full argument-parsing loop that consumes `argv` and produces the final set of runtime options. |
//!
//! Typical call sequence: `parse_args` → filename resolution in `main` → dispatch to the I/O layer.

pub mod help;
pub mod arg_utils;
pub mod args;
