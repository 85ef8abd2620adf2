// config.rs — Compile-time configuration constants.

/// Default ceiling for a decompressed ramdisk: 40 MiB.
///
/// Boot and recovery ramdisks are far smaller in practice; anything past
/// this bound is treated as corrupt or hostile input, and the extraction
/// fails rather than truncating.  Override per call with
/// [`decompress_with_limit`](crate::unpack::decompress_with_limit) or the
/// `--max-size` CLI option.
pub const MAX_UNPACKED_SIZE_DEFAULT: usize = 40 << 20;

/// Notification level the CLI starts at (results + warnings).
/// The library default is 0 (silent); only the binary raises it.
pub const DISPLAY_LEVEL_DEFAULT: i32 = 2;

/// Source suffix recognized for gzip payloads when deriving an output name.
pub const GZ_EXTENSION: &str = ".gz";

/// Source suffix recognized for LZMA payloads when deriving an output name.
pub const LZMA_EXTENSION: &str = ".lzma";
