//! Low-level argument parsing utilities.
//!
//! Shared by the main parsing loop in [`crate::cli::args`]: path basename
//! extraction and numeric parsing with binary size suffixes.

/// Returns the last path component of `path`, handling both `/` and `\` separators.
pub fn last_name_from_path(path: &str) -> &str {
    let after_slash = match path.rfind('/') {
        Some(pos) => &path[pos + 1..],
        None => path,
    };
    match after_slash.rfind('\\') {
        Some(pos) => &after_slash[pos + 1..],
        None => after_slash,
    }
}

/// Parses a byte count from the start of `s`, optionally followed by a size
/// suffix.  Returns `None` if no leading digits are present, or
/// `Some((value, remainder))` where `remainder` is the slice of `s` that was
/// not consumed.
///
/// Recognised suffixes (case-sensitive):
///   `K` / `KB` / `KiB`  → multiply by 1 024
///   `M` / `MB` / `MiB`  → multiply by 1 048 576
///   `G` / `GB` / `GiB`  → multiply by 1 073 741 824
///
/// Arithmetic saturates at `usize::MAX` rather than wrapping; a saturated
/// value is still a valid (if absurd) ceiling.
pub fn read_size_from_str(s: &str) -> Option<(usize, &str)> {
    let bytes = s.as_bytes();
    let mut i = 0usize;

    // Require at least one digit.
    if i >= bytes.len() || !bytes[i].is_ascii_digit() {
        return None;
    }

    let mut result: usize = 0;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        result = result
            .saturating_mul(10)
            .saturating_add((bytes[i] - b'0') as usize);
        i += 1;
    }

    if i < bytes.len() {
        let multiplier: usize = match bytes[i] {
            b'K' => 1 << 10,
            b'M' => 1 << 20,
            b'G' => 1 << 30,
            _ => 1,
        };
        if multiplier > 1 {
            result = result.saturating_mul(multiplier);
            i += 1;
            // Optional `iB` / `B` tail after the suffix letter.
            if i < bytes.len() && bytes[i] == b'i' {
                i += 1;
            }
            if i < bytes.len() && bytes[i] == b'B' {
                i += 1;
            }
        }
    }

    Some((result, &s[i..]))
}

/// If `arg` starts with `prefix`, returns the remainder of `arg` after `prefix`.
/// Otherwise returns `None`.
pub fn long_command_w_arg<'a>(arg: &'a str, prefix: &str) -> Option<&'a str> {
    arg.strip_prefix(prefix)
}
