mod pager;

pub use pager::page_string;

/// Return the len of the string until null termination
pub fn strlen(bytes: &[u8]) -> usize {
    bytes.split(|&n| n == 0).next().unwrap_or(bytes).len()
}

/// Copies `src` into `out` as a NUL-terminated string, truncating so the
/// terminator always fits. An empty `out` is left untouched.
///
/// Returns the number of bytes copied, terminator excluded.
pub fn write_str(out: &mut [u8], src: &[u8]) -> usize {
    let Some(max_len) = out.len().checked_sub(1) else {
        return 0;
    };

    let len = core::cmp::min(strlen(src), max_len);
    out[..len].copy_from_slice(&src[..len]);
    out[len] = 0;

    len
}
