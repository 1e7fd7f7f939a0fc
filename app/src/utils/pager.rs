use core::cmp;

/// Splits `text` into display pages of `out.len() - 1` bytes and writes page
/// `page_idx` into `out`, NUL-terminated.
///
/// Returns the page count. `out` is always zeroed first, so a page index
/// past the last page leaves it empty. Empty text, or an output with no room
/// besides the terminator, has no pages.
#[inline(never)]
pub fn page_string(out: &mut [u8], text: &[u8], page_idx: u8) -> u8 {
    out.fill(0);

    let page_len = out.len().saturating_sub(1);
    if page_len == 0 || text.is_empty() {
        return 0;
    }

    let page_count = cmp::min(text.len().div_ceil(page_len), u8::MAX as usize) as u8;

    if page_idx < page_count {
        let start = page_idx as usize * page_len;
        let end = cmp::min(start + page_len, text.len());
        out[..end - start].copy_from_slice(&text[start..end]);
    }

    page_count
}
