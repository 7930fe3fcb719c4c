//! Bounded excerpts that never stop inside a code fence.

const FENCE_CHAR: char = '`';
const FENCE_LEN: usize = 3;

/// Clip `text` to roughly `probe_chars` characters.
///
/// The first `probe_chars` characters form the window. When the window holds a
/// backtick, the excerpt is stretched past the window up to and including the
/// closing fence that follows the window's last backtick. With no backtick
/// after it, the plain window is returned.
///
/// Lengths and offsets count `char`s, so multi-byte text never splits.
pub fn extract_excerpt(text: &str, probe_chars: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    let window_end = probe_chars.min(chars.len());

    let Some(open) = chars[..window_end].iter().rposition(|&c| c == FENCE_CHAR) else {
        return chars[..window_end].iter().collect();
    };

    let closing = chars
        .get(open + FENCE_LEN..)
        .and_then(|rest| rest.iter().position(|&c| c == FENCE_CHAR));

    let end = match closing {
        // `open + FENCE_LEN + offset` is the first closing backtick; keep all three.
        Some(offset) => (open + offset + 2 * FENCE_LEN).min(chars.len()),
        None => window_end,
    };
    chars[..end].iter().collect()
}
