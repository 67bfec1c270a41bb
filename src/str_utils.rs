use std::borrow::Cow;

/// Returns a prefix of the string with at most `max_chars` characters,
/// cut on a UTF-8 character boundary.
pub fn prefix_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Shortens `s` to `max_chars` characters and marks the cut with an ellipsis.
/// Newlines are flattened so the result fits on one log line.
pub fn ellipsize(s: &str, max_chars: usize) -> Cow<'_, str> {
    let cut = prefix_chars(s, max_chars);
    let truncated = cut.len() < s.len();
    if !truncated && !s.contains('\n') {
        return Cow::Borrowed(s);
    }

    let mut out = cut.replace('\n', "\\n");
    if truncated {
        out.push('…');
    }
    Cow::Owned(out)
}
