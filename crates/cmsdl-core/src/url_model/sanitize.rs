//! Cross-platform filename sanitization.

/// Longest stem we keep before the extension is appended.
pub const MAX_STEM_CHARS: usize = 200;

/// Characters no mainstream filesystem accepts in a filename.
const FORBIDDEN: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Maps a single character to its filename-safe replacement.
pub(crate) fn replace_forbidden(c: char) -> char {
    if FORBIDDEN.contains(&c) {
        '_'
    } else {
        c
    }
}

/// Sanitizes a candidate filename stem.
///
/// - Replaces `< > : " / \ | ? *` with `_`
/// - Collapses whitespace runs to a single space and trims both ends
/// - Limits length to [`MAX_STEM_CHARS`] characters, then trims again
///
/// Total over all inputs and idempotent.
pub fn sanitize_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_space = false;

    for c in name.chars() {
        if c.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        out.push(replace_forbidden(c));
    }

    match out.char_indices().nth(MAX_STEM_CHARS) {
        Some((cut, _)) => out[..cut].trim_end().to_string(),
        None => out,
    }
}
