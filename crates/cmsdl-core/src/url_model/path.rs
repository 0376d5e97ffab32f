//! Last path segment of a URL.

use url::Position;

/// Text after the last `/` of `url`, cut at the first `?` or `#`.
///
/// The slice is taken over the whole target, query included, so a query such
/// as `?path=/Uploads/notes.pdf` yields `notes.pdf`. For URLs `url` can parse,
/// the scheme and authority are skipped first so a bare host is never taken
/// for a filename. Returns `None` when the segment is empty.
pub fn last_path_segment(url: &str) -> Option<String> {
    let tail = match url::Url::parse(url) {
        Ok(parsed) if parsed.has_authority() => parsed[Position::BeforePath..].to_string(),
        _ => url.to_string(),
    };
    let after_slash = tail.rsplit('/').next().unwrap_or("");
    let segment = after_slash.split(['?', '#']).next().unwrap_or("");
    if segment.is_empty() {
        None
    } else {
        Some(segment.to_string())
    }
}
