//! Absolutizing `href` / `data-url` values against the site origin.

/// Turns a raw link target into an absolute URL.
///
/// Absolute `http://` and `https://` targets pass through unchanged, a leading
/// `/` is joined to `origin`, and anything else is joined with a separating
/// `/`. Missing or blank input yields `None`.
pub fn resolve_url(origin: &str, raw: Option<&str>) -> Option<String> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
    if raw.starts_with("http://") || raw.starts_with("https://") {
        return Some(raw.to_string());
    }
    let origin = origin.trim_end_matches('/');
    if raw.starts_with('/') {
        Some(format!("{origin}{raw}"))
    } else {
        Some(format!("{origin}/{raw}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "https://cms.example.edu";

    #[test]
    fn absolute_unchanged() {
        assert_eq!(
            resolve_url(ORIGIN, Some("http://other.host/a.pdf")).as_deref(),
            Some("http://other.host/a.pdf")
        );
        assert_eq!(
            resolve_url(ORIGIN, Some("https://other.host/a.pdf?x=1")).as_deref(),
            Some("https://other.host/a.pdf?x=1")
        );
    }

    #[test]
    fn root_relative() {
        assert_eq!(
            resolve_url(ORIGIN, Some("/x/y.pdf")).as_deref(),
            Some("https://cms.example.edu/x/y.pdf")
        );
    }

    #[test]
    fn bare_relative() {
        assert_eq!(
            resolve_url(ORIGIN, Some("y.pdf")).as_deref(),
            Some("https://cms.example.edu/y.pdf")
        );
    }

    #[test]
    fn origin_trailing_slash_is_ignored() {
        assert_eq!(
            resolve_url("https://cms.example.edu/", Some("/y.pdf")).as_deref(),
            Some("https://cms.example.edu/y.pdf")
        );
    }

    #[test]
    fn missing_or_blank() {
        assert_eq!(resolve_url(ORIGIN, None), None);
        assert_eq!(resolve_url(ORIGIN, Some("")), None);
        assert_eq!(resolve_url(ORIGIN, Some("   ")), None);
    }
}
