//! Loading the course page: a saved HTML file or a live URL.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::http::easy_get;

/// Reads `source` from disk, or fetches it when it is an `http(s)` URL.
pub fn load_page(source: &str, custom_headers: &HashMap<String, String>) -> Result<String> {
    if source.starts_with("http://") || source.starts_with("https://") {
        fetch_page(source, custom_headers)
    } else {
        let path = Path::new(source);
        fs::read_to_string(path)
            .with_context(|| format!("failed to read page {}", path.display()))
    }
}

/// GETs a page body. Non-2xx responses are errors.
/// Runs in the current thread; call from `spawn_blocking` if used from async code.
pub fn fetch_page(url: &str, custom_headers: &HashMap<String, String>) -> Result<String> {
    let mut body = Vec::new();
    let mut easy =
        easy_get(url, custom_headers, Duration::from_secs(60)).context("invalid page request")?;
    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform().context("page GET failed")?;
    }

    let code = easy.response_code().context("no response code")?;
    if !(200..300).contains(&code) {
        anyhow::bail!("GET {} returned HTTP {}", url, code);
    }
    tracing::debug!(url, bytes = body.len(), "fetched page");
    Ok(String::from_utf8_lossy(&body).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        fs::write(&path, "<html>ok</html>").unwrap();
        let body = load_page(path.to_str().unwrap(), &HashMap::new()).unwrap();
        assert_eq!(body, "<html>ok</html>");
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_page("/nonexistent/cmsdl/page.html", &HashMap::new()).unwrap_err();
        assert!(format!("{:#}", err).contains("failed to read page"));
    }
}
