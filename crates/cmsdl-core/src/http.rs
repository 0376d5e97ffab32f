//! Shared libcurl setup for page fetches and file downloads.

use std::collections::HashMap;
use std::time::Duration;

use crate::config::CmsdlConfig;

/// Extra request headers derived from config (currently the session cookie).
pub fn request_headers(cfg: &CmsdlConfig) -> HashMap<String, String> {
    let mut headers = HashMap::new();
    if let Some(cookie) = cfg.cookie.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
        headers.insert("Cookie".to_string(), cookie.to_string());
    }
    headers
}

/// Creates an `Easy` handle for a GET of `url` with redirects and timeouts set.
pub fn easy_get(
    url: &str,
    custom_headers: &HashMap<String, String>,
    timeout: Duration,
) -> Result<curl::easy::Easy, curl::Error> {
    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(Duration::from_secs(30))?;
    easy.timeout(timeout)?;

    let mut list = curl::easy::List::new();
    for (k, v) in custom_headers {
        list.append(&format!("{}: {}", k.trim(), v.trim()))?;
    }
    if !custom_headers.is_empty() {
        easy.http_headers(list)?;
    }
    Ok(easy)
}
