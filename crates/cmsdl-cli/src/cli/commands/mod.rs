//! CLI command handlers, one file per command.

mod download;
mod get;
mod relay;
mod scan;

pub use download::{run_download, select_requests, Selection};
pub use get::run_get;
pub use relay::run_relay;
pub use scan::run_scan;

use anyhow::{Context, Result};
use cmsdl_core::config::CmsdlConfig;
use cmsdl_core::http::request_headers;
use cmsdl_core::page::load_page;
use cmsdl_core::scrape::{scrape_page, ScrapeOptions, ScrapeSession};
use std::path::PathBuf;

/// Target directory: explicit flag, then config, then the current directory.
pub fn download_dir(cfg: &CmsdlConfig, flag: Option<PathBuf>) -> Result<PathBuf> {
    match flag.or_else(|| cfg.download_dir.clone()) {
        Some(dir) => Ok(dir),
        None => std::env::current_dir().context("cannot determine current directory"),
    }
}

/// Loads `page` (file or URL) and scrapes it with the configured selectors.
pub(crate) async fn scrape_source(cfg: &CmsdlConfig, page: &str) -> Result<ScrapeSession> {
    let opts = ScrapeOptions::from_config(cfg)?;
    let headers = request_headers(cfg);
    let source = page.to_string();
    let html = tokio::task::spawn_blocking(move || load_page(&source, &headers))
        .await
        .context("page load task failed")??;
    let session = scrape_page(&html, &opts);
    tracing::info!(
        page,
        weeks = session.weeks.len(),
        skipped = session.skipped.len(),
        "scraped course page"
    );
    Ok(session)
}
